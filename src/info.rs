//! Typed views over CPU system data.
//!
//! SZL queries and the block info service answer with packed records whose
//! layouts are fixed per list. This module decodes the lists the client
//! exposes through dedicated accessors:
//!
//! | Holder       | Source                  | Contents                       |
//! |--------------|-------------------------|--------------------------------|
//! | [`Szl`]      | any SZL query           | raw records plus record header |
//! | [`BlockInfo`]| block info service      | 96 byte block descriptor       |
//! | [`CpuInfo`]  | SZL `0x001C` index 0    | module and plant identity      |
//! | [`CpInfo`]   | SZL `0x0131` index 1    | communication capabilities     |
//! | [`OrderCode`]| SZL `0x0011` index 0    | order code, firmware version   |
//! | [`Protection`]| SZL `0x0232` index 4   | protection level words         |
//!
//! Every decoder checks that the record bytes reach the fields it reads and
//! fails with [`S7Error::S7InvalidPdu`](crate::S7Error::S7InvalidPdu)
//! otherwise. String fields are fixed-length ASCII with trailing padding,
//! trimmed on extraction.

use chrono::NaiveDate;

use crate::codec;
use crate::error::{Result, S7Error};

/// A partial list (SZL) assembled from one or more reply telegrams.
///
/// `record_length` and `record_count` mirror the `LENTHDR` and `N_DR`
/// words of the partial list header; `data` holds the concatenated record
/// bytes of all slices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Szl {
    /// Length of a single record in bytes.
    pub record_length: u16,
    /// Number of records the list announces.
    pub record_count: u16,
    /// Concatenated record bytes.
    pub data: Vec<u8>,
}

impl Szl {
    /// Iterates over the records of the list.
    ///
    /// Yields `record_length` sized chunks of the data; a trailing partial
    /// chunk or a zero record length yields nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::Szl;
    ///
    /// let szl = Szl {
    ///     record_length: 4,
    ///     record_count: 2,
    ///     data: vec![1, 2, 3, 4, 5, 6, 7, 8],
    /// };
    ///
    /// let records: Vec<&[u8]> = szl.records().collect();
    /// assert_eq!(records, [&[1, 2, 3, 4][..], &[5, 6, 7, 8][..]]);
    /// ```
    pub fn records(&self) -> std::slice::ChunksExact<'_, u8> {
        let size = usize::from(self.record_length);
        if size == 0 {
            self.data[..0].chunks_exact(1)
        } else {
            self.data.chunks_exact(size)
        }
    }
}

/// Metadata of a single logic block, decoded from the 96 byte descriptor
/// the block info service returns.
///
/// The descriptor stores the code and interface timestamps as six byte
/// fields whose trailing word counts days since 1984-01-01;
/// [`BlockInfo::code_date`] and [`BlockInfo::interface_date`] convert the
/// day words to calendar dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    /// Block flags.
    pub flags: u8,
    /// Block language (1 = AWL, 2 = KOP, 3 = FUP, ...).
    pub language: u8,
    /// Block type code as stored by the CPU.
    pub block_type: u8,
    /// Block number.
    pub block_number: u16,
    /// Size of the block in load memory, in bytes.
    pub load_size: u32,
    /// Code timestamp as days since 1984-01-01.
    pub code_date_days: u16,
    /// Interface timestamp as days since 1984-01-01.
    pub interface_date_days: u16,
    /// Length of the system block builder data in bytes.
    pub sbb_length: u16,
    /// Local data size in bytes.
    pub local_data: u16,
    /// Size of the executable MC7 code in bytes. For a DB this is the
    /// number of data bytes the block holds.
    pub mc7_size: u16,
    /// Block author.
    pub author: String,
    /// Block family.
    pub family: String,
    /// Block header name.
    pub header: String,
    /// Block version.
    pub version: u8,
    /// Block checksum.
    pub checksum: u16,
}

impl BlockInfo {
    /// Decodes a 96 byte block descriptor.
    ///
    /// # Arguments
    ///
    /// * `descriptor` - The descriptor bytes as carried by the reply.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when fewer than 96 bytes are given.
    pub fn from_descriptor(descriptor: &[u8]) -> Result<BlockInfo> {
        if descriptor.len() < 96 {
            return Err(S7Error::s7_invalid_pdu(descriptor.len()));
        }
        Ok(BlockInfo {
            flags: descriptor[0],
            language: descriptor[1],
            block_type: descriptor[2],
            block_number: codec::get_word_at(descriptor, 3),
            load_size: codec::get_dword_at(descriptor, 5),
            code_date_days: codec::get_word_at(descriptor, 17),
            interface_date_days: codec::get_word_at(descriptor, 23),
            sbb_length: codec::get_word_at(descriptor, 25),
            local_data: codec::get_word_at(descriptor, 29),
            mc7_size: codec::get_word_at(descriptor, 31),
            author: codec::get_string_at(descriptor, 33, 8),
            family: codec::get_string_at(descriptor, 41, 8),
            header: codec::get_string_at(descriptor, 49, 8),
            version: descriptor[57],
            checksum: codec::get_word_at(descriptor, 59),
        })
    }

    /// Returns the code timestamp as a calendar date.
    pub fn code_date(&self) -> Option<NaiveDate> {
        codec::get_block_date(self.code_date_days)
    }

    /// Returns the interface timestamp as a calendar date.
    pub fn interface_date(&self) -> Option<NaiveDate> {
        codec::get_block_date(self.interface_date_days)
    }
}

/// CPU and plant identity, from SZL `0x001C` index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuInfo {
    /// Name of the automation system.
    pub as_name: String,
    /// Name of the module.
    pub module_name: String,
    /// Copyright string.
    pub copyright: String,
    /// Serial number of the module.
    pub serial_number: String,
    /// Module type name.
    pub module_type_name: String,
}

impl CpuInfo {
    /// Decodes the component identification records.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the record bytes end before
    /// the module type name field.
    pub fn from_record_data(data: &[u8]) -> Result<CpuInfo> {
        if data.len() < 204 {
            return Err(S7Error::s7_invalid_pdu(data.len()));
        }
        Ok(CpuInfo {
            as_name: codec::get_string_at(data, 2, 24),
            module_name: codec::get_string_at(data, 36, 24),
            copyright: codec::get_string_at(data, 104, 26),
            serial_number: codec::get_string_at(data, 138, 24),
            module_type_name: codec::get_string_at(data, 172, 32),
        })
    }
}

/// Communication capabilities, from SZL `0x0131` index 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpInfo {
    /// Largest PDU the communication processor accepts, in bytes.
    pub max_pdu_length: u16,
    /// Largest number of parallel connections.
    pub max_connections: u16,
    /// Largest MPI transfer rate in bit/s.
    pub max_mpi_rate: u32,
    /// Largest communication bus transfer rate in bit/s.
    pub max_bus_rate: u32,
}

impl CpInfo {
    /// Decodes the communication capability record.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the record bytes end before
    /// the bus rate field.
    pub fn from_record_data(data: &[u8]) -> Result<CpInfo> {
        if data.len() < 14 {
            return Err(S7Error::s7_invalid_pdu(data.len()));
        }
        Ok(CpInfo {
            max_pdu_length: codec::get_word_at(data, 2),
            max_connections: codec::get_word_at(data, 4),
            max_mpi_rate: codec::get_dword_at(data, 6),
            max_bus_rate: codec::get_dword_at(data, 10),
        })
    }
}

/// Order code and firmware version, from SZL `0x0011` index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCode {
    /// Order code of the module (MLFB).
    pub code: String,
    /// Firmware version digit.
    pub v1: u8,
    /// Firmware release digit.
    pub v2: u8,
    /// Firmware modification digit.
    pub v3: u8,
}

impl OrderCode {
    /// Decodes the order code records. The firmware digits sit in the last
    /// three bytes of the record data.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the record bytes end before
    /// the order code field.
    pub fn from_record_data(data: &[u8]) -> Result<OrderCode> {
        if data.len() < 22 {
            return Err(S7Error::s7_invalid_pdu(data.len()));
        }
        Ok(OrderCode {
            code: codec::get_string_at(data, 2, 20),
            v1: data[data.len() - 3],
            v2: data[data.len() - 2],
            v3: data[data.len() - 1],
        })
    }

    /// Returns the firmware version in `V.R.M` notation, for example
    /// `"3.2.6"`.
    pub fn firmware_version(&self) -> String {
        format!("{}.{}.{}", self.v1, self.v2, self.v3)
    }
}

/// CPU protection levels, from SZL `0x0232` index 4.
///
/// Field names follow the Siemens documentation for the answer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protection {
    /// Protection level set with the mode selector (1..3).
    pub sch_schal: u16,
    /// Protection level set per parameter (0..3).
    pub sch_par: u16,
    /// Valid protection level of the CPU (0..3).
    pub sch_rel: u16,
    /// Mode selector setting (1 = RUN, 2 = RUN-P, 3 = STOP, 4 = MRES).
    pub bart_sch: u16,
    /// Startup switch setting (1 = CRST, 2 = WRST, 0 = undefined).
    pub anl_sch: u16,
}

impl Protection {
    /// Decodes the protection level record.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the record bytes end before
    /// the startup switch field.
    pub fn from_record_data(data: &[u8]) -> Result<Protection> {
        if data.len() < 12 {
            return Err(S7Error::s7_invalid_pdu(data.len()));
        }
        Ok(Protection {
            sch_schal: codec::get_word_at(data, 2),
            sch_par: codec::get_word_at(data, 4),
            sch_rel: codec::get_word_at(data, 6),
            bart_sch: codec::get_word_at(data, 8),
            anl_sch: codec::get_word_at(data, 10),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{set_dword_at, set_word_at};

    /// Writes an ASCII field padded with spaces to the given width.
    fn put_string(buf: &mut [u8], pos: usize, width: usize, text: &str) {
        let field = &mut buf[pos..pos + width];
        field.fill(b' ');
        field[..text.len()].copy_from_slice(text.as_bytes());
    }

    #[test]
    fn test_szl_records() {
        let szl = Szl {
            record_length: 2,
            record_count: 3,
            data: vec![0, 1, 2, 3, 4, 5],
        };
        let records: Vec<&[u8]> = szl.records().collect();
        assert_eq!(records, [&[0, 1][..], &[2, 3][..], &[4, 5][..]]);
    }

    #[test]
    fn test_szl_records_zero_length() {
        let szl = Szl {
            record_length: 0,
            record_count: 0,
            data: vec![1, 2, 3],
        };
        assert_eq!(szl.records().count(), 0);
    }

    #[test]
    fn test_szl_records_ignores_trailing_partial() {
        let szl = Szl {
            record_length: 4,
            record_count: 2,
            data: vec![0; 6],
        };
        assert_eq!(szl.records().count(), 1);
    }

    #[test]
    fn test_block_info_from_descriptor() {
        let mut buf = vec![0u8; 96];
        buf[0] = 0x01; // flags
        buf[1] = 0x01; // AWL
        buf[2] = 0x41; // DB
        set_word_at(&mut buf, 3, 100);
        set_dword_at(&mut buf, 5, 1234);
        set_word_at(&mut buf, 17, 7306);
        set_word_at(&mut buf, 23, 7305);
        set_word_at(&mut buf, 25, 20);
        set_word_at(&mut buf, 29, 0);
        set_word_at(&mut buf, 31, 64);
        put_string(&mut buf, 33, 8, "SIMATIC");
        put_string(&mut buf, 41, 8, "SYSTEM");
        put_string(&mut buf, 49, 8, "DB");
        buf[57] = 2;
        set_word_at(&mut buf, 59, 0xBEEF);

        let info = BlockInfo::from_descriptor(&buf).unwrap();
        assert_eq!(info.flags, 0x01);
        assert_eq!(info.language, 0x01);
        assert_eq!(info.block_type, 0x41);
        assert_eq!(info.block_number, 100);
        assert_eq!(info.load_size, 1234);
        assert_eq!(info.code_date_days, 7306);
        assert_eq!(info.interface_date_days, 7305);
        assert_eq!(info.sbb_length, 20);
        assert_eq!(info.local_data, 0);
        assert_eq!(info.mc7_size, 64);
        assert_eq!(info.author, "SIMATIC");
        assert_eq!(info.family, "SYSTEM");
        assert_eq!(info.header, "DB");
        assert_eq!(info.version, 2);
        assert_eq!(info.checksum, 0xBEEF);
    }

    #[test]
    fn test_block_info_dates() {
        let mut buf = vec![0u8; 96];
        set_word_at(&mut buf, 17, 7305);
        set_word_at(&mut buf, 23, 7305);
        let info = BlockInfo::from_descriptor(&buf).unwrap();
        // 7305 days after 1984-01-01, five leap years in between
        assert_eq!(info.code_date().unwrap().to_string(), "2004-01-01");
        assert_eq!(info.interface_date().unwrap().to_string(), "2004-01-01");
    }

    #[test]
    fn test_block_info_short_descriptor() {
        let buf = vec![0u8; 95];
        let err = BlockInfo::from_descriptor(&buf).unwrap_err();
        assert!(matches!(err, S7Error::S7InvalidPdu { length: 95 }));
    }

    #[test]
    fn test_cpu_info_from_record_data() {
        let mut buf = vec![0u8; 204];
        put_string(&mut buf, 2, 24, "S7-300 station");
        put_string(&mut buf, 36, 24, "CPU 315-2 PN/DP");
        put_string(&mut buf, 104, 26, "Original Siemens Equipment");
        put_string(&mut buf, 138, 24, "S C-X4U421412013");
        put_string(&mut buf, 172, 32, "CPU 315-2 PN/DP");

        let info = CpuInfo::from_record_data(&buf).unwrap();
        assert_eq!(info.as_name, "S7-300 station");
        assert_eq!(info.module_name, "CPU 315-2 PN/DP");
        assert_eq!(info.copyright, "Original Siemens Equipment");
        assert_eq!(info.serial_number, "S C-X4U421412013");
        assert_eq!(info.module_type_name, "CPU 315-2 PN/DP");
    }

    #[test]
    fn test_cpu_info_short_data() {
        let buf = vec![0u8; 203];
        let err = CpuInfo::from_record_data(&buf).unwrap_err();
        assert!(matches!(err, S7Error::S7InvalidPdu { length: 203 }));
    }

    #[test]
    fn test_cp_info_from_record_data() {
        let mut buf = vec![0u8; 14];
        set_word_at(&mut buf, 2, 240);
        set_word_at(&mut buf, 4, 32);
        set_dword_at(&mut buf, 6, 187_500);
        set_dword_at(&mut buf, 10, 12_000_000);

        let info = CpInfo::from_record_data(&buf).unwrap();
        assert_eq!(info.max_pdu_length, 240);
        assert_eq!(info.max_connections, 32);
        assert_eq!(info.max_mpi_rate, 187_500);
        assert_eq!(info.max_bus_rate, 12_000_000);
    }

    #[test]
    fn test_order_code_from_record_data() {
        let mut buf = vec![0u8; 34];
        put_string(&mut buf, 2, 20, "6ES7 315-2EH14-0AB0");
        buf[31] = 3;
        buf[32] = 2;
        buf[33] = 6;

        let order = OrderCode::from_record_data(&buf).unwrap();
        assert_eq!(order.code, "6ES7 315-2EH14-0AB0");
        assert_eq!(order.firmware_version(), "3.2.6");
    }

    #[test]
    fn test_order_code_short_data() {
        let buf = vec![0u8; 21];
        let err = OrderCode::from_record_data(&buf).unwrap_err();
        assert!(matches!(err, S7Error::S7InvalidPdu { length: 21 }));
    }

    #[test]
    fn test_protection_from_record_data() {
        let mut buf = vec![0u8; 12];
        set_word_at(&mut buf, 2, 1);
        set_word_at(&mut buf, 4, 0);
        set_word_at(&mut buf, 6, 1);
        set_word_at(&mut buf, 8, 2);
        set_word_at(&mut buf, 10, 0);

        let prot = Protection::from_record_data(&buf).unwrap();
        assert_eq!(prot.sch_schal, 1);
        assert_eq!(prot.sch_par, 0);
        assert_eq!(prot.sch_rel, 1);
        assert_eq!(prot.bart_sch, 2);
        assert_eq!(prot.anl_sch, 0);
    }
}
