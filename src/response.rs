//! S7 reply telegram validation and payload extraction.
//!
//! Every request the client sends is answered by exactly one telegram (an
//! SZL read may take several request/reply rounds, one telegram each).
//! [`Reply`] borrows the received bytes and offers one checked accessor per
//! reply family. Each accessor first verifies the telegram length, then the
//! result fields at the offsets the reply family uses:
//!
//! | Reply family         | Length        | Result fields checked             |
//! |----------------------|---------------|-----------------------------------|
//! | ISO connection       | exactly 22    | COTP type `0xD0` at offset 5      |
//! | PDU negotiation      | exactly 27    | bytes 17 and 18, grant at word 25 |
//! | Area read            | at least 25   | item return code at offset 21     |
//! | Area write           | exactly 22    | word 17, item return code at 21   |
//! | PLC control          | at least 19   | result word at offset 17          |
//! | Clock, status, SZL,  | at least 31   | result word at offset 27, data    |
//! | block info, password | or 33         | return code at 29 where data follows |
//!
//! A telegram shorter than its family minimum yields
//! [`S7Error::S7InvalidPdu`](crate::S7Error::S7InvalidPdu) (or the ISO
//! variant during session setup); a well-formed telegram whose result
//! fields signal a refusal yields the matching protocol error.
//!
//! # Example
//!
//! ```
//! use siemens_s7::Reply;
//!
//! // A write acknowledgement: 22 bytes, result word zero, return code 0xFF.
//! let mut bytes = vec![0u8; 22];
//! bytes[21] = 0xFF;
//!
//! let reply = Reply::new(&bytes);
//! assert!(reply.write_ack().is_ok());
//! ```

use chrono::NaiveDateTime;

use crate::codec;
use crate::error::{Result, S7Error};
use crate::frame::PDU_TYPE_CONNECT_CONFIRM;
use crate::telegram::PlcStatus;

/// Offset of the header result word in job acknowledgements.
const ACK_RESULT_OFFSET: usize = 17;

/// Offset of the parameter result word in userdata acknowledgements.
const USERDATA_RESULT_OFFSET: usize = 27;

/// Offset of the data return code in userdata acknowledgements.
const USERDATA_RETURN_CODE_OFFSET: usize = 29;

/// Return code signalling success for a data item.
const RETURN_CODE_SUCCESS: u8 = 0xFF;

/// First slice of an SZL reply, carrying the record header.
///
/// The partial list header (`LENTHDR` and `N_DR` in Siemens documentation)
/// only travels in the first telegram of a continuation sequence; follow-up
/// slices carry raw record bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SzlFirstSlice<'a> {
    /// Record bytes carried by this telegram.
    pub data: &'a [u8],
    /// `true` when no continuation telegram follows.
    pub done: bool,
    /// Sequence number to echo in the continuation request.
    pub sequence: u8,
    /// Length of a single partial list record in bytes.
    pub record_length: u16,
    /// Number of records in the complete partial list.
    pub record_count: u16,
}

/// Continuation slice of an SZL reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SzlNextSlice<'a> {
    /// Record bytes carried by this telegram.
    pub data: &'a [u8],
    /// `true` when no continuation telegram follows.
    pub done: bool,
    /// Sequence number to echo in the next continuation request.
    pub sequence: u8,
}

/// Borrowed view over a received S7 telegram.
///
/// The wrapped slice must span the complete telegram, TPKT header included,
/// exactly as the session layer received it. Offsets used by the accessors
/// count from the start of the TPKT header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply<'a> {
    bytes: &'a [u8],
}

impl<'a> Reply<'a> {
    /// Wraps a received telegram.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The complete telegram, starting at the TPKT header.
    pub fn new(bytes: &'a [u8]) -> Self {
        Reply { bytes }
    }

    /// Returns the telegram length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the telegram is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Validates an ISO connection confirmation.
    ///
    /// The peer must answer the connection request with a 22 byte telegram
    /// whose COTP type is Connection Confirm (`0xD0`).
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::IsoInvalidPdu`] when the length differs from 22
    /// and [`S7Error::IsoConnectionFailed`] when the COTP type is wrong.
    pub fn iso_connect_ack(&self) -> Result<()> {
        if self.len() != 22 {
            return Err(S7Error::iso_invalid_pdu(self.len()));
        }
        if self.bytes[5] != PDU_TYPE_CONNECT_CONFIRM {
            return Err(S7Error::IsoConnectionFailed);
        }
        Ok(())
    }

    /// Extracts the granted PDU length from a negotiation reply.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::IsoNegotiatingPdu`] when the telegram is not the
    /// expected 27 bytes, carries a non-zero result, or grants a zero PDU
    /// length.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::Reply;
    ///
    /// let mut bytes = vec![0u8; 27];
    /// bytes[25] = 0x01;
    /// bytes[26] = 0xE0; // grants 480 bytes
    ///
    /// let granted = Reply::new(&bytes).negotiated_pdu_length().unwrap();
    /// assert_eq!(granted, 480);
    /// ```
    pub fn negotiated_pdu_length(&self) -> Result<u16> {
        if self.len() != 27 || self.bytes[17] != 0 || self.bytes[18] != 0 {
            return Err(S7Error::IsoNegotiatingPdu);
        }
        let granted = codec::get_word_at(self.bytes, 25);
        if granted == 0 {
            return Err(S7Error::IsoNegotiatingPdu);
        }
        Ok(granted)
    }

    /// Extracts the payload of an area read reply.
    ///
    /// # Arguments
    ///
    /// * `size_requested` - Number of payload bytes the request asked for.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is shorter than
    /// the 25 byte header and [`S7Error::S7DataRead`] when the payload size
    /// differs from the request or the item return code is not `0xFF`.
    pub fn read_payload(&self, size_requested: usize) -> Result<&'a [u8]> {
        if self.len() < 25 {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        if self.len() - 25 != size_requested || self.bytes[21] != RETURN_CODE_SUCCESS {
            return Err(S7Error::S7DataRead);
        }
        Ok(&self.bytes[25..])
    }

    /// Validates an area write acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is not the
    /// expected 22 bytes and [`S7Error::S7DataWrite`] when the result word
    /// or the item return code signal a refusal.
    pub fn write_ack(&self) -> Result<()> {
        if self.len() != 22 {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        if codec::get_word_at(self.bytes, ACK_RESULT_OFFSET) != 0
            || self.bytes[21] != RETURN_CODE_SUCCESS
        {
            return Err(S7Error::S7DataWrite);
        }
        Ok(())
    }

    /// Validates a PLC control acknowledgement (stop, hot start, cold start).
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is 18 bytes or
    /// shorter and [`S7Error::S7FunctionError`] when the result word is
    /// non-zero.
    pub fn control_ack(&self) -> Result<()> {
        if self.len() <= 18 {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        let result = codec::get_word_at(self.bytes, ACK_RESULT_OFFSET);
        if result != 0 {
            return Err(S7Error::function_error(result));
        }
        Ok(())
    }

    /// Parses the first telegram of an SZL reply sequence.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is too short to
    /// carry the announced record bytes and [`S7Error::S7FunctionError`]
    /// when the CPU refused the query.
    pub fn szl_first_slice(&self) -> Result<SzlFirstSlice<'a>> {
        self.userdata_data_ack(32)?;
        // Word 31 counts the partial list header too, the record bytes
        // start at offset 41.
        let size = codec::get_word_at(self.bytes, 31)
            .checked_sub(8)
            .ok_or_else(|| S7Error::s7_invalid_pdu(self.len()))? as usize;
        let end = 41 + size;
        if self.len() < end {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        Ok(SzlFirstSlice {
            data: &self.bytes[41..end],
            done: self.bytes[26] == 0x00,
            sequence: self.bytes[24],
            record_length: codec::get_word_at(self.bytes, 37),
            record_count: codec::get_word_at(self.bytes, 39),
        })
    }

    /// Parses a continuation telegram of an SZL reply sequence.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is too short to
    /// carry the announced record bytes and [`S7Error::S7FunctionError`]
    /// when the CPU refused the query.
    pub fn szl_next_slice(&self) -> Result<SzlNextSlice<'a>> {
        self.userdata_data_ack(32)?;
        // Continuation slices carry no partial list header, the record
        // bytes start at offset 37.
        let size = codec::get_word_at(self.bytes, 31) as usize;
        let end = 37 + size;
        if self.len() < end {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        Ok(SzlNextSlice {
            data: &self.bytes[37..end],
            done: self.bytes[26] == 0x00,
            sequence: self.bytes[24],
        })
    }

    /// Extracts the 96 byte block descriptor from a block info reply.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram cannot hold the
    /// descriptor and [`S7Error::S7FunctionError`] when the CPU refused the
    /// query.
    pub fn block_descriptor(&self) -> Result<&'a [u8]> {
        self.userdata_data_ack(32)?;
        if self.len() < 42 + 96 {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        Ok(&self.bytes[42..42 + 96])
    }

    /// Decodes the CPU date and time from a clock read reply.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is too short or
    /// the BCD fields do not form a valid date, and
    /// [`S7Error::S7FunctionError`] when the CPU refused the query.
    pub fn plc_date_time(&self) -> Result<NaiveDateTime> {
        self.userdata_data_ack(30)?;
        // Year byte at offset 34, five more BCD fields behind it.
        if self.len() < 40 {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        codec::get_date_time_at(self.bytes, 34)
            .ok_or_else(|| S7Error::s7_invalid_pdu(self.len()))
    }

    /// Validates a clock write acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is 30 bytes or
    /// shorter and [`S7Error::S7FunctionError`] when the result word is
    /// non-zero.
    pub fn clock_set_ack(&self) -> Result<()> {
        self.userdata_ack(30)
    }

    /// Decodes the CPU run state from a status reply.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram does not reach
    /// the status byte and [`S7Error::S7FunctionError`] when the CPU
    /// refused the query.
    pub fn plc_status(&self) -> Result<PlcStatus> {
        self.userdata_ack(30)?;
        if self.len() <= 44 {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        Ok(PlcStatus::from_code(self.bytes[44]))
    }

    /// Validates a password logon acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is 32 bytes or
    /// shorter and [`S7Error::S7FunctionError`] when the CPU rejected the
    /// password.
    pub fn password_set_ack(&self) -> Result<()> {
        self.userdata_ack(32)
    }

    /// Validates a password logoff acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidPdu`] when the telegram is 30 bytes or
    /// shorter and [`S7Error::S7FunctionError`] when the CPU refused the
    /// request.
    pub fn password_clear_ack(&self) -> Result<()> {
        self.userdata_ack(30)
    }

    /// Checks the parameter result word of a userdata acknowledgement.
    fn userdata_ack(&self, min_length: usize) -> Result<()> {
        if self.len() <= min_length {
            return Err(S7Error::s7_invalid_pdu(self.len()));
        }
        let result = codec::get_word_at(self.bytes, USERDATA_RESULT_OFFSET);
        if result != 0 {
            return Err(S7Error::function_error(result));
        }
        Ok(())
    }

    /// Checks the result word and the data return code of a userdata
    /// acknowledgement that carries a payload.
    fn userdata_data_ack(&self, min_length: usize) -> Result<()> {
        self.userdata_ack(min_length)?;
        let code = self.bytes[USERDATA_RETURN_CODE_OFFSET];
        if code != RETURN_CODE_SUCCESS {
            return Err(S7Error::function_error(u16::from(code)));
        }
        Ok(())
    }
}
