//! TPKT and COTP framing structures.
//!
//! This module defines the two framing layers every S7 telegram is wrapped
//! in: the 4-byte TPKT header (RFC 1006) that length-prefixes frames over
//! TCP, and the COTP header (ISO 8073) that follows it. After the connect
//! handshake every telegram carries the fixed 3-byte COTP data header.
//!
//! # TPKT Header Structure
//!
//! | Byte | Field | Description |
//! |------|-------|-------------|
//! | 0 | Version | Always 0x03 |
//! | 1 | Reserved | Always 0x00 |
//! | 2-3 | Length | Total frame length including this header, big-endian |
//!
//! # COTP Data Header Structure
//!
//! | Byte | Field | Description |
//! |------|-------|-------------|
//! | 0 | Length indicator | 0x02 for data TPDUs |
//! | 1 | PDU type | 0xF0 data, 0xE0 connection request, 0xD0 connect confirm |
//! | 2 | Flags | 0x80 = end of transmission |
//!
//! # Example
//!
//! ```
//! use siemens_s7::{CotpHeader, TpktHeader};
//!
//! let tpkt = TpktHeader::new(31);
//! assert_eq!(tpkt.to_bytes(), [0x03, 0x00, 0x00, 0x1F]);
//!
//! let cotp = CotpHeader::new_data();
//! assert_eq!(cotp.to_bytes(), [0x02, 0xF0, 0x80]);
//! ```

/// TPKT header size in bytes.
pub const TPKT_HEADER_SIZE: usize = 4;

/// COTP data header size in bytes.
pub const COTP_DATA_HEADER_SIZE: usize = 3;

/// Combined TPKT + COTP data header size preceding every S7 payload.
pub const ISO_HEADER_SIZE: usize = TPKT_HEADER_SIZE + COTP_DATA_HEADER_SIZE;

/// Smallest total telegram length accepted from the peer.
pub const MIN_TELEGRAM_SIZE: usize = 16;

/// PDU length requested during negotiation.
pub const DEFAULT_PDU_SIZE_REQUESTED: u16 = 480;

/// Largest total telegram length accepted from the peer (requested PDU plus
/// the ISO header).
pub const MAX_TELEGRAM_SIZE: usize = DEFAULT_PDU_SIZE_REQUESTED as usize + ISO_HEADER_SIZE;

/// ISO connection request/confirm telegram size in bytes.
pub const ISO_CONNECTION_TELEGRAM_SIZE: usize = 22;

/// COTP PDU type for a connection request.
pub const PDU_TYPE_CONNECT_REQUEST: u8 = 0xE0;

/// COTP PDU type for a connect confirm.
pub const PDU_TYPE_CONNECT_CONFIRM: u8 = 0xD0;

/// COTP PDU type for a data TPDU.
pub const PDU_TYPE_DATA: u8 = 0xF0;

/// TPKT header (4 bytes).
///
/// Carries the total length of the frame it prefixes, header included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TpktHeader {
    /// Protocol version (always 0x03).
    pub version: u8,
    /// Reserved byte (always 0x00).
    pub reserved: u8,
    /// Total frame length including this header.
    pub length: u16,
}

impl TpktHeader {
    /// Creates a header for a frame of the given total length.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::TpktHeader;
    ///
    /// let header = TpktHeader::new(22);
    /// assert_eq!(header.length, 22);
    /// ```
    pub fn new(length: u16) -> Self {
        Self {
            version: 0x03,
            reserved: 0x00,
            length,
        }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(self) -> [u8; TPKT_HEADER_SIZE] {
        let len = self.length.to_be_bytes();
        [self.version, self.reserved, len[0], len[1]]
    }

    /// Parses a header from its four raw bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::TpktHeader;
    ///
    /// let header = TpktHeader::from_bytes([0x03, 0x00, 0x00, 0x16]);
    /// assert_eq!(header.length, 22);
    /// ```
    pub fn from_bytes(bytes: [u8; TPKT_HEADER_SIZE]) -> Self {
        Self {
            version: bytes[0],
            reserved: bytes[1],
            length: u16::from_be_bytes([bytes[2], bytes[3]]),
        }
    }

    /// Returns whether the declared length is a bare keepalive frame
    /// (TPKT + COTP header with no payload).
    pub fn is_keepalive(self) -> bool {
        self.length as usize == ISO_HEADER_SIZE
    }
}

/// COTP header as it appears after the TPKT header (3 bytes).
///
/// Only the fixed-size data-TPDU form is modeled; the variable-length
/// connect telegrams are built whole by [`IsoConnectionRequest`] and
/// recognized on receive through the PDU type byte captured here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CotpHeader {
    /// Length indicator (bytes following it in the COTP header).
    pub length: u8,
    /// PDU type code.
    pub pdu_type: u8,
    /// Flags byte; 0x80 marks the end of a transmission.
    pub flags: u8,
}

impl CotpHeader {
    /// Creates the fixed data-TPDU header every S7 telegram uses.
    pub fn new_data() -> Self {
        Self {
            length: 0x02,
            pdu_type: PDU_TYPE_DATA,
            flags: 0x80,
        }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(self) -> [u8; COTP_DATA_HEADER_SIZE] {
        [self.length, self.pdu_type, self.flags]
    }

    /// Parses a header from its three raw bytes.
    pub fn from_bytes(bytes: [u8; COTP_DATA_HEADER_SIZE]) -> Self {
        Self {
            length: bytes[0],
            pdu_type: bytes[1],
            flags: bytes[2],
        }
    }

    /// Returns whether this header announces a connect confirm.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::CotpHeader;
    ///
    /// let cc = CotpHeader::from_bytes([0x11, 0xD0, 0x00]);
    /// assert!(cc.is_connect_confirm());
    /// assert!(!CotpHeader::new_data().is_connect_confirm());
    /// ```
    pub fn is_connect_confirm(self) -> bool {
        self.pdu_type == PDU_TYPE_CONNECT_CONFIRM
    }
}

/// ISO connection request telegram (22 bytes).
///
/// Sent as the first telegram after the TCP connection is up. The two TSAP
/// fields address the controller: the remote TSAP encodes connection type,
/// rack, and slot.
///
/// # Wire Layout
///
/// | Offset | Field |
/// |--------|-------|
/// | 0-3 | TPKT header, length 22 |
/// | 4 | COTP length indicator (17) |
/// | 5 | PDU type (0xE0, connection request) |
/// | 6-7 | Destination reference |
/// | 8-9 | Source reference |
/// | 10 | Class/options |
/// | 11-13 | TPDU max size parameter (0xC0 01 0A = 1024) |
/// | 14-17 | Source TSAP parameter (0xC1 02 + TSAP) |
/// | 18-21 | Destination TSAP parameter (0xC2 02 + TSAP) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoConnectionRequest {
    /// Local (source) TSAP.
    pub local_tsap: u16,
    /// Remote (destination) TSAP.
    pub remote_tsap: u16,
}

impl IsoConnectionRequest {
    /// Creates a connection request with the given TSAP pair.
    pub fn new(local_tsap: u16, remote_tsap: u16) -> Self {
        Self {
            local_tsap,
            remote_tsap,
        }
    }

    /// Serializes the telegram to bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::IsoConnectionRequest;
    ///
    /// let bytes = IsoConnectionRequest::new(0x0100, 0x0102).to_bytes();
    /// assert_eq!(bytes.len(), 22);
    /// assert_eq!(bytes[5], 0xE0);
    /// ```
    pub fn to_bytes(self) -> [u8; ISO_CONNECTION_TELEGRAM_SIZE] {
        let local = self.local_tsap.to_be_bytes();
        let remote = self.remote_tsap.to_be_bytes();
        [
            0x03, 0x00, 0x00, 0x16, // TPKT, total length 22
            0x11, // COTP length indicator
            PDU_TYPE_CONNECT_REQUEST,
            0x00, 0x00, // destination reference
            0x00, 0x01, // source reference
            0x00, // class 0
            0xC0, 0x01, 0x0A, // TPDU size 2^10
            0xC1, 0x02, local[0], local[1], // source TSAP
            0xC2, 0x02, remote[0], remote[1], // destination TSAP
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tpkt_to_bytes() {
        let header = TpktHeader::new(487);
        assert_eq!(header.to_bytes(), [0x03, 0x00, 0x01, 0xE7]);
    }

    #[test]
    fn test_tpkt_from_bytes() {
        let header = TpktHeader::from_bytes([0x03, 0x00, 0x00, 0x1B]);
        assert_eq!(header.version, 0x03);
        assert_eq!(header.reserved, 0x00);
        assert_eq!(header.length, 27);
    }

    #[test]
    fn test_tpkt_roundtrip() {
        let original = TpktHeader::new(0x1234);
        let parsed = TpktHeader::from_bytes(original.to_bytes());
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_tpkt_keepalive() {
        assert!(TpktHeader::new(7).is_keepalive());
        assert!(!TpktHeader::new(22).is_keepalive());
    }

    #[test]
    fn test_cotp_data_header() {
        let header = CotpHeader::new_data();
        assert_eq!(header.to_bytes(), [0x02, 0xF0, 0x80]);
        assert!(!header.is_connect_confirm());
    }

    #[test]
    fn test_cotp_connect_confirm() {
        let header = CotpHeader::from_bytes([0x11, 0xD0, 0x00]);
        assert_eq!(header.pdu_type, PDU_TYPE_CONNECT_CONFIRM);
        assert!(header.is_connect_confirm());
    }

    #[test]
    fn test_iso_connection_request_bytes() {
        let bytes = IsoConnectionRequest::new(0x0100, 0x0102).to_bytes();
        let expected = hex::decode("0300001611e00000000100c0010ac1020100c2020102")
            .expect("valid hex");
        assert_eq!(bytes.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_iso_connection_request_tsap_offsets() {
        // Remote TSAP for connection type PG, rack 0, slot 2
        let bytes = IsoConnectionRequest::new(0x0100, 0x0102).to_bytes();
        assert_eq!(bytes[16], 0x01);
        assert_eq!(bytes[17], 0x00);
        assert_eq!(bytes[20], 0x01);
        assert_eq!(bytes[21], 0x02);

        // Rack 3, slot 5 for an OP connection
        let bytes = IsoConnectionRequest::new(0x0100, 0x0265).to_bytes();
        assert_eq!(bytes[20], 0x02);
        assert_eq!(bytes[21], 0x65);
    }

    #[test]
    fn test_size_constants() {
        assert_eq!(ISO_HEADER_SIZE, 7);
        assert_eq!(MAX_TELEGRAM_SIZE, 487);
    }
}
