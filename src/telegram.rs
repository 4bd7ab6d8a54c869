//! S7 request telegram structures and serialization.
//!
//! This module contains all S7 request telegrams that can be sent to a
//! controller after the ISO connection is up. Each telegram starts from a
//! fixed byte template (TPKT and COTP headers included) and patches its
//! per-call fields at documented offsets, so the emitted bytes stay
//! bit-identical to a reference protocol trace.
//!
//! # Telegram Types
//!
//! ## Session Setup
//! - [`NegotiatePduRequest`] - Negotiate the maximum PDU length
//!
//! ## Data Access
//! - [`ReadAreaRequest`] - Read elements from a memory area
//! - [`WriteAreaRequest`] - Write elements to a memory area
//!
//! ## Diagnostics
//! - [`SzlFirstRequest`] / [`SzlNextRequest`] - System status list with
//!   continuation
//! - [`BlockInfoRequest`] - Query a block descriptor
//! - [`GetStatusRequest`] - Query the CPU run/stop state
//!
//! ## Clock
//! - [`GetClockRequest`] / [`SetClockRequest`] - PLC date and time
//!
//! ## Control
//! - [`PlcControlRequest`] - Stop, hot start, cold start
//!
//! ## Security
//! - [`SetPasswordRequest`] / [`ClearPasswordRequest`] - Session password
//!
//! # Example
//!
//! Telegrams are typically created and sent through the
//! [`Client`](crate::Client) struct, but can also be built directly for
//! lower-level control:
//!
//! ```
//! use siemens_s7::{Area, ReadAreaRequest};
//!
//! let request = ReadAreaRequest::new(Area::DB, 5, 0, 16).unwrap();
//! let bytes = request.to_bytes();
//! assert_eq!(bytes.len(), 31);
//! assert_eq!(bytes[27], 0x84); // DB area code
//! ```

use chrono::NaiveDateTime;

use crate::area::Area;
use crate::codec;
use crate::error::{Result, S7Error};

/// Read request telegram size in bytes.
pub(crate) const READ_REQUEST_SIZE: usize = 31;

/// Write request telegram size in bytes, data excluded.
pub(crate) const WRITE_REQUEST_SIZE: usize = 35;

// PDU negotiation telegram; requested length patched at word 23.
const PDU_NEGOTIATION_TEMPLATE: [u8; 25] = [
    0x03, 0x00, 0x00, 0x19, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x04, 0x00, 0x00, 0x08,
    0x00, 0x00, 0xF0, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x1E,
];

// Read/write request telegram. The first 31 bytes form a read request; a
// write request uses all 35 plus the payload.
const READ_WRITE_TEMPLATE: [u8; 35] = [
    0x03, 0x00, 0x00, 0x1F, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x05, 0x00, 0x00, 0x0E,
    0x00, 0x00, 0x04, 0x01, 0x12, 0x0A, 0x10, 0x02, 0x00, 0x00, 0x00, 0x00, 0x84, 0x00, 0x00,
    0x00, 0x00, 0x04, 0x00, 0x00,
];

// Block info request; block type at byte 30, ASCII block number at 31-35.
const BLOCK_INFO_TEMPLATE: [u8; 37] = [
    0x03, 0x00, 0x00, 0x25, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x05, 0x00, 0x00, 0x08,
    0x00, 0x0C, 0x00, 0x01, 0x12, 0x04, 0x11, 0x43, 0x03, 0x00, 0xFF, 0x09, 0x00, 0x08, 0x30,
    0x41, 0x30, 0x30, 0x30, 0x30, 0x30, 0x41,
];

// SZL first request; sequence at word 11, ID at word 29, index at word 31.
const SZL_FIRST_TEMPLATE: [u8; 33] = [
    0x03, 0x00, 0x00, 0x21, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x05, 0x00, 0x00, 0x08,
    0x00, 0x08, 0x00, 0x01, 0x12, 0x04, 0x11, 0x44, 0x01, 0x00, 0xFF, 0x09, 0x00, 0x04, 0x00,
    0x00, 0x00, 0x00,
];

// SZL next request; sequence at word 11, server sequence echo at byte 24.
const SZL_NEXT_TEMPLATE: [u8; 33] = [
    0x03, 0x00, 0x00, 0x21, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x06, 0x00, 0x00, 0x0C,
    0x00, 0x04, 0x00, 0x01, 0x12, 0x08, 0x12, 0x44, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x0A,
    0x00, 0x00, 0x00,
];

// Clock read request; fixed.
const GET_CLOCK_TEMPLATE: [u8; 29] = [
    0x03, 0x00, 0x00, 0x1D, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x38, 0x00, 0x00, 0x08,
    0x00, 0x04, 0x00, 0x01, 0x12, 0x04, 0x11, 0x47, 0x01, 0x00, 0x0A, 0x00, 0x00, 0x00,
];

// Clock set request; BCD date and time patched at bytes 31-38.
const SET_CLOCK_TEMPLATE: [u8; 39] = [
    0x03, 0x00, 0x00, 0x27, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x89, 0x03, 0x00, 0x08,
    0x00, 0x0E, 0x00, 0x01, 0x12, 0x04, 0x11, 0x47, 0x02, 0x00, 0xFF, 0x09, 0x00, 0x0A, 0x00,
    0x19, 0x13, 0x12, 0x06, 0x17, 0x37, 0x13, 0x00, 0x01,
];

// PLC stop request; PI service name "P_PROGRAM" at the tail.
const STOP_TEMPLATE: [u8; 33] = [
    0x03, 0x00, 0x00, 0x21, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x0E, 0x00, 0x00, 0x10,
    0x00, 0x00, 0x29, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09, 0x50, 0x5F, 0x50, 0x52, 0x4F, 0x47,
    0x52, 0x41, 0x4D,
];

// PLC hot start request.
const HOT_START_TEMPLATE: [u8; 37] = [
    0x03, 0x00, 0x00, 0x25, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x0C, 0x00, 0x00, 0x14,
    0x00, 0x00, 0x28, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFD, 0x00, 0x00, 0x09, 0x50, 0x5F,
    0x50, 0x52, 0x4F, 0x47, 0x52, 0x41, 0x4D,
];

// PLC cold start request; argument "C " before the service name.
const COLD_START_TEMPLATE: [u8; 39] = [
    0x03, 0x00, 0x00, 0x27, 0x02, 0xF0, 0x80, 0x32, 0x01, 0x00, 0x00, 0x0F, 0x00, 0x00, 0x16,
    0x00, 0x00, 0x28, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFD, 0x00, 0x02, 0x43, 0x20, 0x09,
    0x50, 0x5F, 0x50, 0x52, 0x4F, 0x47, 0x52, 0x41, 0x4D,
];

// CPU status request (SZL ID 0x0424); fixed.
const GET_STATUS_TEMPLATE: [u8; 33] = [
    0x03, 0x00, 0x00, 0x21, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x2C, 0x00, 0x00, 0x08,
    0x00, 0x08, 0x00, 0x01, 0x12, 0x04, 0x11, 0x44, 0x01, 0x00, 0xFF, 0x09, 0x00, 0x04, 0x04,
    0x24, 0x00, 0x00,
];

// Session password set request; obfuscated password at bytes 29-36.
const SET_PASSWORD_TEMPLATE: [u8; 37] = [
    0x03, 0x00, 0x00, 0x25, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x27, 0x00, 0x00, 0x08,
    0x00, 0x0C, 0x00, 0x01, 0x12, 0x04, 0x11, 0x45, 0x01, 0x00, 0xFF, 0x09, 0x00, 0x08, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

// Session password clear request; fixed.
const CLEAR_PASSWORD_TEMPLATE: [u8; 29] = [
    0x03, 0x00, 0x00, 0x1D, 0x02, 0xF0, 0x80, 0x32, 0x07, 0x00, 0x00, 0x29, 0x00, 0x00, 0x08,
    0x00, 0x04, 0x00, 0x01, 0x12, 0x04, 0x11, 0x45, 0x02, 0x00, 0x0A, 0x00, 0x00, 0x00,
];

/// Telegram negotiating the maximum PDU length with the CPU.
///
/// Sent once per session, right after the ISO connect confirm. The CPU
/// answers with the length it grants, which bounds every later transfer
/// chunk.
#[derive(Debug, Clone, Copy)]
pub struct NegotiatePduRequest {
    requested_length: u16,
}

impl NegotiatePduRequest {
    /// Creates a negotiation request for the given PDU length.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::NegotiatePduRequest;
    ///
    /// let bytes = NegotiatePduRequest::new(480).to_bytes();
    /// assert_eq!(bytes[23], 0x01);
    /// assert_eq!(bytes[24], 0xE0);
    /// ```
    pub fn new(requested_length: u16) -> Self {
        Self { requested_length }
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 25] {
        let mut bytes = PDU_NEGOTIATION_TEMPLATE;
        codec::set_word_at(&mut bytes, 23, self.requested_length);
        bytes
    }
}

/// Telegram reading a run of elements from one memory area.
///
/// Covers a single chunk; [`Client::read_area`](crate::Client::read_area)
/// splits larger requests so each chunk fits the negotiated PDU.
///
/// # Patched Offsets
///
/// | Offset | Field |
/// |--------|-------|
/// | 22 | Word-length selector (0x02 byte, 0x1C counter, 0x1D timer) |
/// | 23-24 | Element count |
/// | 25-26 | DB number (DB area only) |
/// | 27 | Area code |
/// | 28-30 | Packed start address, big-endian |
#[derive(Debug, Clone, Copy)]
pub struct ReadAreaRequest {
    area: Area,
    db_number: u16,
    start: u32,
    count: u16,
}

impl ReadAreaRequest {
    /// Creates a read request.
    ///
    /// # Arguments
    ///
    /// * `area` - Memory area to read from
    /// * `db_number` - Data block number (ignored unless `area` is DB)
    /// * `start` - First element to read
    /// * `count` - Number of elements to read
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidParams`] if `count` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::{Area, ReadAreaRequest};
    ///
    /// let request = ReadAreaRequest::new(Area::MK, 0, 20, 4).unwrap();
    /// let bytes = request.to_bytes();
    /// assert_eq!(bytes[27], 0x83); // MK area code
    /// ```
    pub fn new(area: Area, db_number: u16, start: u32, count: u16) -> Result<Self> {
        if count == 0 {
            return Err(S7Error::invalid_params("count must be greater than 0"));
        }

        Ok(Self {
            area,
            db_number,
            start,
            count,
        })
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; READ_REQUEST_SIZE] {
        let mut bytes = [0u8; READ_REQUEST_SIZE];
        bytes.copy_from_slice(&READ_WRITE_TEMPLATE[..READ_REQUEST_SIZE]);

        bytes[22] = self.area.word_length_code();
        codec::set_word_at(&mut bytes, 23, self.count);
        if self.area.uses_db_number() {
            codec::set_word_at(&mut bytes, 25, self.db_number);
        }
        bytes[27] = self.area.code();
        set_address(&mut bytes, address_for(self.area, self.start));

        bytes
    }
}

/// Telegram writing a run of elements to one memory area.
///
/// Covers a single chunk; [`Client::write_area`](crate::Client::write_area)
/// splits larger requests so each chunk fits the negotiated PDU.
#[derive(Debug, Clone)]
pub struct WriteAreaRequest {
    area: Area,
    db_number: u16,
    start: u32,
    count: u16,
    data: Vec<u8>,
}

impl WriteAreaRequest {
    /// Creates a write request.
    ///
    /// # Arguments
    ///
    /// * `area` - Memory area to write to
    /// * `db_number` - Data block number (ignored unless `area` is DB)
    /// * `start` - First element to write
    /// * `count` - Number of elements to write
    /// * `data` - Payload; must be exactly `count` elements long
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidParams`] if `data` is empty or its length
    /// does not match `count` elements of the area's word size.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::{Area, WriteAreaRequest};
    ///
    /// let request = WriteAreaRequest::new(Area::DB, 1, 0, 2, &[0xAA, 0xBB]).unwrap();
    /// let bytes = request.to_bytes();
    /// assert_eq!(bytes.len(), 37);
    /// assert_eq!(&bytes[35..], &[0xAA, 0xBB]);
    /// ```
    pub fn new(area: Area, db_number: u16, start: u32, count: u16, data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(S7Error::invalid_params("data must not be empty"));
        }
        if data.len() != count as usize * area.word_size() {
            return Err(S7Error::invalid_params(
                "data length must equal count elements of the area word size",
            ));
        }

        Ok(Self {
            area,
            db_number,
            start,
            count,
            data: data.to_vec(),
        })
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let data_size = self.data.len();
        let mut bytes = Vec::with_capacity(WRITE_REQUEST_SIZE + data_size);
        bytes.extend_from_slice(&READ_WRITE_TEMPLATE);

        codec::set_word_at(&mut bytes, 2, (WRITE_REQUEST_SIZE + data_size) as u16);
        codec::set_word_at(&mut bytes, 15, data_size as u16 + 4);
        bytes[17] = 0x05; // Write Var function
        bytes[22] = self.area.word_length_code();
        codec::set_word_at(&mut bytes, 23, self.count);
        if self.area.uses_db_number() {
            codec::set_word_at(&mut bytes, 25, self.db_number);
        }
        bytes[27] = self.area.code();
        set_address(&mut bytes, address_for(self.area, self.start));

        // Payload length in bits for byte areas, in bytes for counters and
        // timers.
        let transport_length = if self.area.is_bit_addressed() {
            (data_size as u16) << 3
        } else {
            data_size as u16
        };
        codec::set_word_at(&mut bytes, 33, transport_length);

        bytes.extend_from_slice(&self.data);
        bytes
    }
}

/// Returns the wire address for a start element of the given area.
fn address_for(area: Area, start: u32) -> u32 {
    if area.is_bit_addressed() {
        start << 3
    } else {
        start
    }
}

/// Packs a 24-bit address into bytes 28-30 of a read/write telegram.
fn set_address(bytes: &mut [u8], address: u32) {
    bytes[28] = ((address >> 16) & 0xFF) as u8;
    bytes[29] = ((address >> 8) & 0xFF) as u8;
    bytes[30] = (address & 0xFF) as u8;
}

/// Program block types addressable through block info queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// Organization block.
    OB,
    /// Data block.
    DB,
    /// System data block.
    SDB,
    /// Function.
    FC,
    /// System function.
    SFC,
    /// Function block.
    FB,
    /// System function block.
    SFB,
}

impl BlockType {
    /// Returns the protocol code for this block type.
    pub(crate) fn code(self) -> u8 {
        match self {
            BlockType::OB => 0x38,
            BlockType::DB => 0x41,
            BlockType::SDB => 0x42,
            BlockType::FC => 0x43,
            BlockType::SFC => 0x44,
            BlockType::FB => 0x45,
            BlockType::SFB => 0x46,
        }
    }
}

/// Telegram querying the descriptor of one program block.
///
/// The block number travels as five ASCII digits, zero padded.
#[derive(Debug, Clone, Copy)]
pub struct BlockInfoRequest {
    block_type: BlockType,
    block_number: u16,
}

impl BlockInfoRequest {
    /// Creates a block info request.
    ///
    /// # Arguments
    ///
    /// * `block_type` - Kind of block to query
    /// * `block_number` - Block number (e.g. 100 for DB100)
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::{BlockInfoRequest, BlockType};
    ///
    /// let bytes = BlockInfoRequest::new(BlockType::DB, 100).to_bytes();
    /// assert_eq!(&bytes[31..36], b"00100");
    /// ```
    pub fn new(block_type: BlockType, block_number: u16) -> Self {
        Self {
            block_type,
            block_number,
        }
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 37] {
        let mut bytes = BLOCK_INFO_TEMPLATE;
        bytes[30] = self.block_type.code();

        let mut n = self.block_number;
        bytes[31] = b'0' + (n / 10000) as u8;
        n %= 10000;
        bytes[32] = b'0' + (n / 1000) as u8;
        n %= 1000;
        bytes[33] = b'0' + (n / 100) as u8;
        n %= 100;
        bytes[34] = b'0' + (n / 10) as u8;
        bytes[35] = b'0' + (n % 10) as u8;

        bytes
    }
}

/// Opening telegram of a system status list read.
#[derive(Debug, Clone, Copy)]
pub struct SzlFirstRequest {
    sequence: u16,
    id: u16,
    index: u16,
}

impl SzlFirstRequest {
    /// Creates the first telegram of an SZL read.
    ///
    /// # Arguments
    ///
    /// * `sequence` - Outgoing sequence number for this session
    /// * `id` - SZL record ID (e.g. 0x001C for CPU identification)
    /// * `index` - SZL record index
    pub fn new(sequence: u16, id: u16, index: u16) -> Self {
        Self {
            sequence,
            id,
            index,
        }
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 33] {
        let mut bytes = SZL_FIRST_TEMPLATE;
        codec::set_word_at(&mut bytes, 11, self.sequence);
        codec::set_word_at(&mut bytes, 29, self.id);
        codec::set_word_at(&mut bytes, 31, self.index);
        bytes
    }
}

/// Continuation telegram of a system status list read.
///
/// Carries the server's slice sequence back at byte 24 so the CPU knows
/// which partial record to continue.
#[derive(Debug, Clone, Copy)]
pub struct SzlNextRequest {
    sequence: u16,
    sequence_in: u8,
}

impl SzlNextRequest {
    /// Creates a continuation telegram.
    ///
    /// # Arguments
    ///
    /// * `sequence` - Outgoing sequence number for this session
    /// * `sequence_in` - Slice sequence echoed from the previous reply
    pub fn new(sequence: u16, sequence_in: u8) -> Self {
        Self {
            sequence,
            sequence_in,
        }
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 33] {
        let mut bytes = SZL_NEXT_TEMPLATE;
        codec::set_word_at(&mut bytes, 11, self.sequence);
        bytes[24] = self.sequence_in;
        bytes
    }
}

/// Telegram reading the PLC date and time.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetClockRequest;

impl GetClockRequest {
    /// Creates a clock read request.
    pub fn new() -> Self {
        Self
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 29] {
        GET_CLOCK_TEMPLATE
    }
}

/// Telegram setting the PLC date and time.
#[derive(Debug, Clone, Copy)]
pub struct SetClockRequest {
    date_time: NaiveDateTime,
}

impl SetClockRequest {
    /// Creates a clock set request.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use siemens_s7::SetClockRequest;
    ///
    /// let dt = NaiveDate::from_ymd_opt(2024, 3, 5)
    ///     .unwrap()
    ///     .and_hms_opt(10, 20, 30)
    ///     .unwrap();
    /// let bytes = SetClockRequest::new(dt).to_bytes();
    /// assert_eq!(bytes[31], 0x24); // BCD year
    /// ```
    pub fn new(date_time: NaiveDateTime) -> Self {
        Self { date_time }
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 39] {
        let mut bytes = SET_CLOCK_TEMPLATE;
        codec::set_date_time_at(&mut bytes, 31, &self.date_time);
        bytes
    }
}

/// CPU run mode changes requested through [`PlcControlRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlcControl {
    /// Stop the CPU.
    Stop,
    /// Restart without a memory reset.
    HotStart,
    /// Restart with a memory reset.
    ColdStart,
}

/// Telegram changing the CPU run mode.
#[derive(Debug, Clone, Copy)]
pub struct PlcControlRequest {
    control: PlcControl,
}

impl PlcControlRequest {
    /// Creates a run mode change request.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::{PlcControl, PlcControlRequest};
    ///
    /// let bytes = PlcControlRequest::new(PlcControl::Stop).to_bytes();
    /// assert!(bytes.ends_with(b"P_PROGRAM"));
    /// ```
    pub fn new(control: PlcControl) -> Self {
        Self { control }
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self.control {
            PlcControl::Stop => STOP_TEMPLATE.to_vec(),
            PlcControl::HotStart => HOT_START_TEMPLATE.to_vec(),
            PlcControl::ColdStart => COLD_START_TEMPLATE.to_vec(),
        }
    }
}

/// Telegram querying the CPU run/stop state.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetStatusRequest;

impl GetStatusRequest {
    /// Creates a status request.
    pub fn new() -> Self {
        Self
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 33] {
        GET_STATUS_TEMPLATE
    }
}

/// CPU operating state reported by [`Client::get_plc_status`](crate::Client::get_plc_status).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlcStatus {
    /// State could not be determined.
    Unknown,
    /// CPU is running.
    Run,
    /// CPU is stopped.
    Stop,
}

impl PlcStatus {
    /// Maps a wire status byte to a status.
    ///
    /// Run is 0x08 on every CPU and CP; some older CPUs report stop as 0x03
    /// instead of 0x04, so every unrecognized code maps to [`PlcStatus::Stop`].
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => PlcStatus::Unknown,
            0x08 => PlcStatus::Run,
            _ => PlcStatus::Stop,
        }
    }

    /// Returns the canonical wire code for this status.
    pub fn code(self) -> u8 {
        match self {
            PlcStatus::Unknown => 0x00,
            PlcStatus::Run => 0x08,
            PlcStatus::Stop => 0x04,
        }
    }
}

impl std::fmt::Display for PlcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlcStatus::Unknown => write!(f, "unknown"),
            PlcStatus::Run => write!(f, "run"),
            PlcStatus::Stop => write!(f, "stop"),
        }
    }
}

/// Telegram protecting the session with a password.
///
/// The password travels obfuscated with the fixed XOR chain every S7 tool
/// uses; this is not a security mechanism.
#[derive(Debug, Clone, Copy)]
pub struct SetPasswordRequest {
    password: [u8; 8],
}

impl SetPasswordRequest {
    /// Creates a password set request.
    ///
    /// The password is truncated or space padded to exactly 8 characters.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidParams`] if the password contains
    /// non-ASCII characters, since those cannot be encoded into the 8 wire
    /// bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::SetPasswordRequest;
    ///
    /// let bytes = SetPasswordRequest::new("abcdefgh").unwrap().to_bytes();
    /// assert_eq!(bytes[29], 0x34);
    /// ```
    pub fn new(password: &str) -> Result<Self> {
        if !password.is_ascii() {
            return Err(S7Error::invalid_params("password must be ASCII"));
        }

        let mut padded = [b' '; 8];
        for (slot, byte) in padded.iter_mut().zip(password.bytes()) {
            *slot = byte;
        }

        Ok(Self { password: padded })
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 37] {
        let mut bytes = SET_PASSWORD_TEMPLATE;
        bytes[29..37].copy_from_slice(&scramble(self.password));
        bytes
    }
}

/// Telegram clearing the session password.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearPasswordRequest;

impl ClearPasswordRequest {
    /// Creates a password clear request.
    pub fn new() -> Self {
        Self
    }

    /// Serializes the telegram to bytes.
    pub fn to_bytes(&self) -> [u8; 29] {
        CLEAR_PASSWORD_TEMPLATE
    }
}

/// Obfuscates a padded password the way S7 engineering tools do.
fn scramble(mut pwd: [u8; 8]) -> [u8; 8] {
    pwd[0] ^= 0x55;
    pwd[1] ^= 0x55;
    for i in 2..8 {
        pwd[i] ^= 0x55 ^ pwd[i - 2];
    }
    pwd
}
