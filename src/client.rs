//! High-level S7 client for communicating with Siemens PLCs.
//!
//! This module provides the [`Client`] struct, which is the primary interface
//! for talking to S7-300/400 family CPUs over ISO-on-TCP.
//!
//! # Overview
//!
//! The client owns one TCP session and drives it strictly request by reply:
//! - Three-stage session setup (TCP, ISO connection, PDU negotiation)
//! - Transparent chunking of area reads and writes to the negotiated PDU size
//! - SZL continuation handling across multiple reply telegrams
//! - Clock, run-state, block info and password services
//!
//! # Example
//!
//! ```no_run
//! use siemens_s7::{Area, Client, ClientConfig};
//! use std::net::Ipv4Addr;
//!
//! let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
//! let mut client = Client::connect_to(config)?;
//!
//! // Read the first 16 bytes of DB 1
//! let data = client.read_area(Area::DB, 1, 0, 16)?;
//!
//! // Write them back
//! client.write_area(Area::DB, 1, 0, &data)?;
//!
//! // CPU state and clock
//! let status = client.get_plc_status()?;
//! let clock = client.get_plc_date_time()?;
//! println!("CPU is {status}, clock reads {clock}");
//! # Ok::<(), siemens_s7::S7Error>(())
//! ```
//!
//! # Configuration
//!
//! The [`ClientConfig`] struct allows customization of:
//! - PLC IP address and port
//! - Rack and slot, or raw TSAP values for CPs and other gateways
//! - Connection type (PG, OP or basic S7 communication)
//! - Receive timeout and requested PDU size
//!
//! # Connection lifecycle
//!
//! Operations borrow the client mutably; one telegram is in flight at any
//! time. When a send fails on an established session the client reconnects
//! once and retries that send, so a PLC power cycle between polls does not
//! force the caller to rebuild the client. Dropping the client closes the
//! session.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use chrono::NaiveDateTime;

use crate::area::Area;
use crate::error::{Result, S7Error};
use crate::frame::{
    CotpHeader, IsoConnectionRequest, TpktHeader, DEFAULT_PDU_SIZE_REQUESTED, ISO_HEADER_SIZE,
    MAX_TELEGRAM_SIZE, MIN_TELEGRAM_SIZE, TPKT_HEADER_SIZE,
};
use crate::info::{BlockInfo, CpInfo, CpuInfo, OrderCode, Protection, Szl};
use crate::response::Reply;
use crate::telegram::{
    BlockInfoRequest, BlockType, ClearPasswordRequest, GetClockRequest, GetStatusRequest,
    NegotiatePduRequest, PlcControl, PlcControlRequest, PlcStatus, ReadAreaRequest,
    SetClockRequest, SetPasswordRequest, SzlFirstRequest, SzlNextRequest, WriteAreaRequest,
};
use crate::transport::{TcpTransport, DEFAULT_ISO_PORT, DEFAULT_TIMEOUT};

/// Size of the scratch buffer replies are received into.
const PDU_BUFFER_SIZE: usize = 2048;

/// Overhead of an area read reply, header bytes before the payload.
const READ_REPLY_OVERHEAD: usize = 18;

/// Overhead of an area write request, header bytes before the payload.
const WRITE_REQUEST_OVERHEAD: usize = 35;

/// Connection resource the client registers on the CPU.
///
/// The type is encoded in the high byte of the remote TSAP and decides which
/// kind of connection resource the CPU allocates for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    /// Programming device connection (the default).
    PG,
    /// Operator panel connection.
    OP,
    /// Basic S7 communication.
    Basic,
}

impl ConnectionType {
    /// Returns the TSAP high-byte code of the connection type.
    pub(crate) fn code(self) -> u16 {
        match self {
            ConnectionType::PG => 0x01,
            ConnectionType::OP => 0x02,
            ConnectionType::Basic => 0x03,
        }
    }
}

/// Configuration for creating an S7 client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// PLC IP address and port.
    pub plc_addr: SocketAddr,
    /// Rack number of the CPU.
    pub rack: u16,
    /// Slot number of the CPU.
    pub slot: u16,
    /// Connection resource to register on the CPU.
    pub connection_type: ConnectionType,
    /// Local TSAP sent in the ISO connection request.
    pub local_tsap: u16,
    /// Raw remote TSAP override. When unset the remote TSAP is derived from
    /// the connection type, rack and slot.
    pub remote_tsap: Option<u16>,
    /// PDU size proposed during negotiation.
    pub pdu_size_requested: u16,
    /// Receive timeout for each reply telegram.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a new client configuration with minimal required parameters.
    ///
    /// Uses the standard ISO-on-TCP port 102, a PG connection and the
    /// default timeout.
    ///
    /// # Arguments
    ///
    /// * `plc_ip` - PLC IP address
    /// * `rack` - Rack number of the CPU (0 for most S7-300)
    /// * `slot` - Slot number of the CPU (2 for most S7-300)
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::ClientConfig;
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// ```
    pub fn new(plc_ip: Ipv4Addr, rack: u16, slot: u16) -> Self {
        Self {
            plc_addr: SocketAddr::from((plc_ip, DEFAULT_ISO_PORT)),
            rack,
            slot,
            connection_type: ConnectionType::PG,
            local_tsap: 0x0100,
            remote_tsap: None,
            pdu_size_requested: DEFAULT_PDU_SIZE_REQUESTED,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom PLC port (default is 102).
    pub fn with_port(mut self, port: u16) -> Self {
        self.plc_addr.set_port(port);
        self
    }

    /// Sets a custom receive timeout (default is 5 seconds).
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::ClientConfig;
    /// use std::net::Ipv4Addr;
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2)
    ///     .with_timeout(Duration::from_secs(2));
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection resource to register on the CPU (default is PG).
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::{ClientConfig, ConnectionType};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2)
    ///     .with_connection_type(ConnectionType::OP);
    /// ```
    pub fn with_connection_type(mut self, connection_type: ConnectionType) -> Self {
        self.connection_type = connection_type;
        self
    }

    /// Sets raw TSAP values, bypassing the rack and slot derivation.
    ///
    /// Needed for CPs, WinAC and other targets that expect configured TSAPs
    /// instead of the CPU addressing scheme.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::ClientConfig;
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 0)
    ///     .with_tsap(0x1000, 0x2700);
    /// ```
    pub fn with_tsap(mut self, local_tsap: u16, remote_tsap: u16) -> Self {
        self.local_tsap = local_tsap;
        self.remote_tsap = Some(remote_tsap);
        self
    }

    /// Sets the PDU size proposed during negotiation (default is 480).
    ///
    /// The CPU may grant less; the negotiated value is what the client
    /// chunks transfers to.
    pub fn with_pdu_size_requested(mut self, pdu_size: u16) -> Self {
        self.pdu_size_requested = pdu_size;
        self
    }

    /// Returns the remote TSAP the session will request.
    ///
    /// The derived form packs the connection type into the high byte and
    /// `rack * 0x20 + slot` into the low byte.
    pub fn remote_tsap(&self) -> u16 {
        match self.remote_tsap {
            Some(tsap) => tsap,
            None => {
                let tsap = (u32::from(self.connection_type.code()) << 8)
                    + u32::from(self.rack) * 0x20
                    + u32::from(self.slot);
                tsap as u16
            }
        }
    }
}

/// S7 client for communicating with Siemens PLCs.
///
/// One client owns one session. Operations are strictly sequential; each
/// sends one request telegram and waits for its reply before returning.
///
/// # Example
///
/// ```no_run
/// use siemens_s7::{Area, Client, ClientConfig};
/// use std::net::Ipv4Addr;
///
/// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
/// let mut client = Client::new(config);
/// client.connect().unwrap();
///
/// // Read merker bytes MB0..MB7
/// let flags = client.read_merkers(0, 8).unwrap();
///
/// // Set MB0 to 0xFF
/// client.write_merkers(0, &[0xFF]).unwrap();
/// ```
pub struct Client {
    config: ClientConfig,
    transport: Option<TcpTransport>,
    pdu_length: u16,
    pdu: [u8; PDU_BUFFER_SIZE],
}

impl Client {
    /// Creates a new client. No connection is made until [`Client::connect`]
    /// is called.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            pdu_length: 0,
            pdu: [0u8; PDU_BUFFER_SIZE],
        }
    }

    /// Creates a client and connects it in one step.
    ///
    /// # Errors
    ///
    /// Returns an error when any of the three session stages fails; see
    /// [`Client::connect`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{Client, ClientConfig};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let client = Client::connect_to(config).unwrap();
    /// assert!(client.is_connected());
    /// ```
    pub fn connect_to(config: ClientConfig) -> Result<Self> {
        let mut client = Client::new(config);
        client.connect()?;
        Ok(client)
    }

    /// Establishes the session: TCP connection, ISO connection request and
    /// PDU length negotiation.
    ///
    /// Calling this on an already connected client does nothing. On failure
    /// the client is left disconnected with a zero PDU length.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::TcpConnectionFailed`] when the TCP stage fails,
    /// [`S7Error::IsoConnectionFailed`] or [`S7Error::IsoInvalidPdu`] when
    /// the CPU rejects the ISO connection, and
    /// [`S7Error::IsoNegotiatingPdu`] when negotiation fails.
    pub fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Ok(());
        }
        log::debug!("connecting to {}", self.config.plc_addr);
        let mut transport = TcpTransport::connect(self.config.plc_addr, self.config.timeout)?;

        let request = IsoConnectionRequest::new(self.config.local_tsap, self.config.remote_tsap());
        transport.send(&request.to_bytes())?;
        let length = recv_telegram(&mut transport, &mut self.pdu)?;
        Reply::new(&self.pdu[..length]).iso_connect_ack()?;
        log::debug!(
            "ISO connection established, remote TSAP 0x{:04X}",
            self.config.remote_tsap()
        );

        let request = NegotiatePduRequest::new(self.config.pdu_size_requested);
        transport.send(&request.to_bytes())?;
        let length = recv_telegram(&mut transport, &mut self.pdu)?;
        let granted = Reply::new(&self.pdu[..length]).negotiated_pdu_length()?;
        log::debug!("negotiated PDU length {granted}");

        self.pdu_length = granted;
        self.transport = Some(transport);
        Ok(())
    }

    /// Closes the session.
    ///
    /// Safe to call on a disconnected client.
    pub fn disconnect(&mut self) {
        if self.transport.take().is_some() {
            log::debug!("disconnected from {}", self.config.plc_addr);
        }
        self.pdu_length = 0;
    }

    /// Returns `true` while the session is established.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Returns the negotiated PDU length, or 0 before negotiation.
    pub fn pdu_length(&self) -> u16 {
        self.pdu_length
    }

    /// Returns the configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn not_connected() -> S7Error {
        S7Error::TcpConnectionFailed {
            source: io::ErrorKind::NotConnected.into(),
        }
    }

    /// Sends a request telegram, reconnecting and retrying once when the
    /// session broke underneath us.
    fn send_telegram(&mut self, data: &[u8]) -> Result<()> {
        let transport = self.transport.as_mut().ok_or_else(Self::not_connected)?;
        let first = match transport.send(data) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        log::warn!(
            "send to {} failed ({first}), trying to recover the session",
            self.config.plc_addr
        );
        self.disconnect();
        if self.connect().is_err() {
            return Err(first);
        }
        match self.transport.as_mut() {
            Some(transport) => transport.send(data),
            None => Err(first),
        }
    }

    /// Receives one reply telegram into the scratch buffer and returns its
    /// total length.
    fn recv_reply(&mut self) -> Result<usize> {
        let transport = self.transport.as_mut().ok_or_else(Self::not_connected)?;
        recv_telegram(transport, &mut self.pdu)
    }

    /// Reads bytes from a PLC memory area.
    ///
    /// Requests larger than the negotiated PDU size are split into as many
    /// telegrams as needed; the result is the concatenated payload.
    ///
    /// # Arguments
    ///
    /// * `area` - Memory area to read from
    /// * `db_number` - DB number, ignored for areas other than [`Area::DB`]
    /// * `start` - Starting byte offset (element index for timers/counters)
    /// * `amount` - Number of elements to read (bytes, or timers/counters)
    ///
    /// # Errors
    ///
    /// Returns an error if the client is disconnected, communication fails
    /// or the CPU refuses the transfer.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{Area, Client, ClientConfig};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let mut client = Client::connect_to(config).unwrap();
    ///
    /// let data = client.read_area(Area::DB, 1, 0, 64).unwrap();
    /// assert_eq!(data.len(), 64);
    /// ```
    pub fn read_area(
        &mut self,
        area: Area,
        db_number: u16,
        start: u32,
        amount: u16,
    ) -> Result<Vec<u8>> {
        if amount == 0 {
            return Ok(Vec::new());
        }
        let word_size = area.word_size();
        let max_elements =
            usize::from(self.pdu_length).saturating_sub(READ_REPLY_OVERHEAD) / word_size;
        if max_elements == 0 {
            return Err(Self::not_connected());
        }

        let mut data = Vec::with_capacity(usize::from(amount) * word_size);
        let mut remaining = usize::from(amount);
        let mut start = start;
        while remaining > 0 {
            let elements = remaining.min(max_elements);
            let size_requested = elements * word_size;
            log::trace!("read {area} {elements} elements at {start}");

            let request = ReadAreaRequest::new(area, db_number, start, elements as u16)?;
            self.send_telegram(&request.to_bytes())?;
            let length = self.recv_reply()?;
            let payload = Reply::new(&self.pdu[..length]).read_payload(size_requested)?;
            data.extend_from_slice(payload);

            remaining -= elements;
            start += (elements * word_size) as u32;
        }
        Ok(data)
    }

    /// Writes bytes to a PLC memory area.
    ///
    /// Transfers larger than the negotiated PDU size are split into as many
    /// telegrams as needed.
    ///
    /// # Arguments
    ///
    /// * `area` - Memory area to write to
    /// * `db_number` - DB number, ignored for areas other than [`Area::DB`]
    /// * `start` - Starting byte offset (element index for timers/counters)
    /// * `data` - Bytes to write; for timers and counters the length must be
    ///   a multiple of 2
    ///
    /// # Errors
    ///
    /// Returns an error if the client is disconnected, the data length does
    /// not form whole elements, communication fails or the CPU refuses the
    /// transfer.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{Area, Client, ClientConfig};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let mut client = Client::connect_to(config).unwrap();
    ///
    /// client.write_area(Area::DB, 1, 10, &[0xAB, 0xCD]).unwrap();
    /// ```
    pub fn write_area(
        &mut self,
        area: Area,
        db_number: u16,
        start: u32,
        data: &[u8],
    ) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let word_size = area.word_size();
        if data.len() % word_size != 0 {
            return Err(S7Error::invalid_params(
                "data length must be a multiple of the element size",
            ));
        }
        let max_elements =
            usize::from(self.pdu_length).saturating_sub(WRITE_REQUEST_OVERHEAD) / word_size;
        if max_elements == 0 {
            return Err(Self::not_connected());
        }

        let mut remaining = data.len() / word_size;
        let mut offset = 0usize;
        let mut start = start;
        while remaining > 0 {
            let elements = remaining.min(max_elements);
            let size = elements * word_size;
            log::trace!("write {area} {elements} elements at {start}");

            let request = WriteAreaRequest::new(
                area,
                db_number,
                start,
                elements as u16,
                &data[offset..offset + size],
            )?;
            self.send_telegram(&request.to_bytes())?;
            let length = self.recv_reply()?;
            Reply::new(&self.pdu[..length]).write_ack()?;

            remaining -= elements;
            offset += size;
            start += size as u32;
        }
        Ok(())
    }

    /// Reads bytes from a data block.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{Client, ClientConfig};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let mut client = Client::connect_to(config).unwrap();
    ///
    /// let data = client.read_db(1, 0, 32).unwrap();
    /// ```
    pub fn read_db(&mut self, db_number: u16, start: u32, size: u16) -> Result<Vec<u8>> {
        self.read_area(Area::DB, db_number, start, size)
    }

    /// Writes bytes to a data block.
    pub fn write_db(&mut self, db_number: u16, start: u32, data: &[u8]) -> Result<()> {
        self.write_area(Area::DB, db_number, start, data)
    }

    /// Reads bytes from the process input image.
    pub fn read_inputs(&mut self, start: u32, size: u16) -> Result<Vec<u8>> {
        self.read_area(Area::PE, 0, start, size)
    }

    /// Writes bytes to the process input image.
    pub fn write_inputs(&mut self, start: u32, data: &[u8]) -> Result<()> {
        self.write_area(Area::PE, 0, start, data)
    }

    /// Reads bytes from the process output image.
    pub fn read_outputs(&mut self, start: u32, size: u16) -> Result<Vec<u8>> {
        self.read_area(Area::PA, 0, start, size)
    }

    /// Writes bytes to the process output image.
    pub fn write_outputs(&mut self, start: u32, data: &[u8]) -> Result<()> {
        self.write_area(Area::PA, 0, start, data)
    }

    /// Reads merker (flag memory) bytes.
    pub fn read_merkers(&mut self, start: u32, size: u16) -> Result<Vec<u8>> {
        self.read_area(Area::MK, 0, start, size)
    }

    /// Writes merker (flag memory) bytes.
    pub fn write_merkers(&mut self, start: u32, data: &[u8]) -> Result<()> {
        self.write_area(Area::MK, 0, start, data)
    }

    /// Reads timer values, two bytes per timer.
    pub fn read_timers(&mut self, start: u32, amount: u16) -> Result<Vec<u8>> {
        self.read_area(Area::TM, 0, start, amount)
    }

    /// Writes timer values, two bytes per timer.
    pub fn write_timers(&mut self, start: u32, data: &[u8]) -> Result<()> {
        self.write_area(Area::TM, 0, start, data)
    }

    /// Reads counter values, two bytes per counter.
    pub fn read_counters(&mut self, start: u32, amount: u16) -> Result<Vec<u8>> {
        self.read_area(Area::CT, 0, start, amount)
    }

    /// Writes counter values, two bytes per counter.
    pub fn write_counters(&mut self, start: u32, data: &[u8]) -> Result<()> {
        self.write_area(Area::CT, 0, start, data)
    }

    /// Reads a whole data block into the caller's buffer.
    ///
    /// Queries the block size first, then transfers exactly that many bytes.
    ///
    /// # Arguments
    ///
    /// * `db_number` - DB number to fetch
    /// * `buffer` - Destination; must hold the whole block
    ///
    /// # Returns
    ///
    /// The number of bytes placed in `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7BufferTooSmall`] when the block does not fit,
    /// plus any block info or read error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{Client, ClientConfig};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let mut client = Client::connect_to(config).unwrap();
    ///
    /// let mut buffer = [0u8; 4096];
    /// let size = client.db_get(1, &mut buffer).unwrap();
    /// println!("DB 1 holds {size} bytes");
    /// ```
    pub fn db_get(&mut self, db_number: u16, buffer: &mut [u8]) -> Result<usize> {
        let info = self.get_block_info(BlockType::DB, db_number)?;
        let size = usize::from(info.mc7_size);
        if size > buffer.len() {
            return Err(S7Error::buffer_too_small(size, buffer.len()));
        }
        let data = self.read_area(Area::DB, db_number, 0, info.mc7_size)?;
        buffer[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }

    /// Reads a partial list (SZL) from the CPU.
    ///
    /// Lists larger than one PDU arrive as a sequence of telegrams; the
    /// client requests each continuation, echoing the sequence number of the
    /// previous reply, and returns the assembled list.
    ///
    /// # Arguments
    ///
    /// * `id` - SZL ID, for example `0x0011` for the module identification
    /// * `index` - SZL index, 0 unless the list defines sub-lists
    ///
    /// # Errors
    ///
    /// Returns an error if the client is disconnected, communication fails
    /// or the CPU refuses the query.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{Client, ClientConfig};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let mut client = Client::connect_to(config).unwrap();
    ///
    /// let szl = client.read_szl(0x0011, 0x0000).unwrap();
    /// for record in szl.records() {
    ///     println!("{record:02X?}");
    /// }
    /// ```
    pub fn read_szl(&mut self, id: u16, index: u16) -> Result<Szl> {
        let mut sequence: u16 = 1;
        let request = SzlFirstRequest::new(sequence, id, index);
        self.send_telegram(&request.to_bytes())?;
        let length = self.recv_reply()?;
        let first = Reply::new(&self.pdu[..length]).szl_first_slice()?;

        let mut szl = Szl {
            record_length: first.record_length,
            record_count: first.record_count,
            data: first.data.to_vec(),
        };
        let mut done = first.done;
        let mut sequence_in = first.sequence;
        while !done {
            sequence += 1;
            log::trace!("SZL 0x{id:04X} continuation {sequence}");
            let request = SzlNextRequest::new(sequence, sequence_in);
            self.send_telegram(&request.to_bytes())?;
            let length = self.recv_reply()?;
            let next = Reply::new(&self.pdu[..length]).szl_next_slice()?;
            szl.data.extend_from_slice(next.data);
            done = next.done;
            sequence_in = next.sequence;
        }
        Ok(szl)
    }

    /// Queries the metadata of a logic block.
    ///
    /// # Arguments
    ///
    /// * `block_type` - Kind of block to query
    /// * `block_number` - Block number, 0 to 65535
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7FunctionError`] when the block does not exist,
    /// plus any communication error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{BlockType, Client, ClientConfig};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let mut client = Client::connect_to(config).unwrap();
    ///
    /// let info = client.get_block_info(BlockType::DB, 1).unwrap();
    /// println!("DB 1 holds {} bytes", info.mc7_size);
    /// ```
    pub fn get_block_info(
        &mut self,
        block_type: BlockType,
        block_number: u16,
    ) -> Result<BlockInfo> {
        let request = BlockInfoRequest::new(block_type, block_number);
        self.send_telegram(&request.to_bytes())?;
        let length = self.recv_reply()?;
        let descriptor = Reply::new(&self.pdu[..length]).block_descriptor()?;
        BlockInfo::from_descriptor(descriptor)
    }

    /// Queries module and plant identity (SZL `0x001C`).
    pub fn get_cpu_info(&mut self) -> Result<CpuInfo> {
        let szl = self.read_szl(0x001C, 0x0000)?;
        CpuInfo::from_record_data(&szl.data)
    }

    /// Queries communication capabilities (SZL `0x0131` index 1).
    pub fn get_cp_info(&mut self) -> Result<CpInfo> {
        let szl = self.read_szl(0x0131, 0x0001)?;
        CpInfo::from_record_data(&szl.data)
    }

    /// Queries the order code and firmware version (SZL `0x0011`).
    pub fn get_order_code(&mut self) -> Result<OrderCode> {
        let szl = self.read_szl(0x0011, 0x0000)?;
        OrderCode::from_record_data(&szl.data)
    }

    /// Queries the protection levels (SZL `0x0232` index 4).
    pub fn get_protection(&mut self) -> Result<Protection> {
        let szl = self.read_szl(0x0232, 0x0004)?;
        Protection::from_record_data(&szl.data)
    }

    /// Reads the CPU clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the client is disconnected, communication fails
    /// or the CPU refuses the query.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{Client, ClientConfig};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let mut client = Client::connect_to(config).unwrap();
    ///
    /// let clock = client.get_plc_date_time().unwrap();
    /// println!("CPU clock reads {clock}");
    /// ```
    pub fn get_plc_date_time(&mut self) -> Result<NaiveDateTime> {
        let request = GetClockRequest::new();
        self.send_telegram(&request.to_bytes())?;
        let length = self.recv_reply()?;
        Reply::new(&self.pdu[..length]).plc_date_time()
    }

    /// Sets the CPU clock.
    pub fn set_plc_date_time(&mut self, date_time: NaiveDateTime) -> Result<()> {
        let request = SetClockRequest::new(date_time);
        self.send_telegram(&request.to_bytes())?;
        let length = self.recv_reply()?;
        Reply::new(&self.pdu[..length]).clock_set_ack()
    }

    /// Sets the CPU clock to the host's local time.
    pub fn set_plc_system_date_time(&mut self) -> Result<()> {
        self.set_plc_date_time(chrono::Local::now().naive_local())
    }

    /// Puts the CPU in STOP mode.
    ///
    /// The CPU acknowledges the order before executing it; a successful
    /// return means the order was accepted, not that the transition has
    /// completed.
    pub fn plc_stop(&mut self) -> Result<()> {
        self.plc_control(PlcControl::Stop)
    }

    /// Puts the CPU in RUN mode without a memory reset.
    pub fn plc_hot_start(&mut self) -> Result<()> {
        self.plc_control(PlcControl::HotStart)
    }

    /// Puts the CPU in RUN mode with a memory reset.
    pub fn plc_cold_start(&mut self) -> Result<()> {
        self.plc_control(PlcControl::ColdStart)
    }

    fn plc_control(&mut self, control: PlcControl) -> Result<()> {
        log::debug!("PLC control order {control:?}");
        let request = PlcControlRequest::new(control);
        self.send_telegram(&request.to_bytes())?;
        let length = self.recv_reply()?;
        Reply::new(&self.pdu[..length]).control_ack()
    }

    /// Queries the CPU run state.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::{Client, ClientConfig, PlcStatus};
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
    /// let mut client = Client::connect_to(config).unwrap();
    ///
    /// if client.get_plc_status().unwrap() == PlcStatus::Run {
    ///     println!("CPU is running");
    /// }
    /// ```
    pub fn get_plc_status(&mut self) -> Result<PlcStatus> {
        let request = GetStatusRequest::new();
        self.send_telegram(&request.to_bytes())?;
        let length = self.recv_reply()?;
        Reply::new(&self.pdu[..length]).plc_status()
    }

    /// Logs on to the CPU with a session password.
    ///
    /// The password is at most 8 ASCII characters; shorter passwords are
    /// space padded like the programming tools do.
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::S7InvalidParams`] for non-ASCII passwords and
    /// [`S7Error::S7FunctionError`] when the CPU rejects the password.
    pub fn set_session_password(&mut self, password: &str) -> Result<()> {
        let request = SetPasswordRequest::new(password)?;
        self.send_telegram(&request.to_bytes())?;
        let length = self.recv_reply()?;
        Reply::new(&self.pdu[..length]).password_set_ack()
    }

    /// Logs off the session password.
    pub fn clear_session_password(&mut self) -> Result<()> {
        let request = ClearPasswordRequest::new();
        self.send_telegram(&request.to_bytes())?;
        let length = self.recv_reply()?;
        Reply::new(&self.pdu[..length]).password_clear_ack()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("plc_addr", &self.config.plc_addr)
            .field("connected", &self.is_connected())
            .field("pdu_length", &self.pdu_length)
            .finish()
    }
}

/// Receives one telegram into the scratch buffer, skipping keepalives.
///
/// The TPKT length word is validated against the accepted telegram window
/// before the remainder is read.
fn recv_telegram(transport: &mut TcpTransport, pdu: &mut [u8]) -> Result<usize> {
    loop {
        let mut header = [0u8; TPKT_HEADER_SIZE];
        transport.recv_exact(&mut header)?;
        pdu[..TPKT_HEADER_SIZE].copy_from_slice(&header);

        let tpkt = TpktHeader::from_bytes(header);
        let length = usize::from(tpkt.length);
        if tpkt.is_keepalive() {
            // Bare TPKT+COTP telegram, consume it and wait for the reply
            transport.recv_exact(&mut pdu[TPKT_HEADER_SIZE..ISO_HEADER_SIZE])?;
            continue;
        }
        if !(MIN_TELEGRAM_SIZE..=MAX_TELEGRAM_SIZE).contains(&length) {
            return Err(S7Error::iso_invalid_pdu(length));
        }

        transport.recv_exact(&mut pdu[TPKT_HEADER_SIZE..ISO_HEADER_SIZE])?;
        let cotp = CotpHeader::from_bytes([pdu[4], pdu[5], pdu[6]]);
        transport.recv_exact(&mut pdu[ISO_HEADER_SIZE..length])?;
        log::trace!(
            "received {length} byte telegram, COTP type 0x{:02X}",
            cotp.pdu_type
        );
        return Ok(length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{get_word_at, set_word_at};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Spawns a scripted PLC: accepts one connection, then answers each
    /// incoming telegram with the next reply from the script. Received
    /// request telegrams are forwarded on the channel.
    fn spawn_plc(
        replies: Vec<Vec<u8>>,
    ) -> (SocketAddr, mpsc::Receiver<Vec<u8>>, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            for reply in replies {
                let mut header = [0u8; 4];
                stream.read_exact(&mut header).unwrap();
                let total = usize::from(u16::from_be_bytes([header[2], header[3]]));
                let mut telegram = header.to_vec();
                telegram.resize(total, 0);
                stream.read_exact(&mut telegram[4..]).unwrap();
                tx.send(telegram).unwrap();
                stream.write_all(&reply).unwrap();
            }
            // Hold the socket open until the client is done
            thread::sleep(Duration::from_millis(50));
        });
        (addr, rx, handle)
    }

    /// Builds a reply telegram skeleton with TPKT and COTP data headers.
    fn reply(len: usize) -> Vec<u8> {
        let mut telegram = vec![0u8; len];
        telegram[0] = 0x03;
        set_word_at(&mut telegram, 2, len as u16);
        telegram[4] = 0x02;
        telegram[5] = 0xF0;
        telegram[6] = 0x80;
        telegram
    }

    fn iso_confirm() -> Vec<u8> {
        let mut telegram = reply(22);
        telegram[4] = 0x11;
        telegram[5] = 0xD0;
        telegram[6] = 0x00;
        telegram
    }

    fn negotiate_reply(granted: u16) -> Vec<u8> {
        let mut telegram = reply(27);
        set_word_at(&mut telegram, 25, granted);
        telegram
    }

    fn read_reply(payload: &[u8]) -> Vec<u8> {
        let mut telegram = reply(25 + payload.len());
        telegram[21] = 0xFF;
        telegram[25..].copy_from_slice(payload);
        telegram
    }

    fn write_reply() -> Vec<u8> {
        let mut telegram = reply(22);
        telegram[21] = 0xFF;
        telegram
    }

    fn test_config(addr: SocketAddr) -> ClientConfig {
        ClientConfig::new(Ipv4Addr::LOCALHOST, 0, 2)
            .with_port(addr.port())
            .with_timeout(Duration::from_secs(2))
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
        assert_eq!(config.plc_addr.port(), DEFAULT_ISO_PORT);
        assert_eq!(config.connection_type, ConnectionType::PG);
        assert_eq!(config.local_tsap, 0x0100);
        assert_eq!(config.pdu_size_requested, 480);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.remote_tsap(), 0x0102);
    }

    #[test]
    fn test_config_remote_tsap_derivation() {
        let config = ClientConfig::new(Ipv4Addr::LOCALHOST, 1, 3)
            .with_connection_type(ConnectionType::Basic);
        // high byte connection type, low byte rack * 0x20 + slot
        assert_eq!(config.remote_tsap(), 0x0323);

        let config = ClientConfig::new(Ipv4Addr::LOCALHOST, 0, 2)
            .with_connection_type(ConnectionType::OP);
        assert_eq!(config.remote_tsap(), 0x0202);
    }

    #[test]
    fn test_config_tsap_override() {
        let config = ClientConfig::new(Ipv4Addr::LOCALHOST, 0, 2).with_tsap(0x1000, 0x2700);
        assert_eq!(config.local_tsap, 0x1000);
        assert_eq!(config.remote_tsap(), 0x2700);
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new(Ipv4Addr::LOCALHOST, 0, 2)
            .with_port(10102)
            .with_timeout(Duration::from_millis(500))
            .with_pdu_size_requested(960);
        assert_eq!(config.plc_addr.port(), 10102);
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.pdu_size_requested, 960);
    }

    #[test]
    fn test_connect_negotiates_pdu_length() {
        let (addr, rx, handle) = spawn_plc(vec![iso_confirm(), negotiate_reply(240)]);
        let mut client = Client::new(test_config(addr));

        client.connect().unwrap();
        assert!(client.is_connected());
        assert_eq!(client.pdu_length(), 240);

        let iso_request = rx.recv().unwrap();
        assert_eq!(iso_request.len(), 22);
        assert_eq!(iso_request[5], 0xE0);
        // local TSAP 0x0100, remote TSAP PG rack 0 slot 2
        assert_eq!(&iso_request[16..18], &[0x01, 0x00]);
        assert_eq!(&iso_request[20..22], &[0x01, 0x02]);

        let negotiate_request = rx.recv().unwrap();
        assert_eq!(negotiate_request.len(), 25);
        assert_eq!(get_word_at(&negotiate_request, 23), 480);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_connect_rejects_wrong_cotp_type() {
        let mut bad_confirm = iso_confirm();
        bad_confirm[5] = 0xF0;
        let (addr, _rx, handle) = spawn_plc(vec![bad_confirm]);
        let mut client = Client::new(test_config(addr));

        let err = client.connect().unwrap_err();
        assert!(matches!(err, S7Error::IsoConnectionFailed));
        assert!(!client.is_connected());
        assert_eq!(client.pdu_length(), 0);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_connect_rejects_bad_negotiation() {
        let mut bad_negotiate = negotiate_reply(480);
        bad_negotiate[17] = 0x81;
        let (addr, _rx, handle) = spawn_plc(vec![iso_confirm(), bad_negotiate]);
        let mut client = Client::new(test_config(addr));

        let err = client.connect().unwrap_err();
        assert!(matches!(err, S7Error::IsoNegotiatingPdu));
        assert!(!client.is_connected());

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_read_chunks_to_pdu_length() {
        // PDU length 30 allows 12 byte elements per read telegram
        let first: Vec<u8> = (0..12).collect();
        let second: Vec<u8> = (12..20).collect();
        let (addr, rx, handle) = spawn_plc(vec![
            iso_confirm(),
            negotiate_reply(30),
            read_reply(&first),
            read_reply(&second),
        ]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let data = client.read_area(Area::MK, 0, 0, 20).unwrap();
        let expected: Vec<u8> = (0..20).collect();
        assert_eq!(data, expected);

        let requests: Vec<Vec<u8>> = rx.try_iter().collect();
        assert_eq!(requests.len(), 4);
        // First chunk: 12 elements at byte 0
        assert_eq!(get_word_at(&requests[2], 23), 12);
        assert_eq!(&requests[2][28..31], &[0, 0, 0]);
        assert_eq!(requests[2][27], 0x83);
        // Second chunk: 8 elements at byte 12 (bit address 96)
        assert_eq!(get_word_at(&requests[3], 23), 8);
        assert_eq!(&requests[3][28..31], &[0, 0, 96]);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_read_amount_zero_sends_nothing() {
        let (addr, rx, handle) = spawn_plc(vec![iso_confirm(), negotiate_reply(240)]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let data = client.read_area(Area::DB, 1, 0, 0).unwrap();
        assert!(data.is_empty());
        assert_eq!(rx.try_iter().count(), 2);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_write_chunks_to_pdu_length() {
        // PDU length 40 allows 5 byte elements per write telegram
        let (addr, rx, handle) = spawn_plc(vec![
            iso_confirm(),
            negotiate_reply(40),
            write_reply(),
            write_reply(),
            write_reply(),
        ]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let data: Vec<u8> = (0..12).collect();
        client.write_area(Area::MK, 0, 100, &data).unwrap();

        let requests: Vec<Vec<u8>> = rx.try_iter().collect();
        assert_eq!(requests.len(), 5);
        // Chunks of 5, 5 and 2 bytes
        assert_eq!(requests[2].len(), 40);
        assert_eq!(get_word_at(&requests[2], 33), 40); // 5 bytes in bits
        assert_eq!(&requests[2][35..40], &[0, 1, 2, 3, 4]);
        assert_eq!(&requests[3][35..40], &[5, 6, 7, 8, 9]);
        assert_eq!(requests[4].len(), 37);
        assert_eq!(get_word_at(&requests[4], 33), 16); // 2 bytes in bits
        assert_eq!(&requests[4][35..37], &[10, 11]);
        // Start advances 100, 105, 110 (bit addresses 800, 840, 880)
        assert_eq!(&requests[2][28..31], &[0x00, 0x03, 0x20]);
        assert_eq!(&requests[3][28..31], &[0x00, 0x03, 0x48]);
        assert_eq!(&requests[4][28..31], &[0x00, 0x03, 0x70]);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_write_empty_sends_nothing() {
        let (addr, rx, handle) = spawn_plc(vec![iso_confirm(), negotiate_reply(240)]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        client.write_area(Area::DB, 1, 0, &[]).unwrap();
        assert_eq!(rx.try_iter().count(), 2);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_write_rejects_odd_counter_data() {
        let (addr, _rx, handle) = spawn_plc(vec![iso_confirm(), negotiate_reply(240)]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let err = client.write_area(Area::CT, 0, 0, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, S7Error::S7InvalidParams { .. }));

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_read_szl_continuation() {
        let mut first = reply(49);
        first[24] = 0x05; // sequence to echo
        first[26] = 0x01; // more slices follow
        first[29] = 0xFF;
        set_word_at(&mut first, 31, 16); // header plus 8 record bytes
        set_word_at(&mut first, 37, 8);
        set_word_at(&mut first, 39, 2);
        first[41..49].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let mut second = reply(45);
        second[24] = 0x06;
        second[26] = 0x00; // done
        second[29] = 0xFF;
        set_word_at(&mut second, 31, 8);
        second[37..45].copy_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]);

        let (addr, rx, handle) =
            spawn_plc(vec![iso_confirm(), negotiate_reply(240), first, second]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let szl = client.read_szl(0x001C, 0x0000).unwrap();
        assert_eq!(szl.record_length, 8);
        assert_eq!(szl.record_count, 2);
        assert_eq!(szl.data, (1..=16).collect::<Vec<u8>>());

        let requests: Vec<Vec<u8>> = rx.try_iter().collect();
        assert_eq!(requests.len(), 4);
        // First request carries the list id and index
        assert_eq!(get_word_at(&requests[2], 29), 0x001C);
        assert_eq!(get_word_at(&requests[2], 31), 0x0000);
        assert_eq!(get_word_at(&requests[2], 11), 1);
        // Continuation echoes the reply sequence and bumps its own
        assert_eq!(requests[3][24], 0x05);
        assert_eq!(get_word_at(&requests[3], 11), 2);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_keepalive_before_reply_is_skipped() {
        // The PLC prepends a 7 byte keepalive telegram to the real reply
        let mut keepalive = vec![0x03, 0x00, 0x00, 0x07, 0x02, 0xF0, 0x80];
        keepalive.extend_from_slice(&read_reply(&[0xAA, 0xBB]));
        let (addr, _rx, handle) =
            spawn_plc(vec![iso_confirm(), negotiate_reply(240), keepalive]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let data = client.read_area(Area::MK, 0, 0, 2).unwrap();
        assert_eq!(data, vec![0xAA, 0xBB]);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_get_plc_status() {
        let mut status = reply(45);
        status[44] = 0x08;
        let (addr, _rx, handle) = spawn_plc(vec![iso_confirm(), negotiate_reply(240), status]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        assert_eq!(client.get_plc_status().unwrap(), PlcStatus::Run);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_plc_stop_sends_stop_function() {
        let (addr, rx, handle) = spawn_plc(vec![iso_confirm(), negotiate_reply(240), reply(19)]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        client.plc_stop().unwrap();

        let requests: Vec<Vec<u8>> = rx.try_iter().collect();
        assert_eq!(requests[2][17], 0x29);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_get_plc_date_time() {
        let mut clock = reply(43);
        clock[29] = 0xFF;
        clock[34..40].copy_from_slice(&[0x24, 0x03, 0x05, 0x10, 0x20, 0x30]);
        let (addr, _rx, handle) = spawn_plc(vec![iso_confirm(), negotiate_reply(240), clock]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let dt = client.get_plc_date_time().unwrap();
        assert_eq!(dt.to_string(), "2024-03-05 10:20:30");

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_db_get() {
        let mut block_info = reply(138);
        block_info[29] = 0xFF;
        set_word_at(&mut block_info, 42 + 31, 4); // MC7 size 4
        let (addr, _rx, handle) = spawn_plc(vec![
            iso_confirm(),
            negotiate_reply(240),
            block_info,
            read_reply(&[9, 8, 7, 6]),
        ]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let mut buffer = [0u8; 16];
        let size = client.db_get(1, &mut buffer).unwrap();
        assert_eq!(size, 4);
        assert_eq!(&buffer[..4], &[9, 8, 7, 6]);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_db_get_buffer_too_small() {
        let mut block_info = reply(138);
        block_info[29] = 0xFF;
        set_word_at(&mut block_info, 42 + 31, 64);
        let (addr, rx, handle) =
            spawn_plc(vec![iso_confirm(), negotiate_reply(240), block_info]);
        let mut client = Client::new(test_config(addr));
        client.connect().unwrap();

        let mut buffer = [0u8; 32];
        let err = client.db_get(1, &mut buffer).unwrap_err();
        assert!(matches!(
            err,
            S7Error::S7BufferTooSmall {
                required: 64,
                available: 32,
            }
        ));
        // No read was attempted after the size check failed
        assert_eq!(rx.try_iter().count(), 3);

        drop(client);
        handle.join().unwrap();
    }

    #[test]
    fn test_operations_require_connection() {
        let mut client = Client::new(ClientConfig::new(Ipv4Addr::LOCALHOST, 0, 2));

        let err = client.read_area(Area::MK, 0, 0, 4).unwrap_err();
        assert!(matches!(err, S7Error::TcpConnectionFailed { .. }));
        let err = client.write_area(Area::MK, 0, 0, &[1]).unwrap_err();
        assert!(matches!(err, S7Error::TcpConnectionFailed { .. }));
        let err = client.plc_stop().unwrap_err();
        assert!(matches!(err, S7Error::TcpConnectionFailed { .. }));
    }

    #[test]
    fn test_client_debug() {
        let client = Client::new(ClientConfig::new(Ipv4Addr::LOCALHOST, 0, 2));
        let debug_str = format!("{client:?}");
        assert!(debug_str.contains("Client"));
        assert!(debug_str.contains("connected: false"));
    }
}
