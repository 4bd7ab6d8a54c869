//! # Siemens S7 Protocol Library
//!
//! A Rust library for communicating with Siemens S7-300/400 family PLCs over
//! ISO-on-TCP (RFC 1006).
//!
//! This is a **protocol-only** library—no business logic, polling, schedulers,
//! or tag abstractions. Each operation sends request telegrams and waits for
//! their replies on a single session; the only implicit behavior is one
//! reconnect attempt when a send fails on an established session.
//!
//! ## Features
//!
//! - **Protocol-only** — focuses solely on S7 telegram exchange
//! - **Single session** — one TCP connection, one telegram in flight
//! - **Type-safe** — memory areas and block types as enums
//! - **No panics** — all errors returned as `Result<T, S7Error>`
//! - **Complete API** — area read/write, DB upload, SZL queries, block info,
//!   clock, run/stop control, session password
//! - **Transparent chunking** — transfers split to the negotiated PDU size
//!
//! ## Quick Start
//!
//! ```no_run
//! use siemens_s7::{Area, Client, ClientConfig};
//! use std::net::Ipv4Addr;
//!
//! fn main() -> siemens_s7::Result<()> {
//!     // Connect to the CPU in rack 0, slot 2 (most S7-300 CPUs)
//!     let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
//!     let mut client = Client::connect_to(config)?;
//!     println!("negotiated PDU length: {}", client.pdu_length());
//!
//!     // Read DB1.DBB0..DBB15
//!     let data = client.read_db(1, 0, 16)?;
//!     println!("DB1 = {:02X?}", data);
//!
//!     // Read 4 bytes of flag memory at MB0
//!     let flags = client.read_area(Area::MK, 0, 0, 4)?;
//!     println!("MB0-3 = {:02X?}", flags);
//!
//!     // Write two bytes to DB1.DBW10
//!     client.write_db(1, 10, &[0x12, 0x34])?;
//!
//!     client.disconnect();
//!     Ok(())
//! }
//! ```
//!
//! ## Memory Areas
//!
//! The library addresses the S7 memory areas by their transport element size:
//!
//! | Area | Description | Element size |
//! |------|-------------|:------------:|
//! | [`Area::PE`] | Process inputs | 1 byte |
//! | [`Area::PA`] | Process outputs | 1 byte |
//! | [`Area::MK`] | Merkers (flag memory) | 1 byte |
//! | [`Area::DB`] | Data blocks | 1 byte |
//! | [`Area::TM`] | Timers | 2 bytes |
//! | [`Area::CT`] | Counters | 2 bytes |
//!
//! ## Core Operations
//!
//! ### Area Transfers
//!
//! Reads and writes of any size; the client splits them into telegrams that
//! fit the PDU length granted by the CPU:
//!
//! ```no_run
//! # use siemens_s7::{Area, Client, ClientConfig};
//! # use std::net::Ipv4Addr;
//! # let mut client = Client::connect_to(ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2)).unwrap();
//! // Read 1 KiB from DB 5, transparently chunked
//! let data = client.read_area(Area::DB, 5, 0, 1024)?;
//!
//! // Write it back
//! client.write_area(Area::DB, 5, 0, &data)?;
//!
//! // Upload a whole DB, sized from the block header
//! let mut buffer = [0u8; 4096];
//! let size = client.db_get(5, &mut buffer)?;
//! # Ok::<(), siemens_s7::S7Error>(())
//! ```
//!
//! ### System Information
//!
//! ```no_run
//! # use siemens_s7::{BlockType, Client, ClientConfig};
//! # use std::net::Ipv4Addr;
//! # let mut client = Client::connect_to(ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2)).unwrap();
//! // Order code and firmware version
//! let order_code = client.get_order_code()?;
//! println!("{} V{}", order_code.code, order_code.firmware_version());
//!
//! // Module and plant identity
//! let cpu_info = client.get_cpu_info()?;
//! println!("{} ({})", cpu_info.module_type_name, cpu_info.serial_number);
//!
//! // Block metadata
//! let info = client.get_block_info(BlockType::DB, 1)?;
//! println!("DB1 holds {} bytes", info.mc7_size);
//!
//! // Raw SZL access
//! let szl = client.read_szl(0x0424, 0x0000)?;
//! for record in szl.records() {
//!     println!("{:02X?}", record);
//! }
//! # Ok::<(), siemens_s7::S7Error>(())
//! ```
//!
//! ### Clock and Run State
//!
//! ```no_run
//! # use siemens_s7::{Client, ClientConfig, PlcStatus};
//! # use std::net::Ipv4Addr;
//! # let mut client = Client::connect_to(ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2)).unwrap();
//! // Read and sync the CPU clock
//! let clock = client.get_plc_date_time()?;
//! client.set_plc_system_date_time()?;
//!
//! // Run state and control
//! if client.get_plc_status()? == PlcStatus::Stop {
//!     client.plc_hot_start()?;
//! }
//! # Ok::<(), siemens_s7::S7Error>(())
//! ```
//!
//! ### Data Helpers
//!
//! The [`codec`] module reads and writes the big-endian S7 data formats in
//! raw buffers:
//!
//! ```
//! use siemens_s7::codec::{get_bit_at, get_real_at, get_word_at, set_word_at};
//!
//! let mut db = vec![0u8; 16];
//!
//! // DBW0
//! set_word_at(&mut db, 0, 1500);
//! assert_eq!(get_word_at(&db, 0), 1500);
//!
//! // DBX2.3
//! db[2] = 0b0000_1000;
//! assert!(get_bit_at(&db, 2, 3));
//!
//! // DBD4 as REAL
//! db[4..8].copy_from_slice(&42.5f32.to_be_bytes());
//! assert_eq!(get_real_at(&db, 4), 42.5);
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, S7Error>`]. The library never panics in
//! public code.
//!
//! ```no_run
//! use siemens_s7::{Area, Client, ClientConfig, S7Error};
//! use std::net::Ipv4Addr;
//!
//! let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2);
//! let mut client = Client::connect_to(config)?;
//!
//! match client.read_area(Area::DB, 1, 0, 64) {
//!     Ok(data) => println!("Data: {:02X?}", data),
//!     Err(S7Error::TcpDataRecvTimeout) => println!("CPU did not answer in time"),
//!     Err(S7Error::S7FunctionError { code }) => {
//!         println!("CPU refused the request: 0x{:04X}", code);
//!     }
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok::<(), S7Error>(())
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use siemens_s7::{ClientConfig, ConnectionType};
//! use std::net::Ipv4Addr;
//! use std::time::Duration;
//!
//! let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 10), 0, 2)
//!     .with_port(10102)                       // Custom port (default: 102)
//!     .with_timeout(Duration::from_secs(2))   // Custom timeout (default: 5s)
//!     .with_connection_type(ConnectionType::OP)
//!     .with_pdu_size_requested(960);          // Proposed PDU size (default: 480)
//!
//! // CPs and gateways configured with fixed TSAPs
//! let config = ClientConfig::new(Ipv4Addr::new(192, 168, 0, 20), 0, 0)
//!     .with_tsap(0x1000, 0x2700);
//! ```
//!
//! ## Design Philosophy
//!
//! This library follows the principle of **determinism over abstraction**:
//!
//! 1. Each operation does exactly what it says
//! 2. One session, one telegram in flight, strict request/reply order
//! 3. The application keeps control over polling and retry policy
//! 4. Errors are always explicit and descriptive

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod area;
mod client;
pub mod codec;
mod error;
mod frame;
mod info;
mod response;
mod telegram;
mod transport;

// Public re-exports
pub use area::Area;
pub use client::{Client, ClientConfig, ConnectionType};
pub use error::{Result, S7Error};
pub use frame::{
    CotpHeader, IsoConnectionRequest, TpktHeader, COTP_DATA_HEADER_SIZE,
    DEFAULT_PDU_SIZE_REQUESTED, ISO_CONNECTION_TELEGRAM_SIZE, ISO_HEADER_SIZE, MAX_TELEGRAM_SIZE,
    MIN_TELEGRAM_SIZE, PDU_TYPE_CONNECT_CONFIRM, PDU_TYPE_CONNECT_REQUEST, PDU_TYPE_DATA,
    TPKT_HEADER_SIZE,
};
pub use info::{BlockInfo, CpInfo, CpuInfo, OrderCode, Protection, Szl};
pub use response::{Reply, SzlFirstSlice, SzlNextSlice};
pub use telegram::{
    BlockInfoRequest, BlockType, ClearPasswordRequest, GetClockRequest, GetStatusRequest,
    NegotiatePduRequest, PlcControl, PlcControlRequest, PlcStatus, ReadAreaRequest,
    SetClockRequest, SetPasswordRequest, SzlFirstRequest, SzlNextRequest, WriteAreaRequest,
};
pub use transport::{TcpTransport, CONNECT_TIMEOUT, DEFAULT_ISO_PORT, DEFAULT_TIMEOUT};
