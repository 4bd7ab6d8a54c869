//! TCP transport layer for ISO-on-TCP communication.
//!
//! This module provides the [`TcpTransport`] struct which handles low-level
//! TCP communication with S7 controllers. The transport layer is completely
//! separated from the protocol layer—it only knows about sockets and bytes.
//!
//! # Design
//!
//! The transport layer follows these principles:
//!
//! - **Protocol agnostic** - Handles only byte transmission, no S7 knowledge
//! - **Synchronous** - Blocking send/receive with configurable receive timeout
//! - **Simple** - One stream, one remote address, no connection pooling
//!
//! Receiving polls the stream at 1 ms granularity until the requested bytes
//! arrive or the receive timeout elapses. On timeout, bytes that already
//! arrived have been consumed from the stream, so a later receive starts from
//! a frame boundary rather than mid-telegram.
//!
//! # Constants
//!
//! - [`DEFAULT_ISO_PORT`] - Default ISO-on-TCP port (102)
//! - [`DEFAULT_TIMEOUT`] - Default receive timeout (5 seconds)
//! - [`CONNECT_TIMEOUT`] - Fixed TCP connect timeout (5 seconds)
//!
//! # Example
//!
//! The transport is typically used through the [`Client`](crate::Client)
//! struct, but can be used directly for custom implementations:
//!
//! ```no_run
//! use siemens_s7::TcpTransport;
//! use std::time::Duration;
//!
//! let mut transport = TcpTransport::connect(
//!     "192.168.1.10:102".parse().unwrap(),
//!     Duration::from_secs(2),
//! ).unwrap();
//!
//! transport.send(&[0x03, 0x00, 0x00, 0x16, /* ... rest of the telegram */]).unwrap();
//! let mut header = [0u8; 4];
//! transport.recv_exact(&mut header).unwrap();
//! ```

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::{Duration, Instant};

use crate::error::{Result, S7Error};

/// Default ISO-on-TCP port.
pub const DEFAULT_ISO_PORT: u16 = 102;

/// Default receive timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fixed timeout for establishing the TCP connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Granularity of the receive poll loop.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// TCP transport for ISO-on-TCP communication.
///
/// Handles synchronous TCP communication with a configurable receive timeout.
/// The protocol layer doesn't know about sockets; the socket layer doesn't
/// know S7.
pub struct TcpTransport {
    stream: TcpStream,
    remote_addr: SocketAddr,
    recv_timeout: Duration,
}

impl TcpTransport {
    /// Opens a TCP connection to the specified controller address.
    ///
    /// The connection attempt uses the fixed [`CONNECT_TIMEOUT`] and enables
    /// `TCP_NODELAY` so small telegrams are not held back by Nagle's
    /// algorithm.
    ///
    /// # Arguments
    ///
    /// * `plc_addr` - Socket address of the controller (IP:port)
    /// * `recv_timeout` - Receive timeout duration
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::TcpConnectionFailed`] if the connection cannot be
    /// established or configured.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use siemens_s7::TcpTransport;
    /// use std::time::Duration;
    ///
    /// let transport = TcpTransport::connect(
    ///     "192.168.1.10:102".parse().unwrap(),
    ///     Duration::from_secs(2),
    /// ).unwrap();
    /// ```
    pub fn connect(plc_addr: SocketAddr, recv_timeout: Duration) -> Result<Self> {
        let stream = TcpStream::connect_timeout(&plc_addr, CONNECT_TIMEOUT)
            .map_err(|source| S7Error::TcpConnectionFailed { source })?;
        stream
            .set_nodelay(true)
            .map_err(|source| S7Error::TcpConnectionFailed { source })?;
        // Short read timeout so the receive loop can poll against its own
        // deadline at 1 ms granularity.
        stream
            .set_read_timeout(Some(POLL_INTERVAL))
            .map_err(|source| S7Error::TcpConnectionFailed { source })?;

        Ok(Self {
            stream,
            remote_addr: plc_addr,
            recv_timeout,
        })
    }

    /// Opens a TCP connection with the default receive timeout.
    ///
    /// # Arguments
    ///
    /// * `plc_addr` - Socket address of the controller (IP:port)
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::TcpConnectionFailed`] if the connection cannot be
    /// established or configured.
    pub fn with_default_timeout(plc_addr: SocketAddr) -> Result<Self> {
        Self::connect(plc_addr, DEFAULT_TIMEOUT)
    }

    /// Sends raw bytes to the controller.
    ///
    /// # Arguments
    ///
    /// * `data` - Telegram bytes to send
    ///
    /// # Errors
    ///
    /// Returns [`S7Error::TcpDataSend`] if the write fails. Recovery (the
    /// single reconnect-and-retry) is handled by the caller, not here.
    pub fn send(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .write_all(data)
            .and_then(|_| self.stream.flush())
            .map_err(|source| S7Error::TcpDataSend { source })
    }

    /// Receives exactly `buf.len()` bytes from the controller.
    ///
    /// Blocks until the buffer is full or the receive timeout elapses,
    /// polling at 1 ms granularity.
    ///
    /// # Errors
    ///
    /// - [`S7Error::TcpDataRecvTimeout`] if the timeout elapses first; any
    ///   partial bytes already received have been consumed from the stream
    /// - [`S7Error::TcpConnectionReset`] if the peer closed the connection
    /// - [`S7Error::TcpDataRecv`] for other I/O errors
    pub fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let deadline = Instant::now() + self.recv_timeout;
        let mut filled = 0;

        while filled < buf.len() {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => return Err(S7Error::TcpConnectionReset),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                    if Instant::now() >= deadline {
                        return Err(S7Error::TcpDataRecvTimeout);
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(source) => return Err(S7Error::TcpDataRecv { source }),
            }
        }

        Ok(())
    }

    /// Returns the remote controller address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Returns the configured receive timeout.
    pub fn recv_timeout(&self) -> Duration {
        self.recv_timeout
    }
}

impl std::fmt::Debug for TcpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpTransport")
            .field("remote_addr", &self.remote_addr)
            .field("local_addr", &self.stream.local_addr().ok())
            .field("recv_timeout", &self.recv_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    fn local_listener() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_ISO_PORT, 102);
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(5));
        assert_eq!(CONNECT_TIMEOUT, Duration::from_secs(5));
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to get a port nothing listens on.
        let (listener, addr) = local_listener();
        drop(listener);

        let result = TcpTransport::connect(addr, Duration::from_millis(100));
        assert!(matches!(
            result,
            Err(S7Error::TcpConnectionFailed { .. })
        ));
    }

    #[test]
    fn test_send_and_recv() {
        let (listener, addr) = local_listener();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4];
            stream.read_exact(&mut request).unwrap();
            assert_eq!(request, [0x03, 0x00, 0x00, 0x16]);
            stream.write_all(&[0xAA, 0xBB, 0xCC]).unwrap();
        });

        let mut transport = TcpTransport::connect(addr, Duration::from_secs(1)).unwrap();
        transport.send(&[0x03, 0x00, 0x00, 0x16]).unwrap();

        let mut reply = [0u8; 3];
        transport.recv_exact(&mut reply).unwrap();
        assert_eq!(reply, [0xAA, 0xBB, 0xCC]);

        server.join().unwrap();
    }

    #[test]
    fn test_recv_timeout() {
        let (listener, addr) = local_listener();
        let mut transport = TcpTransport::connect(addr, Duration::from_millis(50)).unwrap();
        let (_stream, _) = listener.accept().unwrap();

        let mut buf = [0u8; 4];
        let result = transport.recv_exact(&mut buf);
        assert!(matches!(result, Err(S7Error::TcpDataRecvTimeout)));
    }

    #[test]
    fn test_recv_timeout_consumes_partial_bytes() {
        let (listener, addr) = local_listener();
        let mut transport = TcpTransport::connect(addr, Duration::from_millis(50)).unwrap();
        let (mut stream, _) = listener.accept().unwrap();

        // Two bytes of a four byte read arrive, then nothing.
        stream.write_all(&[0x01, 0x02]).unwrap();

        let mut buf = [0u8; 4];
        let result = transport.recv_exact(&mut buf);
        assert!(matches!(result, Err(S7Error::TcpDataRecvTimeout)));

        // The partial bytes were consumed, so fresh data is read from a
        // frame boundary.
        stream.write_all(&[0x03, 0x04]).unwrap();
        let mut next = [0u8; 2];
        transport.recv_exact(&mut next).unwrap();
        assert_eq!(next, [0x03, 0x04]);
    }

    #[test]
    fn test_recv_connection_reset() {
        let (listener, addr) = local_listener();
        let mut transport = TcpTransport::connect(addr, Duration::from_secs(1)).unwrap();
        let (stream, _) = listener.accept().unwrap();
        drop(stream);

        let mut buf = [0u8; 4];
        let result = transport.recv_exact(&mut buf);
        assert!(matches!(result, Err(S7Error::TcpConnectionReset)));
    }

    #[test]
    fn test_transport_debug() {
        let (listener, addr) = local_listener();
        let transport = TcpTransport::connect(addr, Duration::from_secs(1)).unwrap();
        let (_stream, _) = listener.accept().unwrap();

        let debug_str = format!("{:?}", transport);
        assert!(debug_str.contains("TcpTransport"));
        assert!(debug_str.contains("127.0.0.1"));
    }
}
