//! Error types for the S7 protocol.

use std::io;
use thiserror::Error;

/// Result type alias for S7 operations.
pub type Result<T> = std::result::Result<T, S7Error>;

/// Errors that can occur during S7 communication.
///
/// The taxonomy is flat and grouped by layer: `Tcp*` variants come from the
/// socket, `Iso*` variants from the ISO-on-TCP transport (RFC 1006 framing
/// and the COTP handshake), and `S7*` variants from the application protocol.
/// Each variant maps to a stable numeric diagnostic code via
/// [`S7Error::code`].
#[derive(Debug, Error)]
pub enum S7Error {
    /// TCP connection to the controller could not be established.
    #[error("TCP connection failed: {source}")]
    TcpConnectionFailed {
        /// Underlying socket error.
        source: io::Error,
    },

    /// TCP send failed, including the single automatic reconnect retry.
    #[error("TCP send error: {source}")]
    TcpDataSend {
        /// Underlying socket error.
        source: io::Error,
    },

    /// TCP receive failed.
    #[error("TCP receive error: {source}")]
    TcpDataRecv {
        /// Underlying socket error.
        source: io::Error,
    },

    /// The receive timeout elapsed before the requested bytes arrived.
    /// Any partial bytes already buffered have been drained.
    #[error("data receive timeout")]
    TcpDataRecvTimeout,

    /// The peer closed the connection while data was expected.
    #[error("connection reset by the peer")]
    TcpConnectionReset,

    /// A received frame violated the TPKT/COTP framing rules.
    #[error("invalid ISO PDU received (length {length})")]
    IsoInvalidPdu {
        /// Total telegram length taken from the TPKT header.
        length: usize,
    },

    /// The controller refused the ISO connection request.
    #[error("ISO connection refused by the CPU")]
    IsoConnectionFailed,

    /// PDU length negotiation failed or granted a non-positive length.
    #[error("error negotiating the PDU length")]
    IsoNegotiatingPdu,

    /// A received S7 telegram was shorter or shaped differently than the
    /// operation requires.
    #[error("invalid S7 PDU received (length {length})")]
    S7InvalidPdu {
        /// Total telegram length of the offending reply.
        length: usize,
    },

    /// The controller refused or failed a data read.
    #[error("error reading data from the CPU")]
    S7DataRead,

    /// The controller refused or failed a data write.
    #[error("error writing data to the CPU")]
    S7DataWrite,

    /// The buffer supplied by the caller cannot hold the data.
    #[error("buffer too small: {required} bytes required, {available} available")]
    S7BufferTooSmall {
        /// Bytes the operation needs to store.
        required: usize,
        /// Bytes the caller provided.
        available: usize,
    },

    /// The controller refused the requested function.
    #[error("function refused by the CPU (code 0x{code:04X})")]
    S7FunctionError {
        /// Result word reported by the controller, 0 when the refusal was
        /// signalled by the item return code instead.
        code: u16,
    },

    /// Invalid parameters supplied by the caller.
    #[error("invalid parameters: {reason}")]
    S7InvalidParams {
        /// Description of what was rejected.
        reason: String,
    },
}

impl S7Error {
    /// Returns the stable numeric diagnostic code for this error.
    ///
    /// Codes are grouped by layer: `0x0001`–`0x0005` TCP, `0x0006`–`0x0008`
    /// ISO transport, `0x0009`–`0x000E` S7 application.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::S7Error;
    ///
    /// assert_eq!(S7Error::TcpConnectionReset.code(), 0x0005);
    /// ```
    pub fn code(&self) -> u16 {
        match self {
            Self::TcpConnectionFailed { .. } => 0x0001,
            Self::TcpDataSend { .. } => 0x0002,
            Self::TcpDataRecv { .. } => 0x0003,
            Self::TcpDataRecvTimeout => 0x0004,
            Self::TcpConnectionReset => 0x0005,
            Self::IsoInvalidPdu { .. } => 0x0006,
            Self::IsoConnectionFailed => 0x0007,
            Self::IsoNegotiatingPdu => 0x0008,
            Self::S7InvalidPdu { .. } => 0x0009,
            Self::S7DataRead => 0x000A,
            Self::S7DataWrite => 0x000B,
            Self::S7BufferTooSmall { .. } => 0x000C,
            Self::S7FunctionError { .. } => 0x000D,
            Self::S7InvalidParams { .. } => 0x000E,
        }
    }

    /// Creates a new `IsoInvalidPdu` error.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::S7Error;
    ///
    /// let err = S7Error::iso_invalid_pdu(9);
    /// ```
    pub fn iso_invalid_pdu(length: usize) -> Self {
        Self::IsoInvalidPdu { length }
    }

    /// Creates a new `S7InvalidPdu` error.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::S7Error;
    ///
    /// let err = S7Error::s7_invalid_pdu(21);
    /// ```
    pub fn s7_invalid_pdu(length: usize) -> Self {
        Self::S7InvalidPdu { length }
    }

    /// Creates a new `S7BufferTooSmall` error.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::S7Error;
    ///
    /// let err = S7Error::buffer_too_small(512, 256);
    /// ```
    pub fn buffer_too_small(required: usize, available: usize) -> Self {
        Self::S7BufferTooSmall {
            required,
            available,
        }
    }

    /// Creates a new `S7FunctionError` from the controller's result word.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::S7Error;
    ///
    /// let err = S7Error::function_error(0x8104);
    /// ```
    pub fn function_error(code: u16) -> Self {
        Self::S7FunctionError { code }
    }

    /// Creates a new `S7InvalidParams` error.
    ///
    /// # Example
    ///
    /// ```
    /// use siemens_s7::S7Error;
    ///
    /// let err = S7Error::invalid_params("password must be ASCII");
    /// ```
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::S7InvalidParams {
            reason: reason.into(),
        }
    }
}
