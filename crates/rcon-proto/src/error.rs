//! Error types for the RCON protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Declared packet length exceeded the codec limit.
    #[error("packet too long: {actual} bytes (limit: {limit})")]
    PacketTooLong {
        /// Declared packet length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Declared packet length is smaller than the fixed header.
    #[error("packet too short: {0} bytes")]
    PacketTooShort(i32),

    /// Outgoing body exceeded what the server accepts.
    #[error("request body too long: {actual} bytes (limit: {limit})")]
    BodyTooLong {
        /// Actual body length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Outgoing body contained a NUL byte, which would truncate it on the wire.
    #[error("request body contains NUL byte at {0}")]
    IllegalNul(usize),

    /// Packet was not terminated by two NUL bytes.
    #[error("packet {0} is missing its NUL terminator")]
    MissingTerminator(i32),

    /// The server closed the connection mid-exchange.
    #[error("connection closed by server")]
    ConnectionClosed,

    /// The server answered with a request id we never sent.
    #[error("unexpected response id {actual} (expected {expected})")]
    UnexpectedId {
        /// Request id we were waiting for.
        expected: i32,
        /// Request id we received.
        actual: i32,
    },
}
