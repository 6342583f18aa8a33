//! RCON packet model.
//!
//! A packet on the wire is laid out as:
//!
//! ```text
//! i32 length | i32 request id | i32 type | body bytes | 0x00 0x00
//! ```
//!
//! All integers are little-endian. `length` counts everything after itself.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

/// Packet type field.
///
/// The numeric values are shared between directions, so the same value can
/// mean different things depending on who sent it (`2` is both an outgoing
/// command and an incoming auth response).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacketType(pub i32);

impl PacketType {
    /// Client → server: authenticate with the RCON password.
    pub const LOGIN: Self = Self(3);
    /// Client → server: run a console command.
    pub const COMMAND: Self = Self(2);
    /// Server → client: result of a login attempt.
    pub const AUTH_RESPONSE: Self = Self(2);
    /// Server → client: command output. Also used by clients as an
    /// end-of-response sentinel, since servers echo it back unchanged.
    pub const RESPONSE: Self = Self(0);
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single RCON packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Client-chosen request id, echoed by the server. `-1` marks auth failure.
    pub id: i32,
    /// Packet type.
    pub kind: PacketType,
    /// Raw payload bytes.
    ///
    /// Kept as bytes because a server may split one UTF-8 character across
    /// two fragments; text is decoded once the reply is reassembled.
    pub body: Bytes,
}

impl Packet {
    /// Request id the server uses to signal a rejected password.
    pub const AUTH_FAILED_ID: i32 = -1;

    /// Create a packet.
    pub fn new(id: i32, kind: PacketType, body: impl AsRef<[u8]>) -> Self {
        Self {
            id,
            kind,
            body: Bytes::copy_from_slice(body.as_ref()),
        }
    }

    /// Login request carrying the password.
    pub fn login(id: i32, password: impl AsRef<[u8]>) -> Self {
        Self::new(id, PacketType::LOGIN, password)
    }

    /// Command request.
    pub fn command(id: i32, command: impl AsRef<[u8]>) -> Self {
        Self::new(id, PacketType::COMMAND, command)
    }

    /// Empty sentinel sent after a command to find the end of a fragmented reply.
    pub fn sentinel(id: i32) -> Self {
        Self {
            id,
            kind: PacketType::RESPONSE,
            body: Bytes::new(),
        }
    }

    /// Body decoded as UTF-8, with invalid sequences replaced by U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Value of the length prefix for this packet.
    pub fn wire_len(&self) -> usize {
        self.body.len() + crate::PACKET_OVERHEAD
    }

    /// True if this is an auth response rejecting the password.
    pub fn is_auth_failure(&self) -> bool {
        self.kind == PacketType::AUTH_RESPONSE && self.id == Self::AUTH_FAILED_ID
    }
}
