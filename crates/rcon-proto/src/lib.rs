//! # rcon-proto
//!
//! A small library for speaking the Source RCON protocol as used by
//! Minecraft: Java Edition and most Source-engine servers.
//!
//! ## Features
//!
//! - Packet model with typed request ids and packet types
//! - Length-prefixed tokio codec with inbound and outbound size limits
//! - Framed TCP client transport with login and multi-packet command replies
//!
//! ## Quick Start
//!
//! ```ignore
//! use rcon_proto::RconTransport;
//!
//! let mut rcon = RconTransport::connect(("127.0.0.1", 25575)).await?;
//! if !rcon.login("hunter2").await? {
//!     return Err("bad password".into());
//! }
//! let players = rcon.command("list").await?;
//! println!("{}", players);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

#[cfg(feature = "tokio")]
pub mod codec;
pub mod error;
pub mod packet;
#[cfg(feature = "tokio")]
pub mod transport;

#[cfg(feature = "tokio")]
pub use self::codec::RconCodec;
pub use self::error::ProtocolError;
pub use self::packet::{Packet, PacketType};
#[cfg(feature = "tokio")]
pub use self::transport::RconTransport;

/// Largest command body a client may send (Minecraft drops longer requests).
pub const MAX_REQUEST_BODY: usize = 1446;

/// Largest response body a server sends in a single packet before fragmenting.
pub const MAX_RESPONSE_BODY: usize = 4096;

/// Largest response body the client accepts in a single packet.
///
/// Minecraft cuts replies every [`MAX_RESPONSE_BODY`] bytes of UTF-8 and then
/// re-decodes each piece with replacement, so a piece that starts or ends
/// inside a multibyte character grows by a few bytes.
pub const MAX_INBOUND_BODY: usize = MAX_RESPONSE_BODY + 16;

/// Bytes in a packet that are not body: request id, type and two NUL terminators.
pub const PACKET_OVERHEAD: usize = 10;
