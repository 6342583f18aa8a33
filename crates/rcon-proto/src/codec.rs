//! Length-prefixed RCON codec for tokio.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};
use crate::packet::{Packet, PacketType};
use crate::{MAX_INBOUND_BODY, MAX_REQUEST_BODY, PACKET_OVERHEAD};

/// Size of the little-endian length prefix.
const LEN_PREFIX: usize = 4;

/// Tokio codec for encoding/decoding RCON [`Packet`]s.
///
/// Inbound frames are limited to `max_len` bytes (as declared by the length
/// prefix); outbound bodies to `max_body` bytes. Bodies are passed through as
/// raw bytes in both directions.
pub struct RconCodec {
    max_len: usize,
    max_body: usize,
}

impl RconCodec {
    /// Create a codec with the Minecraft limits.
    pub fn new() -> Self {
        Self {
            max_len: MAX_INBOUND_BODY + PACKET_OVERHEAD,
            max_body: MAX_REQUEST_BODY,
        }
    }

    /// Create a codec accepting inbound frames up to `max_len` bytes.
    ///
    /// Useful for servers that do not fragment large replies.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(PACKET_OVERHEAD),
            ..Self::new()
        }
    }

    /// Create a codec with explicit inbound frame and outbound body limits.
    ///
    /// A server-side codec needs `max_body` raised to at least
    /// [`MAX_RESPONSE_BODY`](crate::MAX_RESPONSE_BODY).
    pub fn with_limits(max_len: usize, max_body: usize) -> Self {
        Self {
            max_len: max_len.max(PACKET_OVERHEAD),
            max_body,
        }
    }

    /// Reject bodies the server would drop or truncate.
    pub fn sanitize(&self, body: &[u8]) -> error::Result<()> {
        if body.len() > self.max_body {
            return Err(ProtocolError::BodyTooLong {
                actual: body.len(),
                limit: self.max_body,
            });
        }
        if let Some(pos) = body.iter().position(|&b| b == 0) {
            return Err(ProtocolError::IllegalNul(pos));
        }
        Ok(())
    }
}

impl Default for RconCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RconCodec {
    type Item = Packet;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Packet>> {
        if src.len() < LEN_PREFIX {
            return Ok(None);
        }

        let mut prefix = [0u8; LEN_PREFIX];
        prefix.copy_from_slice(&src[..LEN_PREFIX]);
        let declared = i32::from_le_bytes(prefix);

        if declared < PACKET_OVERHEAD as i32 {
            return Err(ProtocolError::PacketTooShort(declared));
        }
        let len = declared as usize;
        if len > self.max_len {
            return Err(ProtocolError::PacketTooLong {
                actual: len,
                limit: self.max_len,
            });
        }

        if src.len() < LEN_PREFIX + len {
            // Wait for the rest of the frame
            src.reserve(LEN_PREFIX + len - src.len());
            return Ok(None);
        }

        src.advance(LEN_PREFIX);
        let mut frame = src.split_to(len);
        let id = frame.get_i32_le();
        let kind = PacketType(frame.get_i32_le());

        let body_len = frame.len() - 2;
        if frame[body_len..] != [0u8, 0u8] {
            return Err(ProtocolError::MissingTerminator(id));
        }
        frame.truncate(body_len);

        Ok(Some(Packet {
            id,
            kind,
            body: frame.freeze(),
        }))
    }
}

impl Encoder<Packet> for RconCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> error::Result<()> {
        self.sanitize(&packet.body)?;

        let len = packet.wire_len();
        dst.reserve(LEN_PREFIX + len);
        dst.put_i32_le(len as i32);
        dst.put_i32_le(packet.id);
        dst.put_i32_le(packet.kind.0);
        dst.extend_from_slice(&packet.body);
        dst.put_u8(0);
        dst.put_u8(0);
        Ok(())
    }
}
