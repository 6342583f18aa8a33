//! Framed RCON client transport over TCP.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::Framed;
use tracing::{debug, trace, warn};

use crate::codec::RconCodec;
use crate::error::{self, ProtocolError};
use crate::packet::{Packet, PacketType};

/// RCON client transport.
///
/// Owns one authenticated (or authenticating) TCP session. Requests are
/// strictly sequential: every method takes `&mut self`, so two commands can
/// never interleave on the same socket. Dropping the transport closes the
/// connection.
pub struct RconTransport {
    framed: Framed<TcpStream, RconCodec>,
    next_id: i32,
    /// Sentinel id of the previous command. Source-engine servers answer a
    /// sentinel with two packets, and the second one can trail into the
    /// next exchange.
    last_sentinel: Option<i32>,
}

impl RconTransport {
    /// Open a TCP connection to an RCON endpoint.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> error::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::tcp(stream))
    }

    /// Wrap an already connected stream.
    pub fn tcp(stream: TcpStream) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }

        Self {
            framed: Framed::new(stream, RconCodec::new()),
            next_id: 1,
            last_sentinel: None,
        }
    }

    fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
        use socket2::{SockRef, TcpKeepalive};
        use std::time::Duration;

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)
    }

    /// Address of the remote server.
    pub fn peer_addr(&self) -> std::io::Result<SocketAddr> {
        self.framed.get_ref().peer_addr()
    }

    /// Allocate the next request id. Ids stay positive so they can never
    /// collide with the `-1` auth-failure marker.
    fn next_request_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id = self.next_id.checked_add(1).unwrap_or(1);
        id
    }

    async fn recv(&mut self) -> error::Result<Packet> {
        match self.framed.next().await {
            Some(result) => result,
            None => Err(ProtocolError::ConnectionClosed),
        }
    }

    /// Authenticate with the RCON password.
    ///
    /// Returns `Ok(false)` when the server rejects the password. Some servers
    /// send an empty response packet ahead of the auth response; it is skipped.
    pub async fn login(&mut self, password: &str) -> error::Result<bool> {
        let id = self.next_request_id();
        self.framed.send(Packet::login(id, password)).await?;

        loop {
            let packet = self.recv().await?;
            if packet.kind != PacketType::AUTH_RESPONSE {
                trace!(id = packet.id, kind = %packet.kind, "skipping pre-auth packet");
                continue;
            }
            if packet.is_auth_failure() {
                debug!("rcon login rejected");
                return Ok(false);
            }
            if packet.id != id {
                return Err(ProtocolError::UnexpectedId {
                    expected: id,
                    actual: packet.id,
                });
            }
            debug!("rcon login accepted");
            return Ok(true);
        }
    }

    /// Run a console command and return its complete output.
    ///
    /// Large outputs arrive split over several packets with no end marker, so
    /// an empty sentinel packet is queued right behind the command. The server
    /// answers in order, and the echo of the sentinel marks the end of output.
    ///
    /// Fragments are joined as bytes before UTF-8 decoding, so a character
    /// split across two packets survives. Invalid sequences are replaced
    /// with U+FFFD rather than failing the command.
    pub async fn command(&mut self, command: &str) -> error::Result<String> {
        let id = self.next_request_id();
        let sentinel = self.next_request_id();

        self.framed.feed(Packet::command(id, command)).await?;
        self.framed.feed(Packet::sentinel(sentinel)).await?;
        self.framed.flush().await?;

        let mut output = Vec::new();
        let mut fragments = 0usize;
        loop {
            let packet = self.recv().await?;
            if packet.id == id {
                fragments += 1;
                output.extend_from_slice(&packet.body);
            } else if packet.id == sentinel {
                break;
            } else if Some(packet.id) == self.last_sentinel {
                trace!(id = packet.id, "skipping trailing sentinel reply");
            } else {
                return Err(ProtocolError::UnexpectedId {
                    expected: id,
                    actual: packet.id,
                });
            }
        }

        self.last_sentinel = Some(sentinel);
        trace!(id, fragments, bytes = output.len(), "rcon command complete");

        Ok(match String::from_utf8(output) {
            Ok(text) => text,
            Err(e) => {
                debug!(id, at = e.utf8_error().valid_up_to(), "rcon reply is not valid UTF-8");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        })
    }

    /// Flush and shut down the connection.
    pub async fn close(mut self) -> error::Result<()> {
        self.framed.close().await
    }
}
