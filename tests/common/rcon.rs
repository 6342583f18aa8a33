//! In-process RCON server.
//!
//! Speaks the real wire format through `rcon_proto::RconCodec`. Replies can
//! be delayed and split into small packets to exercise reassembly and
//! request serialization. By default replies are split the way vanilla
//! Minecraft does it: every 4096 bytes of UTF-8, each piece re-decoded with
//! replacement, so a multibyte character on a boundary turns into U+FFFD and
//! the piece can exceed 4096 bytes.

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use rcon_proto::{MAX_RESPONSE_BODY, Packet, PacketType, RconCodec};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;

/// Maps a command to its reply. `None` makes the server hang up.
pub type Responder = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Builder-style server settings.
#[derive(Clone)]
pub struct FakeRcon {
    password: String,
    delay: Duration,
    fragment: usize,
    lossy: bool,
    respond: Responder,
    log: Arc<Mutex<Vec<String>>>,
}

impl FakeRcon {
    /// Server answering `echo: <command>`.
    pub fn new(password: &str) -> Self {
        Self {
            password: password.to_string(),
            delay: Duration::ZERO,
            fragment: MAX_RESPONSE_BODY,
            lossy: true,
            respond: Arc::new(|cmd| Some(format!("echo: {cmd}"))),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Split replies every `bytes` bytes of UTF-8.
    pub fn fragment(mut self, bytes: usize) -> Self {
        self.fragment = bytes.max(1);
        self
    }

    /// Send pieces as raw bytes instead of re-decoding them, so a character
    /// cut by a boundary reaches the client intact across two packets.
    pub fn raw_split(mut self) -> Self {
        self.lossy = false;
        self
    }

    pub fn respond(mut self, f: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        self.respond = Arc::new(f);
        self
    }

    /// Commands received so far, in arrival order.
    pub fn commands(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    /// Bind to an ephemeral port and serve connections until the test ends.
    pub async fn start(&self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = self.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(server.clone().serve(stream));
            }
        });
        addr
    }

    async fn serve(self, stream: TcpStream) {
        let mut framed = Framed::new(stream, RconCodec::with_limits(64 * 1024, 64 * 1024));

        while let Some(Ok(packet)) = framed.next().await {
            match packet.kind {
                PacketType::LOGIN => {
                    let id = if packet.body == self.password { packet.id } else { -1 };
                    if framed
                        .send(Packet::new(id, PacketType::AUTH_RESPONSE, ""))
                        .await
                        .is_err()
                    {
                        return;
                    }
                }
                PacketType::COMMAND => {
                    let command = packet.text().into_owned();
                    self.log.lock().push(command.clone());
                    tokio::time::sleep(self.delay).await;

                    let Some(reply) = (self.respond)(&command) else {
                        return;
                    };
                    if self.send_fragmented(&mut framed, packet.id, &reply).await.is_err() {
                        return;
                    }
                }
                _ => {
                    // Sentinel: vanilla servers answer unknown types like this.
                    let echo = Packet::new(packet.id, PacketType::RESPONSE, "Unknown request 0");
                    if framed.send(echo).await.is_err() {
                        return;
                    }
                }
            }
        }
    }

    async fn send_fragmented(
        &self,
        framed: &mut Framed<TcpStream, RconCodec>,
        id: i32,
        reply: &str,
    ) -> Result<(), rcon_proto::ProtocolError> {
        if reply.is_empty() {
            return framed.send(Packet::new(id, PacketType::RESPONSE, "")).await;
        }

        for chunk in reply.as_bytes().chunks(self.fragment) {
            let packet = if self.lossy {
                Packet::new(id, PacketType::RESPONSE, String::from_utf8_lossy(chunk).as_bytes())
            } else {
                Packet::new(id, PacketType::RESPONSE, chunk)
            };
            framed.send(packet).await?;
            tokio::task::yield_now().await;
        }
        Ok(())
    }
}
