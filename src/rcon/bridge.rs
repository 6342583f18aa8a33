//! RCON session bridge.
//!
//! State machine: `Disconnected --connect--> Connected --close--> Disconnected`.
//! A failed request also drops back to `Disconnected`, since the stream may
//! no longer be in step with the server.

use crate::error::BridgeError;
use rcon_proto::{ProtocolError, RconTransport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{Instrument, debug, info, warn};

/// Text returned by [`RconBridge::execute`] while no session is open.
pub const NOT_CONNECTED: &str = "RCON is not connected";

/// Connection state of the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Disconnected,
    Connected,
}

/// Upper bounds on RCON operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeTimeouts {
    /// TCP connect plus login.
    pub connect: Duration,
    /// One command round trip.
    pub command: Duration,
}

impl Default for BridgeTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            command: Duration::from_secs(10),
        }
    }
}

/// Owner of the RCON session.
///
/// All access to the socket goes through one async mutex, so concurrent
/// [`execute`](Self::execute) calls run one after another and their
/// request/response bytes never interleave.
pub struct RconBridge {
    session: Mutex<Option<RconTransport>>,
    connected: AtomicBool,
    timeouts: BridgeTimeouts,
}

impl Default for RconBridge {
    fn default() -> Self {
        Self::new(BridgeTimeouts::default())
    }
}

impl RconBridge {
    /// Create a disconnected bridge.
    pub fn new(timeouts: BridgeTimeouts) -> Self {
        Self {
            session: Mutex::new(None),
            connected: AtomicBool::new(false),
            timeouts,
        }
    }

    pub fn timeouts(&self) -> BridgeTimeouts {
        self.timeouts
    }

    pub fn state(&self) -> BridgeState {
        if self.is_connected() {
            BridgeState::Connected
        } else {
            BridgeState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Open and authenticate the RCON session.
    ///
    /// On any failure the bridge stays disconnected. Calling this while a
    /// session is open is rejected with [`BridgeError::AlreadyConnected`].
    pub async fn connect(&self, host: &str, port: u16, password: &str) -> Result<(), BridgeError> {
        let mut session = self.session.lock().await;
        if session.is_some() {
            return Err(BridgeError::AlreadyConnected);
        }

        let addr = format!("{host}:{port}");
        info!(%addr, "Connecting to RCON");

        let attempt = async {
            let mut transport = RconTransport::connect(addr.as_str())
                .await
                .map_err(|source| BridgeError::Connect {
                    addr: addr.clone(),
                    source,
                })?;

            if transport.login(password).await? {
                Ok(transport)
            } else {
                Err(BridgeError::AuthRejected)
            }
        };

        let transport = match timeout(self.timeouts.connect, attempt).await {
            Ok(Ok(transport)) => transport,
            Ok(Err(e)) => {
                warn!(%addr, error = %e, "RCON connect failed");
                return Err(e);
            }
            Err(_) => {
                warn!(%addr, after = ?self.timeouts.connect, "RCON connect timed out");
                return Err(BridgeError::Timeout {
                    operation: "connect",
                    after: self.timeouts.connect,
                });
            }
        };

        *session = Some(transport);
        self.set_connected(true);
        info!(%addr, "RCON connected");
        Ok(())
    }

    /// Run a console command and return the server's reply.
    ///
    /// While disconnected this returns [`NOT_CONNECTED`] as ordinary text.
    /// A command too large to encode fails without touching the session;
    /// any other I/O, protocol or timeout failure closes it.
    pub async fn execute(&self, command: &str) -> Result<String, BridgeError> {
        let mut session = self.session.lock().await;
        let Some(transport) = session.as_mut() else {
            crate::metrics::record_rcon_request("not_connected");
            return Ok(NOT_CONNECTED.to_string());
        };

        let result = timeout(self.timeouts.command, transport.command(command))
            .instrument(crate::telemetry::spans::rcon(command))
            .await;

        match result {
            Ok(Ok(output)) => {
                crate::metrics::record_rcon_request("ok");
                Ok(output)
            }
            Ok(Err(e @ (ProtocolError::BodyTooLong { .. } | ProtocolError::IllegalNul(_)))) => {
                debug!(error = %e, "RCON command rejected before sending");
                crate::metrics::record_rcon_request("rejected");
                Err(e.into())
            }
            Ok(Err(e)) => {
                warn!(error = %e, "RCON request failed, dropping session");
                crate::metrics::record_rcon_request("error");
                *session = None;
                self.set_connected(false);
                Err(e.into())
            }
            Err(_) => {
                warn!(after = ?self.timeouts.command, "RCON request timed out, dropping session");
                crate::metrics::record_rcon_request("timeout");
                *session = None;
                self.set_connected(false);
                Err(BridgeError::Timeout {
                    operation: "command",
                    after: self.timeouts.command,
                })
            }
        }
    }

    /// Close the session. Does nothing when already disconnected.
    pub async fn close(&self) {
        let Some(transport) = self.session.lock().await.take() else {
            return;
        };
        self.set_connected(false);

        if let Err(e) = transport.close().await {
            debug!(error = %e, "Error while closing RCON connection");
        }
        info!("RCON disconnected");
    }

    fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
        crate::metrics::set_rcon_connected(connected);
    }
}
