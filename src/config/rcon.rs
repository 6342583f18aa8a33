//! RCON endpoint configuration.

use serde::Deserialize;
use std::time::Duration;

use super::defaults::{
    default_command_timeout, default_connect_timeout, default_rcon_host, default_rcon_port,
};
use crate::rcon::BridgeTimeouts;

/// RCON endpoint settings.
#[derive(Clone, Deserialize)]
pub struct RconConfig {
    /// Server host (default: "127.0.0.1").
    #[serde(default = "default_rcon_host")]
    pub host: String,
    /// RCON port (default: 25575).
    #[serde(default = "default_rcon_port")]
    pub port: u16,
    /// RCON password. `MCLINK_RCON_PASSWORD` overrides it.
    #[serde(default)]
    pub password: String,
    /// Seconds allowed for connect plus login (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Seconds allowed per command (default: 10).
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

impl RconConfig {
    pub fn timeouts(&self) -> BridgeTimeouts {
        BridgeTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            command: Duration::from_secs(self.command_timeout_secs),
        }
    }
}

impl std::fmt::Debug for RconConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RconConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("command_timeout_secs", &self.command_timeout_secs)
            .finish()
    }
}
