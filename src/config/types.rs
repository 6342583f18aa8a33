//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::discord::DiscordConfig;
use super::permissions::{CommandBlock, RoleBlock};
use super::rcon::RconConfig;
use crate::chat::UserId;

/// Overrides `discord.token`.
pub const ENV_DISCORD_TOKEN: &str = "MCLINK_DISCORD_TOKEN";
/// Overrides `rcon.password`.
pub const ENV_RCON_PASSWORD: &str = "MCLINK_RCON_PASSWORD";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Link configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Prometheus metrics HTTP port (default: 9090, 0 disables).
    pub metrics_port: Option<u16>,
    /// Users granted owner level regardless of roles.
    #[serde(default)]
    pub admins: Vec<UserId>,
    pub discord: DiscordConfig,
    pub rcon: RconConfig,
    /// Role to level mappings.
    #[serde(default, rename = "role")]
    pub roles: Vec<RoleBlock>,
    /// Commands forwarded to RCON.
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandBlock>,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment
    /// overrides for secrets.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Replace secrets with values from `lookup` where present and non-empty.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(ENV_DISCORD_TOKEN).filter(|v| !v.is_empty()) {
            self.discord.token = token;
        }
        if let Some(password) = lookup(ENV_RCON_PASSWORD).filter(|v| !v.is_empty()) {
            self.rcon.password = password;
        }
    }
}
