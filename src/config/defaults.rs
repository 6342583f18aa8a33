//! Default value functions for configuration.

use crate::chat::session::DEFAULT_PREFIX;

// =============================================================================
// Discord Defaults
// =============================================================================

pub fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

pub fn default_presence() -> String {
    "Minecraft: Java Edition".to_string()
}

// =============================================================================
// RCON Defaults
// =============================================================================

pub fn default_rcon_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_rcon_port() -> u16 {
    25575
}

pub fn default_connect_timeout() -> u64 {
    10
}

pub fn default_command_timeout() -> u64 {
    10
}
