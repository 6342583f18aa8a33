//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: The top-level [`Config`] and loading
//! - [`discord`]: Chat side settings (token, guild, prefix, presence)
//! - [`rcon`]: RCON endpoint and timeouts
//! - [`permissions`]: Role mappings and config-defined commands
//! - [`validation`]: Startup checks

mod defaults;
mod discord;
mod permissions;
mod rcon;
mod types;
pub mod validation;

pub use discord::DiscordConfig;
pub use permissions::{CommandBlock, RoleBlock};
pub use rcon::RconConfig;
pub use types::{Config, ConfigError, ENV_DISCORD_TOKEN, ENV_RCON_PASSWORD};
pub use validation::{ValidationError, validate};
