//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("discord.token is required")]
    MissingToken,
    #[error("discord.guild_id is required")]
    MissingGuildId,
    #[error("discord.prefix must not be empty")]
    EmptyPrefix,
    #[error("rcon.host is required")]
    MissingRconHost,
    #[error("rcon.port must not be 0")]
    InvalidRconPort,
    #[error("rcon.password is required")]
    MissingRconPassword,
    #[error("rcon.{0} must be at least 1")]
    InvalidTimeout(&'static str),
    #[error("command #{0} has an empty name")]
    EmptyCommandName(usize),
    #[error("command name '{0}' contains whitespace")]
    CommandNameWhitespace(String),
    #[error("command '{0}' is defined more than once")]
    DuplicateCommand(String),
    #[error("command '{0}' is built in and cannot be redefined")]
    ReservedCommand(String),
    #[error("command '{0}' has an empty rcon template")]
    EmptyRconTemplate(String),
}

/// Names of built-in commands.
const RESERVED: &[&str] = &["help"];

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Discord
    if config.discord.token.trim().is_empty() {
        errors.push(ValidationError::MissingToken);
    }
    if config.discord.guild_id == 0 {
        errors.push(ValidationError::MissingGuildId);
    }
    if config.discord.prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix);
    }

    // RCON
    if config.rcon.host.trim().is_empty() {
        errors.push(ValidationError::MissingRconHost);
    }
    if config.rcon.port == 0 {
        errors.push(ValidationError::InvalidRconPort);
    }
    if config.rcon.password.is_empty() {
        errors.push(ValidationError::MissingRconPassword);
    }
    if config.rcon.connect_timeout_secs == 0 {
        errors.push(ValidationError::InvalidTimeout("connect_timeout_secs"));
    }
    if config.rcon.command_timeout_secs == 0 {
        errors.push(ValidationError::InvalidTimeout("command_timeout_secs"));
    }

    // Commands
    let mut seen = HashSet::new();
    for (index, command) in config.commands.iter().enumerate() {
        let name = command.name.as_str();
        if name.is_empty() {
            errors.push(ValidationError::EmptyCommandName(index));
            continue;
        }
        if name.chars().any(char::is_whitespace) {
            errors.push(ValidationError::CommandNameWhitespace(name.to_string()));
        }
        if RESERVED.contains(&name) {
            errors.push(ValidationError::ReservedCommand(name.to_string()));
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateCommand(name.to_string()));
        }
        if command.rcon.trim().is_empty() {
            errors.push(ValidationError::EmptyRconTemplate(name.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
