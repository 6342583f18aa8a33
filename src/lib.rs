//! mclink - Discord to Minecraft: Java Edition RCON link.
//!
//! Chat users send prefixed commands; the link resolves their permission
//! level from guild roles, dispatches the command and relays the RCON
//! server's response back into the channel.
//!
//! - [`Link`]: the engine owning the command registry, the permission
//!   authority and the RCON bridge
//! - [`chat::ChatSession`]: adapter between a chat transport and the engine
//! - [`rcon::RconBridge`]: the single RCON session

pub mod auth;
pub mod chat;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod link;
pub mod metrics;
pub mod rcon;
pub mod telemetry;

pub use link::Link;
