//! RCON side of the link.
//!
//! The [`RconBridge`] owns the single RCON session and exposes
//! [`RconBridge::execute`] to command handlers. Wire handling lives in the
//! `rcon-proto` crate.

pub mod bridge;

pub use bridge::{BridgeState, BridgeTimeouts, NOT_CONNECTED, RconBridge};
