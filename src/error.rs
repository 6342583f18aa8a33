//! Unified error handling for mclink.
//!
//! This module provides the error hierarchy for the link. Only
//! [`BridgeError`] raised while establishing the RCON session is allowed to
//! escape to the process boundary; everything raised while handling chat
//! messages is turned into a chat reply and a log entry.

use rcon_proto::ProtocolError;
use std::any::Any;
use std::time::Duration;
use thiserror::Error;

use crate::chat::ChannelId;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Faults raised by command handlers.
///
/// The dispatcher catches these, logs them and reports them to the invoking
/// user as a failed reply naming the command.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Rcon(#[from] BridgeError),

    #[error("handler panicked: {0}")]
    Panicked(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Rcon(e) => e.error_code(),
            Self::Panicked(_) => "panicked",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type for command handlers.
///
/// `Ok(None)` means the handler ran but had nothing to say.
pub type HandlerResult = Result<Option<crate::commands::Reply>, HandlerError>;

// ============================================================================
// Bridge Errors (RCON session)
// ============================================================================

/// RCON bridge failures.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("an RCON session is already open")]
    AlreadyConnected,

    #[error("failed to connect to RCON at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: ProtocolError,
    },

    #[error("incorrect RCON password")]
    AuthRejected,

    #[error("RCON {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("RCON protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl BridgeError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyConnected => "already_connected",
            Self::Connect { .. } => "connect_failed",
            Self::AuthRejected => "auth_rejected",
            Self::Timeout { .. } => "timeout",
            Self::Protocol(_) => "protocol_error",
        }
    }
}

// ============================================================================
// Chat Errors (transport)
// ============================================================================

/// Chat transport failures.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to send to channel {channel}: {reason}")]
    Send { channel: ChannelId, reason: String },
}

// ============================================================================
// Registry Errors
// ============================================================================

/// Command registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command name must not be empty")]
    EmptyName,
}

/// Extract a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
