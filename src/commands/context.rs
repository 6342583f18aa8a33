//! Handler interface and invocation context.

use super::registry::Registry;
use crate::auth::PermissionLevel;
use crate::chat::ChatUser;
use crate::error::HandlerResult;
use crate::rcon::RconBridge;
use async_trait::async_trait;

/// Everything a handler gets to work with for one command invocation.
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    /// The RCON session.
    pub bridge: &'a RconBridge,
    /// Whitespace-split arguments after the command name.
    pub args: &'a [String],
    /// User who sent the command.
    pub user: &'a ChatUser,
    /// The user's resolved permission level.
    pub level: PermissionLevel,
    /// The command table, for handlers that describe other commands.
    pub registry: &'a Registry,
}

/// A command handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, inv: Invocation<'_>) -> HandlerResult;
}

/// Normalized command result shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub success: bool,
    pub message: String,
}

impl Reply {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
