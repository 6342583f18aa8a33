//! The link engine.
//!
//! A [`Link`] owns everything the dispatcher works with: the command
//! registry, the permission authority and the RCON bridge. It is built once
//! at startup and shared by reference with the chat session.

use crate::auth::{PermissionAuthority, PermissionLevel};
use crate::chat::{ChatUser, RoleId, UserId};
use crate::commands::{Handler, HelpHandler, Registry};
use crate::error::RegistryError;
use crate::rcon::RconBridge;

/// Help text of the built-in `help` command.
pub const HELP_TEXT: &str = "Show this help menu";

/// Command registry, permission authority and RCON bridge.
pub struct Link {
    registry: Registry,
    authority: PermissionAuthority,
    bridge: RconBridge,
}

impl Link {
    /// Create a link around `bridge` with only the built-in `help` command.
    pub fn new(bridge: RconBridge) -> Self {
        let mut registry = Registry::new();
        registry.builtin("help", PermissionLevel::DEFAULT, HelpHandler, HELP_TEXT);

        Self {
            registry,
            authority: PermissionAuthority::new(),
            bridge,
        }
    }

    /// Register a command, replacing any existing command of that name.
    pub fn register_command(
        &mut self,
        name: impl Into<String>,
        level: PermissionLevel,
        handler: impl Handler + 'static,
        help: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.registry.register(name, level, handler, help)
    }

    pub fn register_role(&self, role: RoleId, level: PermissionLevel) {
        self.authority.register_role(role, level);
    }

    pub fn register_admin(&self, user: UserId) {
        self.authority.register_admin(user);
    }

    /// Effective permission level of `user`.
    pub fn resolve(&self, user: &ChatUser) -> PermissionLevel {
        self.authority.resolve(user)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn authority(&self) -> &PermissionAuthority {
        &self.authority
    }

    pub fn bridge(&self) -> &RconBridge {
        &self.bridge
    }
}
