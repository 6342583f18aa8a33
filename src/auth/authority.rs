//! Permission Authority - maps chat users to permission levels.
//!
//! The authority holds the role → level table and the bot admin list. It is
//! the only place that decides what a user may do: handlers never inspect
//! roles themselves. Every decision is logged for audit.
//!
//! Resolution works from the role snapshot carried by [`ChatUser`]; the
//! authority never talks to the chat platform. A user the platform could not
//! find arrives with no roles and resolves to [`PermissionLevel::DEFAULT`].

use super::level::PermissionLevel;
use crate::chat::{ChatUser, RoleId, UserId};
use dashmap::{DashMap, DashSet};
use tracing::{debug, trace};

/// Role and admin based permission resolver.
#[derive(Debug, Default)]
pub struct PermissionAuthority {
    roles: DashMap<RoleId, PermissionLevel>,
    admins: DashSet<UserId>,
}

impl PermissionAuthority {
    /// Create an empty authority. Everyone resolves to `DEFAULT`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level a role grants. Re-registering a role replaces its level.
    pub fn register_role(&self, role: RoleId, level: PermissionLevel) {
        if let Some(previous) = self.roles.insert(role, level) {
            debug!(role, %previous, %level, "Role permission replaced");
        } else {
            debug!(role, %level, "Role permission registered");
        }
    }

    /// Mark a user as bot admin. Admins resolve to [`PermissionLevel::OWNER`].
    pub fn register_admin(&self, user: UserId) {
        if self.admins.insert(user) {
            debug!(user, "Bot admin registered");
        }
    }

    /// Level a role grants, if mapped.
    pub fn role_level(&self, role: RoleId) -> Option<PermissionLevel> {
        self.roles.get(&role).map(|entry| *entry.value())
    }

    /// Whether a user is on the bot admin list.
    pub fn is_admin(&self, user: UserId) -> bool {
        self.admins.contains(&user)
    }

    /// Effective level of a user: the highest level among their mapped roles,
    /// `OWNER` for bot admins, `DEFAULT` otherwise.
    pub fn resolve(&self, user: &ChatUser) -> PermissionLevel {
        if self.is_admin(user.id) {
            return PermissionLevel::OWNER;
        }

        user.roles
            .iter()
            .filter_map(|role| self.role_level(*role))
            .fold(PermissionLevel::DEFAULT, PermissionLevel::max)
    }

    /// Check a user against a required level, logging the decision.
    pub fn authorize(&self, user: &ChatUser, required: PermissionLevel) -> bool {
        let level = self.resolve(user);
        if level >= required {
            trace!(user = %user.name, uid = user.id, %level, %required, "permission granted");
            true
        } else {
            debug!(user = %user.name, uid = user.id, %level, %required, "permission denied");
            false
        }
    }
}
