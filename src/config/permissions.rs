//! Role mappings and config-defined commands.

use serde::Deserialize;

use crate::auth::PermissionLevel;
use crate::chat::RoleId;

/// Maps a chat role to a permission level.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleBlock {
    pub id: RoleId,
    pub level: PermissionLevel,
}

/// A command forwarded to RCON.
///
/// `rcon` is the command template; `{args}` in it is replaced by the
/// arguments, otherwise they are appended.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandBlock {
    pub name: String,
    #[serde(default)]
    pub level: PermissionLevel,
    pub rcon: String,
    #[serde(default)]
    pub help: String,
}
