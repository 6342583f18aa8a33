//! Discord configuration.

use serde::Deserialize;

use super::defaults::{default_prefix, default_presence};

/// Discord bot settings.
#[derive(Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token. `MCLINK_DISCORD_TOKEN` overrides it.
    #[serde(default)]
    pub token: String,
    /// Guild whose roles grant permission levels.
    pub guild_id: u64,
    /// Command prefix (default: "!").
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// "Playing ..." status shown once connected.
    #[serde(default = "default_presence")]
    pub presence: String,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .field("prefix", &self.prefix)
            .field("presence", &self.presence)
            .finish()
    }
}
