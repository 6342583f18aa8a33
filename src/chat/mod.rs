//! Chat side of the link.
//!
//! - [`ChatTransport`]: what the link needs from a chat platform
//! - [`session`]: the [`ChatSession`] adapter turning chat messages into
//!   dispatcher calls
//! - [`discord`]: the Discord implementation of the transport

pub mod discord;
pub mod session;

pub use session::ChatSession;

use crate::error::ChatError;
use async_trait::async_trait;

/// Chat platform user id.
pub type UserId = u64;
/// Chat platform role id.
pub type RoleId = u64;
/// Chat platform channel id.
pub type ChannelId = u64;

/// Message length most chat platforms accept (Discord's limit).
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 2000;

/// Snapshot of the user invoking a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    pub id: UserId,
    pub name: String,
    /// Role memberships at the time of the message. Empty when the user is
    /// not a member of the configured guild.
    pub roles: Vec<RoleId>,
    /// Automated account.
    pub bot: bool,
}

impl ChatUser {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            roles: Vec::new(),
            bot: false,
        }
    }

    pub fn with_roles(mut self, roles: Vec<RoleId>) -> Self {
        self.roles = roles;
        self
    }
}

/// A message received from the chat platform.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub author: ChatUser,
    pub content: String,
    pub channel: ChannelId,
}

/// Capabilities the link consumes from a chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post text to a channel.
    async fn send_to_channel(&self, channel: ChannelId, text: &str) -> Result<(), ChatError>;

    /// Roles the user holds. Empty if the user is not a known member.
    async fn role_memberships(&self, user: UserId) -> Vec<RoleId>;

    /// Longest message the platform accepts, in characters.
    fn max_message_len(&self) -> usize {
        DEFAULT_MAX_MESSAGE_LEN
    }
}

/// Split text into chunks of at most `max_len` characters.
///
/// Prefers breaking after a newline; lines longer than `max_len` are cut at
/// character boundaries. Empty text yields no chunks.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len <= max_len {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= max_len {
            current.push_str(line);
            current_len = line_len;
            continue;
        }

        // Overlong line: hard split
        let mut chars = line.chars().peekable();
        while chars.peek().is_some() {
            let piece: String = chars.by_ref().take(max_len).collect();
            let piece_len = piece.chars().count();
            if piece_len == max_len {
                chunks.push(piece);
            } else {
                current = piece;
                current_len = piece_len;
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
