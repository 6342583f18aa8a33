//! Chat session adapter.
//!
//! Turns inbound chat messages into dispatcher calls and delivers the
//! replies. Faults anywhere in that pipeline are caught here, logged and
//! reported into the originating channel; they never end the session.

use super::{ChannelId, ChatTransport, InboundMessage, UserId, split_message};
use crate::commands::passthrough::NO_OUTPUT;
use crate::error::{ChatError, panic_message};
use crate::link::Link;
use crate::telemetry::spans;
use futures_util::FutureExt;
use parking_lot::RwLock;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, warn};

/// Marker put in front of unsuccessful replies.
pub const FAIL_MARKER: &str = "[FAIL] ";

/// Default command prefix.
pub const DEFAULT_PREFIX: &str = "!";

/// Adapter between a chat transport and the [`Link`].
pub struct ChatSession {
    link: Arc<Link>,
    prefix: String,
    self_id: RwLock<Option<UserId>>,
}

impl ChatSession {
    pub fn new(link: Arc<Link>, prefix: impl Into<String>) -> Self {
        Self {
            link,
            prefix: prefix.into(),
            self_id: RwLock::new(None),
        }
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Id of the bridge's own chat account, once known.
    pub fn self_id(&self) -> Option<UserId> {
        *self.self_id.read()
    }

    /// The transport finished its handshake as `name`.
    pub fn on_ready(&self, self_id: UserId, name: &str) {
        *self.self_id.write() = Some(self_id);
        info!(user = %name, uid = self_id, "Logged on to chat");
    }

    pub fn on_connect(&self) {
        info!("Chat connection established");
    }

    pub fn on_disconnect(&self) {
        warn!("Chat connection lost");
    }

    /// Command text of a message, with the prefix stripped.
    ///
    /// `None` for messages from the bridge itself, from bots, or without the
    /// prefix.
    pub fn command_input<'a>(&self, message: &'a InboundMessage) -> Option<&'a str> {
        if message.author.bot || self.self_id() == Some(message.author.id) {
            return None;
        }
        message.content.strip_prefix(self.prefix.as_str())
    }

    /// Handle one inbound message.
    pub async fn on_message(&self, transport: &dyn ChatTransport, message: InboundMessage) {
        let Some(input) = self.command_input(&message) else {
            return;
        };

        let span = spans::message(message.channel, &message.author.name);
        let result = AssertUnwindSafe(self.run(transport, &message, input))
            .catch_unwind()
            .instrument(span)
            .await;

        let fault = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        };

        error!(
            input = %input,
            user = %message.author.name,
            uid = message.author.id,
            channel = message.channel,
            error = %fault,
            "Failed to handle chat command"
        );

        let apology = format!(
            ":exclamation: An error occurred while trying to run the command '{input}'.\n\
             Please notify the development team.\n\nException: {fault}"
        );
        if let Err(e) = deliver(transport, message.channel, &apology).await {
            error!(channel = message.channel, error = %e, "Failed to report command fault");
        }
    }

    async fn run(
        &self,
        transport: &dyn ChatTransport,
        message: &InboundMessage,
        input: &str,
    ) -> Result<(), ChatError> {
        let roles = transport.role_memberships(message.author.id).await;
        let user = message.author.clone().with_roles(roles);

        debug!(input = %input, user = %user.name, "Dispatching chat command");
        let reply = self.link.call(input, &user).await;

        // Chat services refuse blank messages
        let text = if reply.message.trim().is_empty() && reply.success {
            NO_OUTPUT.to_string()
        } else if reply.success {
            reply.message
        } else {
            format!("{FAIL_MARKER}{}", reply.message)
        };
        deliver(transport, message.channel, &text).await
    }
}

/// Send `text`, split to the transport's message length limit.
async fn deliver(
    transport: &dyn ChatTransport,
    channel: ChannelId,
    text: &str,
) -> Result<(), ChatError> {
    for chunk in split_message(text, transport.max_message_len()) {
        transport.send_to_channel(channel, &chunk).await?;
    }
    Ok(())
}
