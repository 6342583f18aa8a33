//! Discord transport.
//!
//! Adapts serenity's gateway events to [`ChatSession`] and implements
//! [`ChatTransport`] on top of serenity's HTTP client.

use super::{ChannelId, ChatSession, ChatTransport, ChatUser, InboundMessage, RoleId, UserId};
use crate::config::DiscordConfig;
use crate::error::ChatError;
use async_trait::async_trait;
use serenity::all::{
    ActivityData, ChannelId as DiscordChannelId, Client, ConnectionStage, Context, CreateMessage,
    EventHandler, GatewayIntents, GuildId, Http, Message, OnlineStatus, Ready, ResumedEvent,
    ShardStageUpdateEvent, UserId as DiscordUserId,
};
use std::sync::Arc;
use tracing::debug;

/// Intents the link needs: guild and direct messages with their content.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// [`ChatTransport`] backed by the Discord REST API.
#[derive(Clone)]
pub struct DiscordTransport {
    http: Arc<Http>,
    guild: GuildId,
}

impl DiscordTransport {
    pub fn new(http: Arc<Http>, guild_id: u64) -> Self {
        Self {
            http,
            guild: GuildId::new(guild_id),
        }
    }
}

#[async_trait]
impl ChatTransport for DiscordTransport {
    async fn send_to_channel(&self, channel: ChannelId, text: &str) -> Result<(), ChatError> {
        DiscordChannelId::new(channel)
            .send_message(&*self.http, CreateMessage::new().content(text))
            .await
            .map(|_| ())
            .map_err(|e| ChatError::Send {
                channel,
                reason: e.to_string(),
            })
    }

    async fn role_memberships(&self, user: UserId) -> Vec<RoleId> {
        match self.guild.member(self.http.as_ref(), DiscordUserId::new(user)).await {
            Ok(member) => member.roles.iter().map(|r| r.get()).collect(),
            Err(e) => {
                debug!(uid = user, guild = %self.guild, error = %e, "User is not a guild member");
                Vec::new()
            }
        }
    }
}

/// Gateway event handler feeding a [`ChatSession`].
pub struct DiscordHandler {
    session: Arc<ChatSession>,
    guild_id: u64,
    presence: String,
}

impl DiscordHandler {
    pub fn new(session: Arc<ChatSession>, guild_id: u64, presence: impl Into<String>) -> Self {
        Self {
            session,
            guild_id,
            presence: presence.into(),
        }
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        ctx.set_presence(
            Some(ActivityData::playing(self.presence.clone())),
            OnlineStatus::Online,
        );
        self.session.on_ready(ready.user.id.get(), &ready.user.name);
    }

    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        self.session.on_connect();
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        match event.new {
            ConnectionStage::Connected => self.session.on_connect(),
            ConnectionStage::Disconnected => self.session.on_disconnect(),
            _ => {}
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let transport = DiscordTransport::new(ctx.http.clone(), self.guild_id);
        let inbound = InboundMessage {
            author: ChatUser {
                id: msg.author.id.get(),
                name: msg.author.name.clone(),
                roles: Vec::new(),
                bot: msg.author.bot,
            },
            content: msg.content,
            channel: msg.channel_id.get(),
        };
        self.session.on_message(&transport, inbound).await;
    }
}

/// Build the Discord client for `session`.
pub async fn client(config: &DiscordConfig, session: Arc<ChatSession>) -> serenity::Result<Client> {
    let handler = DiscordHandler::new(session, config.guild_id, config.presence.clone());
    Client::builder(&config.token, intents())
        .event_handler(handler)
        .await
}
