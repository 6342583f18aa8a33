//! Recording chat transport.

use async_trait::async_trait;
use mclink::chat::{ChannelId, ChatTransport, RoleId, UserId};
use mclink::error::ChatError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Chat transport that records sent messages.
pub struct MockTransport {
    sent: Mutex<Vec<(ChannelId, String)>>,
    roles: HashMap<UserId, Vec<RoleId>>,
    max_len: usize,
    failing_sends: AtomicUsize,
    panic_on_roles: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            roles: HashMap::new(),
            max_len: 2000,
            failing_sends: AtomicUsize::new(0),
            panic_on_roles: false,
        }
    }

    pub fn with_roles(mut self, user: UserId, roles: &[RoleId]) -> Self {
        self.roles.insert(user, roles.to_vec());
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Make the next `count` sends fail.
    pub fn fail_sends(self, count: usize) -> Self {
        self.failing_sends.store(count, Ordering::SeqCst);
        self
    }

    /// Panic when asked for role memberships.
    pub fn panicking(mut self) -> Self {
        self.panic_on_roles = true;
        self
    }

    pub fn sent(&self) -> Vec<(ChannelId, String)> {
        self.sent.lock().clone()
    }

    /// Texts sent, ignoring channels.
    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().iter().map(|(_, text)| text.clone()).collect()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send_to_channel(&self, channel: ChannelId, text: &str) -> Result<(), ChatError> {
        let failing = self
            .failing_sends
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ChatError::Send {
                channel,
                reason: "boom".to_string(),
            });
        }
        self.sent.lock().push((channel, text.to_string()));
        Ok(())
    }

    async fn role_memberships(&self, user: UserId) -> Vec<RoleId> {
        if self.panic_on_roles {
            panic!("roster unavailable");
        }
        self.roles.get(&user).cloned().unwrap_or_default()
    }

    fn max_message_len(&self) -> usize {
        self.max_len
    }
}
