//! Telemetry utilities for command timing and tracing spans.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(&self.command, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Span for one chat command.
    pub fn command(name: &str, user: &str, uid: u64) -> Span {
        info_span!("command", name = %name, user = %user, uid = uid)
    }

    /// Span for one RCON round trip.
    pub fn rcon(command: &str) -> Span {
        debug_span!("rcon", command = %command)
    }

    /// Span for one inbound chat message.
    pub fn message(channel: u64, author: &str) -> Span {
        debug_span!("message", channel = channel, author = %author)
    }
}
