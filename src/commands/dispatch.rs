//! Command dispatch.
//!
//! Parses raw input, looks up the command, authorizes the invoking user and
//! runs the handler. Every path ends in an [`Outcome`]; nothing raised by a
//! handler, panics included, escapes to the caller.

use super::context::{Invocation, Reply};
use crate::auth::PermissionLevel;
use crate::chat::ChatUser;
use crate::error::{HandlerError, panic_message};
use crate::link::Link;
use crate::telemetry::{CommandTimer, spans};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::{Instrument, debug, error};

pub const PERMISSION_DENIED: &str = "You don't have permission for that command.";
pub const NO_RESPONSE: &str = "No response for command";

/// Result of dispatching one line of input.
#[derive(Debug)]
pub enum Outcome {
    /// The handler produced a reply.
    Completed(Reply),
    /// The handler ran and had nothing to say.
    NoResponse,
    /// No command with this name is registered.
    UnknownCommand(String),
    /// The user's level is below the command's.
    PermissionDenied {
        command: String,
        required: PermissionLevel,
        actual: PermissionLevel,
    },
    /// The handler failed or panicked.
    Faulted { command: String, error: HandlerError },
}

impl Outcome {
    /// Flatten into the `(success, message)` pair shown to the user.
    pub fn into_reply(self) -> Reply {
        match self {
            Self::Completed(reply) => reply,
            Self::NoResponse => Reply::success(NO_RESPONSE),
            Self::UnknownCommand(name) => Reply::failure(format!("Unknown command '{name}'")),
            Self::PermissionDenied { .. } => Reply::failure(PERMISSION_DENIED),
            Self::Faulted { command, error } => Reply::failure(format!(
                "An error occurred while trying to run the command '{command}': {error}"
            )),
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed(reply) if reply.success => "success",
            Self::Completed(_) => "failure",
            Self::NoResponse => "no_response",
            Self::UnknownCommand(_) => "unknown_command",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::Faulted { .. } => "faulted",
        }
    }
}

impl Link {
    /// Dispatch a line of input (prefix already stripped) for `user`.
    pub async fn dispatch(&self, input: &str, user: &ChatUser) -> Outcome {
        let mut tokens = input.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let Some(command) = self.registry().lookup(name) else {
            debug!(command = %name, user = %user.name, "Unknown command");
            crate::metrics::record_command_outcome(crate::metrics::UNKNOWN_COMMAND, "unknown_command");
            return Outcome::UnknownCommand(name.to_string());
        };

        let level = self.resolve(user);
        if level < command.level {
            debug!(
                command = %name,
                user = %user.name,
                uid = user.id,
                %level,
                required = %command.level,
                "Permission denied"
            );
            crate::metrics::record_command_outcome(name, "permission_denied");
            return Outcome::PermissionDenied {
                command: name.to_string(),
                required: command.level,
                actual: level,
            };
        }

        command.record_use();
        let _timer = CommandTimer::new(name);

        let inv = Invocation {
            bridge: self.bridge(),
            args: &args,
            user,
            level,
            registry: self.registry(),
        };

        let result = AssertUnwindSafe(command.handler().handle(inv))
            .catch_unwind()
            .instrument(spans::command(name, &user.name, user.id))
            .await
            .unwrap_or_else(|payload| Err(HandlerError::Panicked(panic_message(payload.as_ref()))));

        let outcome = match result {
            Ok(Some(reply)) => Outcome::Completed(reply),
            Ok(None) => Outcome::NoResponse,
            Err(error) => {
                error!(
                    command = %name,
                    user = %user.name,
                    uid = user.id,
                    args = ?args,
                    code = error.error_code(),
                    error = %error,
                    "Command handler failed"
                );
                Outcome::Faulted {
                    command: name.to_string(),
                    error,
                }
            }
        };

        crate::metrics::record_command_outcome(name, outcome.label());
        outcome
    }

    /// Dispatch and flatten the outcome into a reply.
    pub async fn call(&self, input: &str, user: &ChatUser) -> Reply {
        self.dispatch(input, user).await.into_reply()
    }
}
