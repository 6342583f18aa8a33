//! Command registry.
//!
//! The `Registry` maps command names to handlers, required levels and help
//! text, and keeps per-command usage counters. Iteration follows
//! registration order so help output is stable.

use super::context::Handler;
use crate::auth::PermissionLevel;
use crate::error::RegistryError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// A registered command.
pub struct Command {
    pub name: String,
    pub level: PermissionLevel,
    pub help: String,
    handler: Box<dyn Handler>,
    uses: AtomicU64,
}

impl Command {
    fn new(name: String, level: PermissionLevel, handler: Box<dyn Handler>, help: String) -> Self {
        Self {
            name,
            level,
            help,
            handler,
            uses: AtomicU64::new(0),
        }
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    /// Number of authorized invocations so far.
    pub fn uses(&self) -> u64 {
        self.uses.load(Ordering::Relaxed)
    }

    pub(crate) fn record_use(&self) {
        self.uses.fetch_add(1, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// Registry of command handlers.
#[derive(Default)]
pub struct Registry {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any command of the same name.
    ///
    /// A replaced command keeps its position in listing order; its old
    /// handler and counters are dropped.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        level: PermissionLevel,
        handler: impl Handler + 'static,
        help: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        self.insert(Command::new(name, level, Box::new(handler), help.into()));
        Ok(())
    }

    /// Register a built-in command under a fixed name.
    pub(crate) fn builtin(
        &mut self,
        name: &'static str,
        level: PermissionLevel,
        handler: impl Handler + 'static,
        help: &'static str,
    ) {
        debug_assert!(!name.is_empty());
        self.insert(Command::new(name.to_string(), level, Box::new(handler), help.to_string()));
    }

    fn insert(&mut self, command: Command) {
        let level = command.level;
        match self.index.get(&command.name) {
            Some(&slot) => {
                debug!(command = %command.name, %level, "Replacing command");
                self.commands[slot] = command;
            }
            None => {
                debug!(command = %command.name, %level, "Registering command");
                self.index.insert(command.name.clone(), self.commands.len());
                self.commands.push(command);
            }
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&slot| &self.commands[slot])
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Commands a user at `level` may run, in registration order.
    pub fn available_to(&self, level: PermissionLevel) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(move |c| level >= c.level)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Usage counts of commands that have been run, most used first.
    pub fn usage_stats(&self) -> Vec<(&str, u64)> {
        let mut stats: Vec<_> = self
            .commands
            .iter()
            .map(|c| (c.name.as_str(), c.uses()))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1));
        stats
    }
}
