//! Built-in `help` command.

use super::context::{Handler, Invocation, Reply};
use crate::error::HandlerResult;
use async_trait::async_trait;
use std::fmt::Write;

const HEADER: &str = "Hello! I am a Discord -> Minecraft: Java Edition server link!\n\
                      Here are the commands available to you:\n\n";

/// Lists the commands available to the invoking user.
pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, inv: Invocation<'_>) -> HandlerResult {
        let mut text = String::from(HEADER);
        for command in inv.registry.available_to(inv.level) {
            let _ = writeln!(text, "* `{}` - {}", command.name, command.help);
        }
        Ok(Some(Reply::success(text)))
    }
}
