//! Config-defined commands forwarded to RCON.

use super::context::{Handler, Invocation, Reply};
use crate::error::HandlerResult;
use async_trait::async_trait;

/// Placeholder replaced by the invocation's arguments.
pub const ARGS_PLACEHOLDER: &str = "{args}";

/// Shown instead of an empty RCON reply.
pub const NO_OUTPUT: &str = "(no output)";

/// Sends a command template to the RCON server and relays the response.
///
/// The template may contain `{args}`, which is replaced by the
/// space-joined arguments. Without it, arguments are appended after a space.
#[derive(Debug, Clone)]
pub struct RconPassthrough {
    template: String,
}

impl RconPassthrough {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Build the RCON command line for the given arguments.
    pub fn render(&self, args: &[String]) -> String {
        let joined = args.join(" ");
        if self.template.contains(ARGS_PLACEHOLDER) {
            self.template
                .replace(ARGS_PLACEHOLDER, &joined)
                .trim_end()
                .to_string()
        } else if joined.is_empty() {
            self.template.clone()
        } else {
            format!("{} {}", self.template, joined)
        }
    }
}

#[async_trait]
impl Handler for RconPassthrough {
    async fn handle(&self, inv: Invocation<'_>) -> HandlerResult {
        let output = inv.bridge.execute(&self.render(inv.args)).await?;
        if output.is_empty() {
            Ok(Some(Reply::success(NO_OUTPUT)))
        } else {
            Ok(Some(Reply::success(output)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_appends_args() {
        let cmd = RconPassthrough::new("whitelist add");
        assert_eq!(cmd.render(&args(&["Notch"])), "whitelist add Notch");
        assert_eq!(cmd.render(&[]), "whitelist add");
    }

    #[test]
    fn test_render_placeholder() {
        let cmd = RconPassthrough::new("tellraw @a {args}");
        assert_eq!(cmd.render(&args(&["hello", "world"])), "tellraw @a hello world");
        assert_eq!(cmd.render(&[]), "tellraw @a");

        let cmd = RconPassthrough::new("say [{args}] from discord");
        assert_eq!(cmd.render(&args(&["hi"])), "say [hi] from discord");
    }
}
