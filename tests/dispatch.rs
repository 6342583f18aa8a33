//! Dispatcher behavior through the `Link` engine.

mod common;

use common::FakeRcon;
use common::handlers::{Counting, Echo, Failing, Panicking, Refusing, Silent};
use mclink::auth::PermissionLevel;
use mclink::chat::ChatUser;
use mclink::commands::{Outcome, RconPassthrough, Reply};
use mclink::rcon::{NOT_CONNECTED, RconBridge};
use mclink::Link;

const MOD_ROLE: u64 = 100;
const ADMIN_ROLE: u64 = 200;

fn link() -> Link {
    let mut link = Link::new(RconBridge::default());
    link.register_command("list", PermissionLevel::DEFAULT, Counting::new("0 players"), "List players")
        .unwrap();
    link.register_command("kick", PermissionLevel::MODERATOR, Echo, "Kick a player")
        .unwrap();
    link.register_command("ban", PermissionLevel::ADMIN, Echo, "Ban a player")
        .unwrap();
    link.register_command("stop", PermissionLevel::OWNER, Echo, "Stop the server")
        .unwrap();
    link.register_role(MOD_ROLE, PermissionLevel::MODERATOR);
    link.register_role(ADMIN_ROLE, PermissionLevel::ADMIN);
    link
}

fn user(roles: &[u64]) -> ChatUser {
    ChatUser::new(1, "steve").with_roles(roles.to_vec())
}

#[tokio::test]
async fn test_unknown_command() {
    let link = link();
    assert_eq!(
        link.call("frobnicate", &user(&[])).await,
        Reply::failure("Unknown command 'frobnicate'")
    );
    assert_eq!(link.call("", &user(&[])).await, Reply::failure("Unknown command ''"));
    assert_eq!(link.call("   ", &user(&[])).await, Reply::failure("Unknown command ''"));
    assert_eq!(
        link.call("LIST", &user(&[])).await,
        Reply::failure("Unknown command 'LIST'")
    );
}

#[tokio::test]
async fn test_arguments_are_whitespace_split() {
    let link = link();
    let reply = link.call("kick  Notch   \"bad  boy\"", &user(&[MOD_ROLE])).await;
    assert_eq!(reply, Reply::success("Notch|\"bad|boy\""));
}

#[tokio::test]
async fn test_permission_gate_skips_handler() {
    let mut link = link();
    let guarded = Counting::new("done");
    link.register_command("op", PermissionLevel::ADMIN, guarded.clone(), "")
        .unwrap();

    let outcome = link.dispatch("op Notch", &user(&[MOD_ROLE])).await;
    assert!(matches!(
        outcome,
        Outcome::PermissionDenied {
            required: PermissionLevel::ADMIN,
            actual: PermissionLevel::MODERATOR,
            ..
        }
    ));
    assert_eq!(
        outcome.into_reply(),
        Reply::failure("You don't have permission for that command.")
    );
    assert_eq!(guarded.calls(), 0);

    assert_eq!(link.call("op Notch", &user(&[ADMIN_ROLE])).await, Reply::success("done"));
    assert_eq!(guarded.calls(), 1);
}

#[tokio::test]
async fn test_help_lists_exactly_available_commands() {
    let link = link();

    let help = link.call("help", &user(&[MOD_ROLE])).await;
    assert!(help.success);
    assert_eq!(
        help.message,
        "Hello! I am a Discord -> Minecraft: Java Edition server link!\n\
         Here are the commands available to you:\n\n\
         * `help` - Show this help menu\n\
         * `list` - List players\n\
         * `kick` - Kick a player\n"
    );

    let default_help = link.call("help", &user(&[])).await.message;
    assert!(default_help.contains("`list`"));
    assert!(!default_help.contains("`kick`"));
    assert!(!default_help.contains("`ban`"));
    assert!(!default_help.contains("`stop`"));
}

#[tokio::test]
async fn test_help_is_idempotent() {
    let link = link();
    let u = user(&[ADMIN_ROLE]);
    let first = link.call("help", &u).await;
    let second = link.call("help", &u).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_admin_resolves_to_owner() {
    let link = link();
    link.register_admin(1);

    let help = link.call("help", &user(&[])).await.message;
    assert!(help.contains("`stop`"));
    assert_eq!(link.call("stop now", &user(&[])).await, Reply::success("now"));
}

#[tokio::test]
async fn test_fault_isolation() {
    let mut link = link();
    link.register_command("broken", PermissionLevel::DEFAULT, Failing, "")
        .unwrap();
    link.register_command("boom", PermissionLevel::DEFAULT, Panicking, "")
        .unwrap();

    let reply = link.call("broken", &user(&[])).await;
    assert_eq!(
        reply,
        Reply::failure(
            "An error occurred while trying to run the command 'broken': internal error: disk on fire"
        )
    );

    let outcome = link.dispatch("boom", &user(&[])).await;
    assert_eq!(outcome.label(), "faulted");
    let reply = outcome.into_reply();
    assert!(!reply.success);
    assert!(reply.message.contains("'boom'"));
    assert!(reply.message.contains("handler exploded"));

    assert_eq!(link.call("list", &user(&[])).await, Reply::success("0 players"));
}

#[tokio::test]
async fn test_reply_normalization() {
    let mut link = link();
    link.register_command("quiet", PermissionLevel::DEFAULT, Silent, "")
        .unwrap();
    link.register_command("nope", PermissionLevel::DEFAULT, Refusing, "")
        .unwrap();

    assert_eq!(
        link.call("quiet", &user(&[])).await,
        Reply::success("No response for command")
    );
    assert_eq!(link.call("nope", &user(&[])).await, Reply::failure("not today"));
}

#[tokio::test]
async fn test_reregistration_overwrites_in_place() {
    let mut link = link();
    link.register_command("list", PermissionLevel::MODERATOR, Counting::new("new"), "Replaced")
        .unwrap();

    assert_eq!(
        link.call("list", &user(&[])).await,
        Reply::failure("You don't have permission for that command.")
    );
    assert_eq!(link.call("list", &user(&[MOD_ROLE])).await, Reply::success("new"));

    let names: Vec<_> = link.registry().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["help", "list", "kick", "ban", "stop"]);
}

#[tokio::test]
async fn test_usage_counts_only_authorized_calls() {
    let link = link();
    link.call("list", &user(&[])).await;
    link.call("list", &user(&[])).await;
    link.call("kick x", &user(&[])).await;
    link.call("kick x", &user(&[MOD_ROLE])).await;

    assert_eq!(link.registry().usage_stats(), vec![("list", 2), ("kick", 1)]);
}

#[tokio::test]
async fn test_passthrough_without_rcon_returns_sentinel() {
    let mut link = Link::new(RconBridge::default());
    link.register_command("list", PermissionLevel::DEFAULT, RconPassthrough::new("list"), "")
        .unwrap();

    assert_eq!(link.call("list", &user(&[])).await, Reply::success(NOT_CONNECTED));
}

#[tokio::test]
async fn test_passthrough_through_rcon() {
    let server = FakeRcon::new("pw").respond(|cmd| match cmd {
        "list" => Some("There are 0 of a max of 20 players online: ".to_string()),
        "save-all" => Some(String::new()),
        other => Some(format!("ran {other}")),
    });
    let addr = server.start().await;

    let mut link = Link::new(RconBridge::default());
    link.register_command("list", PermissionLevel::DEFAULT, RconPassthrough::new("list"), "")
        .unwrap();
    link.register_command("save", PermissionLevel::DEFAULT, RconPassthrough::new("save-all"), "")
        .unwrap();
    link.register_command(
        "whitelist",
        PermissionLevel::DEFAULT,
        RconPassthrough::new("whitelist add {args}"),
        "",
    )
    .unwrap();
    link.bridge().connect("127.0.0.1", addr.port(), "pw").await.unwrap();

    let u = user(&[]);
    assert_eq!(
        link.call("list", &u).await,
        Reply::success("There are 0 of a max of 20 players online: ")
    );
    assert_eq!(link.call("save", &u).await, Reply::success("(no output)"));
    assert_eq!(
        link.call("whitelist Notch", &u).await,
        Reply::success("ran whitelist add Notch")
    );
    assert_eq!(server.commands(), vec!["list", "save-all", "whitelist add Notch"]);
}

#[tokio::test]
async fn test_rcon_failure_becomes_fault() {
    let server = FakeRcon::new("pw").respond(|_| None);
    let addr = server.start().await;

    let mut link = Link::new(RconBridge::default());
    link.register_command("stop", PermissionLevel::DEFAULT, RconPassthrough::new("stop"), "")
        .unwrap();
    link.bridge().connect("127.0.0.1", addr.port(), "pw").await.unwrap();

    let reply = link.call("stop", &user(&[])).await;
    assert!(!reply.success);
    assert!(reply
        .message
        .starts_with("An error occurred while trying to run the command 'stop': "));

    assert_eq!(link.call("stop", &user(&[])).await, Reply::success(NOT_CONNECTED));
}
