//! mclink - Discord to Minecraft: Java Edition RCON link.

use mclink::chat::{ChatSession, discord};
use mclink::commands::RconPassthrough;
use mclink::config::{Config, validate};
use mclink::rcon::RconBridge;
use mclink::{Link, http, metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(
        guild = config.discord.guild_id,
        rcon = %format!("{}:{}", config.rcon.host, config.rcon.port),
        commands = config.commands.len(),
        "Starting mclink"
    );

    // Monitoring endpoints are optional.
    // Convention: metrics_port = 0 disables the HTTP server.
    let metrics_port = config.metrics_port.unwrap_or(9090);
    if metrics_port == 0 {
        info!("Metrics disabled");
    } else {
        metrics::init();
    }

    // Build the engine
    let mut link = Link::new(RconBridge::new(config.rcon.timeouts()));
    for command in &config.commands {
        link.register_command(
            command.name.clone(),
            command.level,
            RconPassthrough::new(command.rcon.clone()),
            command.help.clone(),
        )?;
    }
    for role in &config.roles {
        link.register_role(role.id, role.level);
    }
    for admin in &config.admins {
        link.register_admin(*admin);
    }

    // RCON failure at startup is fatal.
    link.bridge()
        .connect(&config.rcon.host, config.rcon.port, &config.rcon.password)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to establish RCON session");
            e
        })?;

    let link = Arc::new(link);

    if metrics_port != 0 {
        tokio::spawn(http::run_http_server(metrics_port, Arc::clone(&link)));
    }

    let session = Arc::new(ChatSession::new(
        Arc::clone(&link),
        config.discord.prefix.clone(),
    ));

    let mut client = discord::client(&config.discord, session).await?;
    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                error!(error = %e, "Discord client stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
            shard_manager.shutdown_all().await;
        }
    }

    link.bridge().close().await;

    let stats = link.registry().usage_stats();
    if !stats.is_empty() {
        info!(?stats, "Command usage");
    }
    Ok(())
}
