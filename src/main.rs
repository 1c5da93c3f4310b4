//! role_warden - Discord role assignment bot
//!
//! Support staff grant and revoke roles from an admin-managed allow-list
//! through guild slash commands delivered to the interactions webhook.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use role_warden::api::{self, AppState};
use role_warden::discord::{DiscordClient, GuildApi};
use role_warden::handlers::CommandHandler;
use role_warden::store::AllowedRoleStore;
use role_warden::{Config, PrivilegedRoles};

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "role_warden=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Starting role_warden");

    let store = AllowedRoleStore::open(&config.db_path).await;
    let api: Arc<dyn GuildApi> = Arc::new(DiscordClient::new(&config.api_base, &config.token)?);

    let handler = CommandHandler::new(
        api,
        store,
        PrivilegedRoles::new(config.admin_role.clone(), config.support_role.clone()),
        config.guild_id.clone(),
    );

    handler
        .on_ready()
        .await
        .context("Failed to authenticate with the Discord API")?;

    let app = api::build_router(AppState::new(handler, config.verifier.clone()));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down. Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
