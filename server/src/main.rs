//! Guildboard Server - Main Entry Point
//!
//! Guild role and channel administration backend.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use gb_server::directory::memory::MemoryDirectory;
use gb_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gb_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Guildboard Server"
    );

    // Initialize directory backend
    let directory = match &config.directory_seed {
        Some(path) => {
            let directory = MemoryDirectory::from_seed_file(path)?;
            info!(
                path = %path.display(),
                guilds = directory.guild_count(),
                "Directory seeded"
            );
            directory
        }
        None => {
            tracing::warn!("DIRECTORY_SEED not set; starting with an empty directory");
            MemoryDirectory::new()
        }
    };

    // Build application state
    let state = api::AppState::new(Arc::new(directory), config.clone());

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
