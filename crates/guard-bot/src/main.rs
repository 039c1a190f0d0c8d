//! Moderation bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p guard-bot
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use anyhow::Context;
use guard_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = ?e, "Bot failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        storage = ?config.storage,
        "Configuration loaded"
    );

    guard_bot::run(config).await.context("Bot stopped with an error")?;

    info!("Bot stopped");
    Ok(())
}
