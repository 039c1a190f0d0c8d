//! Process bootstrap
//!
//! Builds storage, the platform client and the handler from configuration, then runs
//! the dispatcher and the liveness server until a shutdown signal arrives.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use guard_common::{AppConfig, AppError, AppResult, StorageBackend};
use guard_db::{create_pool, ensure_schema, InMemoryStore};
use guard_service::{EscalationEngine, ServiceContext};

use crate::dispatcher::Dispatcher;
use crate::handler::EventHandler;
use crate::server::run_server;
use crate::telegram::TelegramClient;

/// Build the service context for the configured storage backend
pub async fn build_context(config: &AppConfig) -> AppResult<ServiceContext> {
    match config.storage {
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required for postgres storage".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&guard_db::DatabaseConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            ensure_schema(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            Ok(ServiceContext::postgres(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; offender and ban state is lost on restart");
            Ok(ServiceContext::in_memory(&InMemoryStore::new()))
        }
    }
}

/// Run the bot with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let context = build_context(&config).await?;

    let client = Arc::new(TelegramClient::new(&config.telegram)?);
    let me = client.get_me().await?;
    info!(bot = me.username.as_deref().unwrap_or(&me.first_name), "Authenticated with the Bot API");

    let handler = EventHandler::new(
        EscalationEngine::new(context),
        client.clone(),
        &config.moderation,
    );

    let (stop, shutdown) = watch::channel(false);
    let stop = Arc::new(stop);

    tokio::spawn({
        let stop = Arc::clone(&stop);
        async move {
            shutdown_signal().await;
            info!("Shutdown signal received");
            let _ = stop.send(true);
        }
    });

    let server = tokio::spawn({
        let stop = Arc::clone(&stop);
        let address = config.server.address();
        let shutdown = shutdown.clone();
        async move {
            let result = run_server(address, wait_for(shutdown)).await;
            if let Err(e) = &result {
                error!(error = %e, "Liveness server failed");
                let _ = stop.send(true);
            }
            result
        }
    });

    Dispatcher::new(client, handler, Some(me))
        .run(shutdown)
        .await;

    server.await.map_err(AppError::internal)?
}

async fn wait_for(mut shutdown: watch::Receiver<bool>) {
    // A dropped sender also ends the wait.
    let _ = shutdown.wait_for(|stopped| *stopped).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
