//! Todo lists HTTP server.
//!
//! Keeps lists per session in memory, or in `PostgreSQL` when
//! `STORE_BACKEND=postgres`.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use todo_lists_core::TracingStatementLogger;
use todo_lists_postgres::{PostgresListStore, SchemaScript};
use todo_lists_web::{build_router, AppState, Config, Persistence, SessionRegistry, StoreBackend};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Longest gap between sweeps of idle sessions.
const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_lists=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting todo lists server");
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    // Load configuration
    let config = Config::from_env()?;
    info!(
        backend = ?config.backend,
        address = %config.server.address(),
        "Configuration loaded"
    );

    let persistence = match config.backend {
        StoreBackend::Session => {
            let idle_timeout = config.server.idle_timeout();
            let registry = SessionRegistry::with_idle_timeout(idle_timeout);
            // Runs until the runtime shuts down
            let _eviction = registry.spawn_eviction(idle_timeout.min(EVICTION_INTERVAL));
            info!(idle_timeout_secs = idle_timeout.as_secs(), "Session expiry enabled");
            Persistence::Session(registry)
        }
        StoreBackend::Postgres => {
            info!(url = %config.postgres.url, "Connecting to database...");
            let schema = SchemaScript::from_file(&config.postgres.schema_path)
                .with_context(|| format!("Failed to load {}", config.postgres.schema_path))?;
            let store = PostgresListStore::connect(
                &config.postgres.to_postgres_config(),
                schema,
                Arc::new(TracingStatementLogger),
            )
            .await
            .context("Failed to open list store")?;
            info!("Database connected");
            Persistence::Postgres(Arc::new(store))
        }
    };

    let app = build_router(AppState::new(persistence));

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
