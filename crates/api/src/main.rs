use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use countdown_db::{MemorySettingsStore, PgSettingsStore, SettingsStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countdown_api::config::ServerConfig;
use countdown_api::router::build_app_router;
use countdown_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "countdown_api=debug,countdown_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        proxy_cache_max_age_secs = config.proxy_cache_max_age_secs,
        "Loaded server configuration"
    );

    // --- Settings store ---
    let (store, pool): (Arc<dyn SettingsStore>, Option<countdown_db::DbPool>) =
        match &config.database_url {
            Some(database_url) => {
                let pool = countdown_db::create_pool(database_url)
                    .await
                    .expect("Failed to connect to database");
                tracing::info!("Database connection pool created");

                countdown_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");
                tracing::info!("Database health check passed");

                countdown_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");

                let store: Arc<dyn SettingsStore> = Arc::new(PgSettingsStore::new(pool.clone()));
                (store, Some(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; settings are kept in memory only");
                let store: Arc<dyn SettingsStore> = Arc::new(MemorySettingsStore::new());
                (store, None)
            }
        };

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(pool) = pool {
        let drained = tokio::time::timeout(
            Duration::from_secs(config.shutdown_timeout_secs),
            pool.close(),
        )
        .await;
        if drained.is_err() {
            tracing::warn!("Timed out closing database connections");
        } else {
            tracing::info!("Database pool closed");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
