//! API server entry point.

use api::config::{Config, DEFAULT_LOG_LEVEL};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{InMemoryStore, PostgresStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Builds the router over PostgreSQL when `DATABASE_URL` is set, otherwise
/// over the in-memory store seeded with the default catalog.
async fn build_app(config: &Config, metrics_handle: PrometheusHandle) -> axum::Router {
    match &config.database_url {
        Some(url) => {
            tracing::info!(
                max_connections = config.database_max_connections,
                "connecting to PostgreSQL"
            );
            let store = PostgresStore::connect(url, config.database_max_connections)
                .await
                .expect("failed to connect to database");

            tracing::info!("running database migrations");
            store
                .run_migrations()
                .await
                .expect("failed to run migrations");

            api::create_app(api::create_state(store, config), metrics_handle)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; using the in-memory store");
            let store = InMemoryStore::with_default_catalog().await;
            api::create_app(api::create_state(store, config), metrics_handle)
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Load .env so RUST_LOG and the settings below can come from it
    let _ = dotenvy::dotenv();

    // 2. Initialize tracing, then read configuration
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // 3. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 4. Build the application over the configured store
    let app = build_app(&config, metrics_handle).await;

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
