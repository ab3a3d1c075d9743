use std::net::SocketAddr;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use creatorhub_api::config::ServerConfig;
use creatorhub_api::router::build_app_router;
use creatorhub_api::state::AppState;
use creatorhub_db::DbPool;

const DEFAULT_LOG_FILTER: &str = "creatorhub_api=debug,creatorhub_db=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        cors_origins = ?config.cors_origins,
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded",
    );

    let pool = open_database(config.db_max_connections).await;

    let app = build_app_router(AppState { pool: pool.clone() }, &config);

    let ip = config
        .host
        .parse()
        .unwrap_or_else(|e| panic!("HOST '{}' is not an IP address: {e}", config.host));
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot bind {addr}: {e}"));
    tracing::info!(%addr, "Creatorhub API listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
    {
        tracing::error!(error = %e, "Server terminated with an error");
    }

    pool.close().await;
    tracing::info!("Database pool closed, exiting");
}

/// `RUST_LOG` overrides the default filter. `LOG_FORMAT=json` switches the
/// fmt layer to one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect, verify and migrate. Any failure here aborts startup.
async fn open_database(max_connections: u32) -> DbPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = creatorhub_db::create_pool(&url, max_connections)
        .await
        .expect("Failed to connect to database");
    creatorhub_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    creatorhub_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(max_connections, "Database ready");
    pool
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, listening for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => tracing::info!("SIGINT received, shutting down"),
            _ = sigterm.recv() => tracing::info!("SIGTERM received, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Ctrl-C received, shutting down");
    }
}
