//! Liveness and readiness probes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Readiness {
    /// `"ok"` when the database answers, `"degraded"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

#[derive(Serialize)]
pub struct Liveness {
    pub status: &'static str,
}

/// GET /health
async fn readiness(State(state): State<AppState>) -> Json<Readiness> {
    let db_healthy = match creatorhub_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe could not reach the database");
            false
        }
    };

    Json(Readiness {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET /test. Never touches the database.
async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        status: "API is running",
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(readiness))
        .route("/test", get(liveness))
}
