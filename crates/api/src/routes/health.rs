//! Liveness probe for load balancers, mounted outside the login gate.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
///
/// `status` is `"degraded"` while the database cannot be reached; the
/// broker still answers so the balancer can tell the two apart.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

async fn broker_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = broker_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(broker_health))
}
