//! Liveness probe mounted at the root, outside `/api/v1`.

use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the ledger store is unreachable.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub ledger: LedgerHealth,
}

#[derive(Debug, Serialize)]
pub struct LedgerHealth {
    pub reachable: bool,
    /// Round-trip of the probe query; absent when it failed.
    pub latency_ms: Option<u64>,
    /// Upper bound the submit path waits on the metadata resolver.
    pub resolver_timeout_secs: u64,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let started = Instant::now();
    let probe = muzer_db::health_check(&state.pool).await;
    let latency_ms = probe
        .as_ref()
        .ok()
        .map(|_| started.elapsed().as_millis() as u64);

    if let Err(err) = &probe {
        tracing::warn!(error = %err, "Ledger store health probe failed");
    }

    Json(HealthResponse {
        status: if probe.is_ok() { "ok" } else { "degraded" },
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        ledger: LedgerHealth {
            reachable: probe.is_ok(),
            latency_ms,
            resolver_timeout_secs: state.config.resolver_timeout_secs,
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
