// SPDX-License-Identifier: Apache-2.0

//! Health-only HTTP listener, separate from the gRPC port so a load
//! balancer can probe liveness without speaking gRPC.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use kiosk_core::DisplayService;

#[derive(Clone)]
struct HealthState {
    service: Arc<DisplayService>,
    started_at: Instant,
}

async fn healthz(State(state): State<HealthState>) -> impl IntoResponse {
    let kiosk_count = state.service.list_kiosks().await.len();
    let sign_count = state.service.list_signs().await.len();
    Json(serde_json::json!({
        "status": "serving",
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "kiosk_count": kiosk_count,
        "sign_count": sign_count,
    }))
}

/// Build the health-probe router. Exposes a single `GET /healthz` route.
pub fn build_health_router(service: Arc<DisplayService>) -> Router {
    let state = HealthState { service, started_at: Instant::now() };
    Router::new().route("/healthz", get(healthz)).with_state(state)
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
