//! Service index and health / heartbeat endpoints.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_index, get_health))]
pub struct HealthApi;

/// Register index and health-check routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_index))
        .route("/health", get(get_health))
}

/// Service index listing the available endpoints.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Endpoint overview", body = Value)
    )
)]
pub async fn get_index() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "harvest data sourcing API",
        "api_endpoints": {
            "POST /tasks": "Create a new collection task",
            "GET /tasks": "List all tasks",
            "GET /tasks/{id}": "Get a task by id",
            "GET /tasks/{id}/data": "Get records collected for a task",
            "GET /health": "Liveness check",
        },
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Heartbeat endpoint.
///
/// Returns `{"status": "ok", "version": "..."}` with HTTP 200.
/// Load-balancers and monitoring systems should poll this endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = Value)
    )
)]
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status":  "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
