use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, http::StatusCode, routing::get};
use common::Config;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct HealthResponse {
    pub project: String,
    pub env: String,
}

/// GET /api/health
///
/// Unauthenticated liveness probe.
pub async fn health() -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let config = Config::get();
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            HealthResponse {
                project: config.project_name.clone(),
                env: config.env.clone(),
            },
            "Service is healthy",
        )),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
