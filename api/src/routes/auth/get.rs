use axum::{Extension, Json, http::StatusCode};
use serde::Serialize;

use crate::auth::Session;
use crate::response::ApiResponse;

#[derive(Debug, Serialize, Default)]
pub struct MeResponse {
    pub username: String,
}

/// GET /api/auth/me
///
/// Echoes the username behind the presented session token.
pub async fn me(
    Extension(session): Extension<Session>,
) -> (StatusCode, Json<ApiResponse<MeResponse>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            MeResponse {
                username: session.username,
            },
            "Session active",
        )),
    )
}
