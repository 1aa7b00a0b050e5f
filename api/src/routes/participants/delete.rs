use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::state::AppState;
use db::repositories::participants;

/// DELETE /api/participants/{participant_name}
///
/// Soft delete: flips the status field to `removed` and stamps the time.
/// The document itself stays so attendance history that references the
/// name keeps resolving.
pub async fn remove_participant(
    State(state): State<AppState>,
    Path(participant_name): Path<String>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    match participants::mark_removed(state.db(), &participant_name).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Participant removed")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Participant not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to remove participant: {e}"
            ))),
        ),
    }
}
