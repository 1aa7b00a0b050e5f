use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::common::ParticipantResponse;
use crate::response::ApiResponse;
use crate::state::AppState;
use db::repositories::participants;

/// GET /api/participants
///
/// Lists all participants, sorted by name. Soft-deleted records are
/// included with their `removed` status so historical reports stay
/// explainable.
pub async fn list_participants(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<ParticipantResponse>>>) {
    match participants::list(state.db()).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter().map(ParticipantResponse::from).collect(),
                "Participants retrieved",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

/// GET /api/participants/{participant_name}
pub async fn get_participant(
    State(state): State<AppState>,
    Path(participant_name): Path<String>,
) -> (StatusCode, Json<ApiResponse<ParticipantResponse>>) {
    match participants::find_by_name(state.db(), &participant_name).await {
        Ok(Some(participant)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ParticipantResponse::from(participant),
                "Participant retrieved",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Participant not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}
