use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use super::common::TrainingResponse;
use crate::response::ApiResponse;
use crate::state::AppState;
use db::repositories::{removals, trainings};

/// GET /api/trainings
///
/// Lists all trainings, sorted by name.
pub async fn list_trainings(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<TrainingResponse>>>) {
    match trainings::list(state.db()).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter().map(TrainingResponse::from).collect(),
                "Trainings retrieved",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

/// GET /api/trainings/{training_name}
pub async fn get_training(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
) -> (StatusCode, Json<ApiResponse<TrainingResponse>>) {
    match trainings::find_by_name(state.db(), &training_name).await {
        Ok(Some(training)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TrainingResponse::from(training),
                "Training retrieved",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Training not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

#[derive(Debug, Serialize, Default)]
pub struct RemovalResponse {
    pub participant_name: String,
    pub reason: String,
    pub removed_at: String,
}

/// GET /api/trainings/{training_name}/removals
///
/// The removal audit trail for a training, oldest first.
pub async fn list_removals(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
) -> (StatusCode, Json<ApiResponse<Vec<RemovalResponse>>>) {
    match trainings::find_by_name(state.db(), &training_name).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Training not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    }

    match removals::find_by_training(state.db(), &training_name).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                rows.into_iter()
                    .map(|r| RemovalResponse {
                        participant_name: r.participant_name,
                        reason: r.reason,
                        removed_at: r.removed_at.to_rfc3339(),
                    })
                    .collect(),
                "Removal records retrieved",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}
