use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bson::Document;
use chrono::NaiveDate;
use serde::Deserialize;

use super::common::TrainingResponse;
use crate::response::ApiResponse;
use crate::state::AppState;
use db::models::TrainingDay;
use db::repositories::trainings;

#[derive(Debug, Deserialize)]
pub struct EditTrainingReq {
    pub training_name: Option<String>,
    pub trainer_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub training_days: Option<Vec<TrainingDay>>,
}

/// PUT /api/trainings/{training_name}
///
/// Writes back only the fields present in the body (`$set` semantics).
/// Renaming is allowed; attendance and removal documents keyed by the old
/// name are not rewritten.
pub async fn edit_training(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
    Json(req): Json<EditTrainingReq>,
) -> (StatusCode, Json<ApiResponse<TrainingResponse>>) {
    let mut fields = Document::new();

    if let Some(name) = req.training_name {
        if name.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Training name must not be empty")),
            );
        }
        fields.insert("training_name", name);
    }
    if let Some(trainer) = req.trainer_name {
        if trainer.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Trainer name must not be empty")),
            );
        }
        fields.insert("trainer_name", trainer);
    }
    if let Some(description) = req.description {
        fields.insert("description", description);
    }
    if let Some(start_date) = req.start_date {
        fields.insert("start_date", start_date.to_string());
    }
    if let Some(days) = req.training_days {
        if days.is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Select at least one training day")),
            );
        }
        let day_names: Vec<String> = days.iter().map(|d| d.to_string()).collect();
        fields.insert("training_days", day_names);
    }

    if fields.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("No fields to update")),
        );
    }

    let updated_name = fields
        .get_str("training_name")
        .unwrap_or(&training_name)
        .to_string();

    match trainings::update_fields(state.db(), &training_name, fields).await {
        Ok(true) => match trainings::find_by_name(state.db(), &updated_name).await {
            Ok(Some(training)) => (
                StatusCode::OK,
                Json(ApiResponse::success(
                    TrainingResponse::from(training),
                    "Training updated successfully",
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
        },
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Training not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to update training: {e}"))),
        ),
    }
}
