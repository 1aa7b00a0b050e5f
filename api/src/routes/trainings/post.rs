use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use super::common::TrainingResponse;
use crate::response::ApiResponse;
use crate::state::AppState;
use common::format_validation_errors;
use db::models::{Training, TrainingDay};
use db::repositories::{participants, trainings};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrainingReq {
    #[validate(length(min = 1, message = "Training name is required"))]
    pub training_name: String,

    #[validate(length(min = 1, message = "Trainer name is required"))]
    pub trainer_name: String,

    pub description: Option<String>,

    pub start_date: NaiveDate,

    #[validate(length(min = 1, message = "Select at least one training day"))]
    pub training_days: Vec<TrainingDay>,
}

/// POST /api/trainings
///
/// Creates a training with an empty roster.
///
/// ### Responses
///
/// - `201 Created` with the stored training
/// - `400 Bad Request` when a required field is missing or no day is
///   selected; nothing is persisted
/// - `409 Conflict` when a training with this name already exists
pub async fn create_training(
    State(state): State<AppState>,
    Json(req): Json<CreateTrainingReq>,
) -> (StatusCode, Json<ApiResponse<TrainingResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    match trainings::find_by_name(state.db(), &req.training_name).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error(
                    "A training with this name already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    }

    let training = Training {
        id: None,
        training_name: req.training_name,
        trainer_name: req.trainer_name,
        description: req.description,
        start_date: req.start_date,
        training_days: req.training_days,
        participants: Vec::new(),
    };

    match trainings::insert(state.db(), &training).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TrainingResponse::from(training),
                "Training added successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to create training: {e}"))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssignParticipantsReq {
    #[validate(length(min = 1, message = "Select at least one participant"))]
    pub participants: Vec<String>,
}

/// POST /api/trainings/{training_name}/participants
///
/// Adds participants to the roster with set semantics: assigning the same
/// name twice leaves it on the roster exactly once. Every submitted name
/// must exist in the participants collection.
pub async fn assign_participants(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
    Json(req): Json<AssignParticipantsReq>,
) -> (StatusCode, Json<ApiResponse<TrainingResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let known = match participants::find_many_by_names(state.db(), &req.participants).await {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    };

    let missing: Vec<&String> = req
        .participants
        .iter()
        .filter(|name| !known.iter().any(|p| &p.participant_name == *name))
        .collect();
    if !missing.is_empty() {
        let names = missing
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Unknown participants: {names}"))),
        );
    }

    match trainings::add_participants(state.db(), &training_name, &req.participants).await {
        Ok(true) => match trainings::find_by_name(state.db(), &training_name).await {
            Ok(Some(training)) => (
                StatusCode::OK,
                Json(ApiResponse::success(
                    TrainingResponse::from(training),
                    "Participants assigned successfully",
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
            Json(ApiResponse::error(format!(
                "Failed to assign participants: {e}"
            ))),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_req() -> CreateTrainingReq {
        CreateTrainingReq {
            training_name: "Onboarding".into(),
            trainer_name: "Sam".into(),
            description: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            training_days: vec![TrainingDay::Monday, TrainingDay::Wednesday],
        }
    }

    #[test]
    fn create_requires_name_trainer_and_days() {
        assert!(base_req().validate().is_ok());

        let mut req = base_req();
        req.training_name.clear();
        assert!(req.validate().is_err());

        let mut req = base_req();
        req.trainer_name.clear();
        assert!(req.validate().is_err());

        let mut req = base_req();
        req.training_days.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn assign_requires_at_least_one_participant() {
        let empty = AssignParticipantsReq {
            participants: vec![],
        };
        assert!(empty.validate().is_err());

        let one = AssignParticipantsReq {
            participants: vec!["Alice".into()],
        };
        assert!(one.validate().is_ok());
    }
}
