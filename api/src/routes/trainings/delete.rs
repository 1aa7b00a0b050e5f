use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::state::AppState;
use common::format_validation_errors;
use db::models::RemovalRecord;
use db::repositories::{participants, removals, trainings};

/// DELETE /api/trainings/{training_name}
///
/// Deletes the training document. Attendance and removal documents that
/// reference it are left in place.
pub async fn delete_training(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    match trainings::delete_by_name(state.db(), &training_name).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Training deleted")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Training not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to delete training: {e}"))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RemoveParticipantsReq {
    #[validate(length(min = 1, message = "Select at least one participant"))]
    pub participants: Vec<String>,

    #[validate(length(min = 1, message = "A removal reason is required"))]
    pub reason: String,
}

/// DELETE /api/trainings/{training_name}/participants
///
/// Removes participants from the roster with a mandatory reason. Per
/// removed name this pulls the roster entry, inserts one audit record
/// stamped with the reason and the current time, and flips the
/// participant's status field in place. These are three separate
/// single-document writes with no compensating rollback between them.
///
/// ### Responses
///
/// - `200 OK` when every submitted name was removed
/// - `400 Bad Request` on an empty reason or a name not on the roster
/// - `404 Not Found` when the training does not exist
pub async fn remove_participants(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
    Json(req): Json<RemoveParticipantsReq>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }
    let reason = req.reason.trim();
    if reason.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("A removal reason is required")),
        );
    }

    let training = match trainings::find_by_name(state.db(), &training_name).await {
        Ok(Some(training)) => training,
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
    };

    let off_roster: Vec<&String> = req
        .participants
        .iter()
        .filter(|name| !training.participants.contains(name))
        .collect();
    if !off_roster.is_empty() {
        let names = off_roster
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Not on the roster: {names}"))),
        );
    }

    for name in &req.participants {
        if let Err(e) = trainings::pull_participant(state.db(), &training_name, name).await {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!(
                    "Failed to remove participant: {e}"
                ))),
            );
        }

        let record = RemovalRecord {
            id: None,
            training_name: training_name.clone(),
            participant_name: name.clone(),
            reason: reason.to_string(),
            removed_at: Utc::now(),
        };
        if let Err(e) = removals::insert(state.db(), &record).await {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!(
                    "Failed to record removal: {e}"
                ))),
            );
        }

        if let Err(e) = participants::mark_removed(state.db(), name).await {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!(
                    "Failed to update participant status: {e}"
                ))),
            );
        }

        tracing::info!(training = %training_name, participant = %name, "participant removed from roster");
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "Participants removed")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_requires_names_and_reason() {
        let no_reason = RemoveParticipantsReq {
            participants: vec!["Bob".into()],
            reason: "".into(),
        };
        assert!(no_reason.validate().is_err());

        let no_names = RemoveParticipantsReq {
            participants: vec![],
            reason: "left program".into(),
        };
        assert!(no_names.validate().is_err());

        let complete = RemoveParticipantsReq {
            participants: vec!["Bob".into()],
            reason: "left program".into(),
        };
        assert!(complete.validate().is_ok());
    }
}
