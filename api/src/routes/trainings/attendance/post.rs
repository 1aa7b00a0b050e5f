use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use validator::Validate;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::state::AppState;
use common::format_validation_errors;
use db::models::AttendanceEvent;
use db::repositories::{attendance, removals, trainings};

#[derive(Debug, Deserialize, Validate)]
pub struct RecordAttendanceReq {
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "A topic is required"))]
    pub topic: String,

    /// Present/absent decision per participant. Eligible participants not
    /// mentioned here are recorded as present.
    #[serde(default)]
    pub attendance: HashMap<String, bool>,
}

/// POST /api/trainings/{training_name}/attendance
///
/// Records attendance for one date. The eligible set is the current
/// roster minus everyone with a removal record for this training; names
/// outside it are rejected. Always inserts a new document: re-marking
/// the same date stacks a second record, which the status report
/// resolves with presence-wins semantics.
///
/// ### Responses
///
/// - `201 Created`
/// - `400 Bad Request` on a missing topic, an empty eligible set, or a
///   name outside the eligible set
/// - `404 Not Found` when the training does not exist
pub async fn record_attendance(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
    Json(req): Json<RecordAttendanceReq>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let topic = req.topic.trim();
    if topic.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("A topic is required")),
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

    let removed: HashSet<String> = match removals::find_by_training(state.db(), &training_name).await
    {
        Ok(rows) => rows.into_iter().map(|r| r.participant_name).collect(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {e}"))),
            );
        }
    };

    let eligible: Vec<String> = training
        .participants
        .iter()
        .filter(|name| !removed.contains(*name))
        .cloned()
        .collect();

    if eligible.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "No participants assigned to this training",
            )),
        );
    }

    let unknown: Vec<&String> = req
        .attendance
        .keys()
        .filter(|name| !eligible.contains(name))
        .collect();
    if !unknown.is_empty() {
        let names = unknown
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Not eligible for this training: {names}"
            ))),
        );
    }

    let full_map: HashMap<String, bool> = eligible
        .into_iter()
        .map(|name| {
            let present = req.attendance.get(&name).copied().unwrap_or(true);
            (name, present)
        })
        .collect();

    let event = AttendanceEvent {
        id: None,
        training_name: training_name.clone(),
        date: req.date,
        attendance: full_map,
        present: Vec::new(),
        topic: Some(topic.to_string()),
        recorded_at: Utc::now(),
    };

    match attendance::insert(state.db(), &event).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(Empty, "Attendance saved successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to save attendance: {e}"))),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_required() {
        let no_topic = RecordAttendanceReq {
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            topic: "".into(),
            attendance: HashMap::new(),
        };
        assert!(no_topic.validate().is_err());

        let with_topic = RecordAttendanceReq {
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            topic: "Safety basics".into(),
            attendance: HashMap::new(),
        };
        assert!(with_topic.validate().is_ok());
    }
}
