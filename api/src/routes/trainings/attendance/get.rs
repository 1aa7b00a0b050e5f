//! Attendance read routes: raw event listing, the status matrix, and the
//! CSV export of the matrix.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::response::ApiResponse;
use crate::state::AppState;
use db::models::{RemovalRecord, Training};
use db::repositories::{attendance, removals, trainings};
use services::export::{EXPORT_FILENAME, matrix_to_csv};
use services::status_report::{
    DateColumn, ParticipantRow, StatusMatrix, build_matrix, validate_range,
};

#[derive(Debug, Serialize, Default)]
pub struct AttendanceEventResponse {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub attendance: HashMap<String, bool>,
    pub recorded_at: String,
}

/// GET /api/trainings/{training_name}/attendance
///
/// Lists the raw attendance documents for a training, oldest date first.
/// Duplicate documents for one date are returned as stored.
pub async fn list_attendance(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
) -> (StatusCode, Json<ApiResponse<Vec<AttendanceEventResponse>>>) {
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

    match attendance::find_by_training(state.db(), &training_name, None).await {
        Ok(events) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                events
                    .into_iter()
                    .map(|e| AttendanceEventResponse {
                        date: e.date.to_string(),
                        topic: e.topic,
                        attendance: if e.attendance.is_empty() {
                            e.present.iter().map(|n| (n.clone(), true)).collect()
                        } else {
                            e.attendance
                        },
                        recorded_at: e.recorded_at.to_rfc3339(),
                    })
                    .collect(),
                "Attendance records retrieved",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Default)]
pub struct StatusReportResponse {
    pub training_name: String,
    pub trainer_name: String,
    pub no_data: bool,
    pub columns: Vec<DateColumn>,
    pub rows: Vec<ParticipantRow>,
}

enum StatusData {
    Matrix(StatusMatrix),
    NoData,
}

/// Shared fetch-and-build for the JSON and CSV status endpoints.
async fn build_status(
    state: &AppState,
    training_name: &str,
    query: StatusQuery,
) -> Result<(Training, StatusData), (StatusCode, String)> {
    let range = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => Some((start, end)),
        (None, None) => None,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Both start_date and end_date are required to filter by range".into(),
            ));
        }
    };

    // Reject an inverted range before touching the store.
    if let Err(e) = validate_range(range) {
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let training = trainings::find_by_name(state.db(), training_name)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {e}"),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, "Training not found".to_string()))?;

    let events = attendance::find_by_training(state.db(), training_name, range)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {e}"),
            )
        })?;

    let removal_records: Vec<RemovalRecord> = removals::find_by_training(state.db(), training_name)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {e}"),
            )
        })?;

    let matrix = build_matrix(&training.participants, &removal_records, &events, range)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok((
        training,
        match matrix {
            Some(matrix) => StatusData::Matrix(matrix),
            None => StatusData::NoData,
        },
    ))
}

/// GET /api/trainings/{training_name}/attendance/status
///
/// The participant × date status matrix.
///
/// **Query**:
/// - `start_date`, `end_date` *(optional, both or neither)*: inclusive
///   calendar range for the date axis. Without them the axis is every
///   date seen in the stored records.
///
/// A training with no attendance records reports `no_data: true` rather
/// than an empty table.
pub async fn get_status(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
    Query(query): Query<StatusQuery>,
) -> (StatusCode, Json<ApiResponse<StatusReportResponse>>) {
    match build_status(&state, &training_name, query).await {
        Ok((training, StatusData::Matrix(matrix))) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StatusReportResponse {
                    training_name: training.training_name,
                    trainer_name: training.trainer_name,
                    no_data: false,
                    columns: matrix.columns,
                    rows: matrix.rows,
                },
                "Status report built",
            )),
        ),
        Ok((training, StatusData::NoData)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StatusReportResponse {
                    training_name: training.training_name,
                    trainer_name: training.trainer_name,
                    no_data: true,
                    columns: Vec::new(),
                    rows: Vec::new(),
                },
                "No attendance records available",
            )),
        ),
        Err((status, message)) => (status, Json(ApiResponse::error(message))),
    }
}

/// GET /api/trainings/{training_name}/attendance/status/export
///
/// The status matrix as a `text/csv` attachment with a fixed filename,
/// cells in {P, A, X, -}.
pub async fn export_status_csv(
    State(state): State<AppState>,
    Path(training_name): Path<String>,
    Query(query): Query<StatusQuery>,
) -> (StatusCode, (HeaderMap, String)) {
    let mut headers = HeaderMap::new();

    match build_status(&state, &training_name, query).await {
        Ok((_, StatusData::Matrix(matrix))) => {
            let csv = matrix_to_csv(&matrix);
            headers.insert(
                axum::http::header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            );
            headers.insert(
                axum::http::header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&format!("attachment; filename=\"{EXPORT_FILENAME}\""))
                    .unwrap_or(HeaderValue::from_static("attachment")),
            );
            (StatusCode::OK, (headers, csv))
        }
        Ok((_, StatusData::NoData)) => {
            headers.insert(
                axum::http::header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            (
                StatusCode::NOT_FOUND,
                (headers, "No attendance records available".to_string()),
            )
        }
        Err((status, message)) => {
            headers.insert(
                axum::http::header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            (status, (headers, message))
        }
    }
}
