use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::ParticipantResponse;
use crate::response::ApiResponse;
use crate::state::AppState;
use common::format_validation_errors;
use db::models::Participant;
use db::repositories::participants;
use services::import::parse_participants_csv;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateParticipantReq {
    #[validate(length(min = 1, message = "Participant name is required"))]
    pub participant_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
}

/// POST /api/participants
///
/// Creates one participant.
///
/// ### Responses
///
/// - `201 Created`
/// - `400 Bad Request` when a field is missing or the email is malformed
/// - `409 Conflict` when the name is already taken
pub async fn create_participant(
    State(state): State<AppState>,
    Json(req): Json<CreateParticipantReq>,
) -> (StatusCode, Json<ApiResponse<ParticipantResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    match participants::find_by_name(state.db(), &req.participant_name).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error(
                    "A participant with this name already exists",
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

    let participant = Participant::new(req.participant_name, req.email, req.phone);
    match participants::insert(state.db(), &participant).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ParticipantResponse::from(participant),
                "Participant added successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to create participant: {e}"
            ))),
        ),
    }
}

#[derive(Debug, Serialize, Default)]
pub struct ImportResponse {
    pub imported: usize,
}

/// POST /api/participants/import
///
/// Bulk import from an uploaded CSV file.
///
/// ### Request Body (Multipart Form Data)
/// - `file` (file, required): CSV with `participant_name`, `email` and
///   `phone` columns. Only one file per request is allowed.
///
/// The import is all-or-nothing: a file missing a required column, or one
/// with an unparseable row, inserts nothing and reports the cause.
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": { "imported": 42 },
///   "message": "Participants imported"
/// }
/// ```
///
/// - `400 Bad Request`
/// ```json
/// {
///   "success": false,
///   "message": "Import failed: file is missing required column `phone`"
/// }
/// ```
pub async fn import_participants(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<ApiResponse<ImportResponse>>) {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut file_count = 0;

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        if field.name() == Some("file") {
            file_count += 1;
            if file_count > 1 {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(
                        "Only one file may be uploaded per request",
                    )),
                );
            }
            match field.bytes().await {
                Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                Err(_) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::error("Failed to read uploaded file")),
                    );
                }
            }
        }
    }

    let Some(bytes) = file_bytes else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Missing file upload")),
        );
    };
    if bytes.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Empty file provided")),
        );
    }

    let rows = match parse_participants_csv(&bytes) {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Import failed: {e}"))),
            );
        }
    };

    match participants::insert_many(state.db(), &rows).await {
        Ok(imported) => {
            tracing::info!(imported, "bulk participant import");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    ImportResponse { imported },
                    "Participants imported",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to import participants: {e}"
            ))),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_validates_all_three_fields() {
        let valid = CreateParticipantReq {
            participant_name: "Alice".into(),
            email: "alice@example.com".into(),
            phone: "555-0100".into(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateParticipantReq {
            participant_name: "Alice".into(),
            email: "not-an-email".into(),
            phone: "555-0100".into(),
        };
        assert!(bad_email.validate().is_err());

        let no_name = CreateParticipantReq {
            participant_name: "".into(),
            email: "alice@example.com".into(),
            phone: "555-0100".into(),
        };
        assert!(no_name.validate().is_err());

        let no_phone = CreateParticipantReq {
            participant_name: "Alice".into(),
            email: "alice@example.com".into(),
            phone: "".into(),
        };
        assert!(no_phone.validate().is_err());
    }
}
