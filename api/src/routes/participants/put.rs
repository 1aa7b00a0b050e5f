use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bson::Document;
use serde::Deserialize;

use super::common::ParticipantResponse;
use crate::response::ApiResponse;
use crate::state::AppState;
use db::repositories::participants;

#[derive(Debug, Deserialize)]
pub struct EditParticipantReq {
    pub participant_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// PUT /api/participants/{participant_name}
///
/// Writes back only the fields present in the body (`$set` semantics).
pub async fn edit_participant(
    State(state): State<AppState>,
    Path(participant_name): Path<String>,
    Json(req): Json<EditParticipantReq>,
) -> (StatusCode, Json<ApiResponse<ParticipantResponse>>) {
    let mut fields = Document::new();

    if let Some(name) = req.participant_name {
        if name.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Participant name must not be empty")),
            );
        }
        fields.insert("participant_name", name);
    }
    if let Some(email) = req.email {
        if email.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Email must not be empty")),
            );
        }
        fields.insert("email", email);
    }
    if let Some(phone) = req.phone {
        fields.insert("phone", phone);
    }

    if fields.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("No fields to update")),
        );
    }

    let updated_name = fields
        .get_str("participant_name")
        .unwrap_or(&participant_name)
        .to_string();

    match participants::update_fields(state.db(), &participant_name, fields).await {
        Ok(true) => match participants::find_by_name(state.db(), &updated_name).await {
            Ok(Some(participant)) => (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ParticipantResponse::from(participant),
                    "Participant updated successfully",
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
        },
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Participant not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to update participant: {e}"
            ))),
        ),
    }
}
