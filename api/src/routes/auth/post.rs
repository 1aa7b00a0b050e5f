use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::response::ApiResponse;
use crate::state::AppState;
use common::format_validation_errors;
use db::repositories::users;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub username: String,
    pub token: String,
}

/// POST /api/auth/login
///
/// Checks the submitted credentials against the stored admin record and
/// opens a session on match.
///
/// An unknown username and a wrong password produce the same `401` with
/// the same message; nothing distinguishes the two from outside.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "username": "admin", "token": "9f2c..." },
///   "message": "Login successful"
/// }
/// ```
///
/// - `401 Unauthorized`
/// ```json
/// {
///   "success": false,
///   "message": "Invalid username or password"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<ApiResponse<LoginResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    match users::find_by_username(state.db(), &req.username).await {
        Ok(Some(user)) if user.verify_password(&req.password) => {
            let token = state.sessions().open(&user.username);
            tracing::info!(username = %user.username, "admin logged in");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    LoginResponse {
                        username: user.username,
                        token,
                    },
                    "Login successful",
                )),
            )
        }
        Ok(_) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid username or password")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {e}"))),
        ),
    }
}

/// POST /api/auth/logout
///
/// Invalidates the presented session token. The guard has already
/// resolved the token, so it always names a live session here.
pub async fn logout(
    State(state): State<AppState>,
    req: axum::extract::Request,
) -> (StatusCode, Json<ApiResponse<crate::auth::guards::Empty>>) {
    if let Some(token) = crate::auth::guards::bearer_token(&req) {
        state.sessions().close(token);
    }
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            crate::auth::guards::Empty,
            "Logged out",
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_requires_both_fields() {
        let missing_username = LoginRequest {
            username: "".into(),
            password: "pw".into(),
        };
        assert!(missing_username.validate().is_err());

        let missing_password = LoginRequest {
            username: "admin".into(),
            password: "".into(),
        };
        assert!(missing_password.validate().is_err());

        let complete = LoginRequest {
            username: "admin".into(),
            password: "pw".into(),
        };
        assert!(complete.validate().is_ok());
    }
}
