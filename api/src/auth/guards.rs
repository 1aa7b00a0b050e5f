use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Pulls the bearer token out of the `Authorization` header, if any.
pub fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Guard for everything behind the login: resolves the presented token
/// against the session registry and inserts the `Session` into request
/// extensions for handlers that want the username. Unknown or missing
/// tokens are denied alike.
pub async fn allow_authenticated(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let session = bearer_token(&req).and_then(|token| state.sessions().get(token));

    match session {
        Some(session) => {
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Authentication required")),
        )),
    }
}
