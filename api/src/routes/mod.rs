//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → login/logout/session info (login is public)
//! - `/trainings` → training CRUD, roster assignment/removal, attendance
//!   recording and the status report (authenticated)
//! - `/participants` → participant CRUD and bulk import (authenticated)

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state};

pub mod auth;
pub mod health;
pub mod participants;
pub mod trainings;

/// Builds the complete application router. Everything except the health
/// probe and the login endpoint sits behind the session guard.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes(app_state.clone()))
        .nest(
            "/trainings",
            trainings::trainings_routes(app_state.clone()).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_authenticated,
            )),
        )
        .nest(
            "/participants",
            participants::participants_routes(app_state.clone()).route_layer(
                from_fn_with_state(app_state.clone(), allow_authenticated),
            ),
        )
        .with_state(app_state)
}
