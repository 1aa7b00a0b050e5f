use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

mod get;
mod post;

pub use get::{export_status_csv, get_status, list_attendance};
pub use post::record_attendance;

pub fn attendance_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance))
        .route("/", post(record_attendance))
        .route("/status", get(get_status))
        .route("/status/export", get(export_status_csv))
        .with_state(app_state)
}
