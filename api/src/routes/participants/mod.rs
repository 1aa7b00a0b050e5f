use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use delete::remove_participant;
pub use get::{get_participant, list_participants};
pub use post::{create_participant, import_participants};
pub use put::edit_participant;

pub fn participants_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_participants))
        .route("/", post(create_participant))
        .route("/import", post(import_participants))
        .route("/{participant_name}", get(get_participant))
        .route("/{participant_name}", put(edit_participant))
        .route("/{participant_name}", delete(remove_participant))
        .with_state(app_state)
}
