use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

mod attendance;
mod common;
mod delete;
mod get;
mod post;
mod put;

pub use delete::{delete_training, remove_participants};
pub use get::{get_training, list_removals, list_trainings};
pub use post::{assign_participants, create_training};
pub use put::edit_training;

pub fn trainings_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_trainings))
        .route("/", post(create_training))
        .route("/{training_name}", get(get_training))
        .route("/{training_name}", put(edit_training))
        .route("/{training_name}", delete(delete_training))
        .route("/{training_name}/participants", post(assign_participants))
        .route("/{training_name}/participants", delete(remove_participants))
        .route("/{training_name}/removals", get(list_removals))
        .nest(
            "/{training_name}/attendance",
            attendance::attendance_routes(app_state.clone()),
        )
        .with_state(app_state)
}
