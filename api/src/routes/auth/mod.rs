use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;

mod get;
mod post;

pub use get::me;
pub use post::{login, logout};

pub fn auth_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route(
            "/logout",
            post(logout).route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .route(
            "/me",
            get(me).route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .with_state(app_state)
}
