//! Food Item API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/food-items", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let admin = Router::new()
        .route("/", post(handler::create))
        .route("/all", get(handler::list_all))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/toggle", patch(handler::toggle))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    public.merge(admin)
}
