//! Special Deal API module
//!
//! Customers see currently-valid deals; management is admin-only.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/special-deals", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new().route("/valid", get(handler::list_valid));

    let admin = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/toggle", patch(handler::toggle))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    public.merge(admin)
}
