//! Order API module
//!
//! Checkout and tracking are public; order administration requires the
//! admin bearer token.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/orders", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/", post(handler::create))
        .route("/track/{order_number}", get(handler::track));

    let admin = Router::new()
        .route("/", get(handler::list))
        .route("/stats", get(handler::stats))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/payment-status", patch(handler::update_payment_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    public.merge(admin)
}
