//! Cart API module
//!
//! All cart routes are public: the cart belongs to an anonymous session,
//! not an authenticated identity.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/cart", routes())
        .route("/api/delivery-charges", get(handler::delivery_charges))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::get_cart)
                .post(handler::add_item)
                .delete(handler::clear),
        )
        .route("/{id}", put(handler::update_item).delete(handler::remove_item))
}
