//! Route table for the books module, relative to `/api`.

pub mod handlers;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::store::SharedStore;

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/createbook", post(handlers::create_book))
        .route("/getbooks", get(handlers::list_books))
        .route("/getbook/{id}", get(handlers::get_book))
        .route("/getbook", get(handlers::get_book_without_id))
        .route("/getbook/", get(handlers::get_book_without_id))
        .route("/deletebook/{id}", delete(handlers::delete_book))
        .route("/deletebook", delete(handlers::delete_book_without_id))
        .route("/deletebook/", delete(handlers::delete_book_without_id))
        .with_state(store)
}
