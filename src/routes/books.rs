//! Book catalog routes. `/books/create`, `/books/update` and `/books/delete/:id` are kept as aliases.

use crate::handlers::{create_book, delete_book, list_books, read_book, update_book};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn book_routes(state: AppState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book).put(update_book))
        .route("/books/create", post(create_book))
        .route("/books/update", put(update_book))
        .route("/books/delete/:id", delete(delete_book))
        .route("/books/:segment", get(read_book).delete(delete_book))
        .with_state(state)
}
