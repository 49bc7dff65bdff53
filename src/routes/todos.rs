//! Todo routes. Mutations require delegated credentials when an API token is configured.

use crate::handlers::{create_todo, delete_todo, list_todos, read_todo, update_todo};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_todos))
        .route("/todo", post(create_todo))
        .route("/todo/:id", get(read_todo).put(update_todo).delete(delete_todo))
        .with_state(state)
}
