//! OpenAPI document for both services, served at `/openapi.json`.

use crate::handlers::{self, VerifyBody};
use crate::model::{Book, NewBook, Todo, TodoInput};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::books::list_books,
        handlers::books::read_book,
        handlers::books::create_book,
        handlers::books::update_book,
        handlers::books::delete_book,
        handlers::todos::list_todos,
        handlers::todos::read_todo,
        handlers::todos::create_todo,
        handlers::todos::update_todo,
        handlers::todos::delete_todo,
        handlers::auth::verify,
    ),
    components(schemas(Book, NewBook, Todo, TodoInput, VerifyBody)),
    tags(
        (name = "books", description = "In-memory book catalog"),
        (name = "todos", description = "Todo list backed by PostgreSQL"),
        (name = "auth", description = "Delegated credential check")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
