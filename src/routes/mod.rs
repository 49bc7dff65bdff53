//! Route tables and the assembled application router.

mod auth;
mod books;
mod common;
mod todos;

pub use auth::auth_routes;
pub use books::book_routes;
pub use common::common_routes;
pub use todos::todo_routes;

use crate::openapi::openapi_routes;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Every service on one router, with request tracing and a body size cap.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(book_routes(state.clone()))
        .merge(todo_routes(state.clone()))
        .merge(auth_routes(state))
        .merge(openapi_routes())
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
