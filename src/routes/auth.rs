//! Auth collaborator, mounted under `/auth`.

use crate::handlers::verify;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/verify", get(verify))
        .with_state(state)
}
