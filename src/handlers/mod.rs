//! HTTP handlers for the book catalog, todos, and the auth collaborator.

pub mod auth;
pub mod books;
pub mod todos;
pub use auth::*;
pub use books::*;
pub use todos::*;

use crate::error::AppError;
use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{Map, Value};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::invalid("id", "must be an integer"))
}

/// Unwrap the extracted body into a JSON object. Unparseable JSON and non-objects are field errors on `body`.
fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    match body {
        Ok(Json(Value::Object(m))) => Ok(m),
        Ok(Json(_)) => Err(AppError::invalid("body", "must be a JSON object")),
        Err(rejection) => Err(AppError::invalid("body", rejection.body_text())),
    }
}
