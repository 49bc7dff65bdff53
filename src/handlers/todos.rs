//! Todo handlers over the configured `TodoStore`.

use crate::error::AppError;
use crate::extractors::Authorized;
use crate::handlers::{body_to_map, parse_id};
use crate::model::{todo_schema, Todo, TodoInput};
use crate::response::{success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

const NOT_FOUND: &str = "Todo not found";

/// Path ids must be positive integers; anything else is a field error on `id`.
fn todo_id(id_str: &str) -> Result<i64, AppError> {
    let id = parse_id(id_str)?;
    if id <= 0 {
        return Err(AppError::invalid("id", "must be greater than 0"));
    }
    Ok(id)
}

fn todo_input(body: Result<Json<Value>, JsonRejection>) -> Result<TodoInput, AppError> {
    let body = body_to_map(body)?;
    todo_schema().validate(&body)?;
    serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "All todos", body = [Todo])),
    tag = "todos"
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let todos = state.todos.list_all().await?;
    Ok(success_many(todos))
}

#[utoipa::path(
    get,
    path = "/todo/{id}",
    params(("id" = i64, Path, description = "Todo id, greater than 0")),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 404, description = "No such todo"),
        (status = 422, description = "Id not a positive integer")
    ),
    tag = "todos"
)]
pub async fn read_todo(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = todo_id(&id_str)?;
    let todo = state
        .todos
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(success_one_ok(todo))
}

#[utoipa::path(
    post,
    path = "/todo",
    request_body = TodoInput,
    responses(
        (status = 201, description = "Created todo", body = Todo),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 409, description = "Id already taken"),
        (status = 422, description = "Invalid todo")
    ),
    tag = "todos"
)]
pub async fn create_todo(
    _auth: Authorized,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = todo_input(body)?;
    let todo = state.todos.create(input).await?;
    tracing::info!(id = todo.id, "todo created");
    Ok(success_one(todo))
}

/// PUT /todo/:id — replaces every mutable field; an `id` in the body is ignored.
#[utoipa::path(
    put,
    path = "/todo/{id}",
    params(("id" = i64, Path, description = "Todo id, greater than 0")),
    request_body = TodoInput,
    responses(
        (status = 200, description = "Updated todo", body = Todo),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 404, description = "No such todo"),
        (status = 422, description = "Invalid todo")
    ),
    tag = "todos"
)]
pub async fn update_todo(
    _auth: Authorized,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = todo_id(&id_str)?;
    let input = todo_input(body)?;
    let todo = state
        .todos
        .update_by_id(id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(success_one_ok(todo))
}

#[utoipa::path(
    delete,
    path = "/todo/{id}",
    params(("id" = i64, Path, description = "Todo id, greater than 0")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 404, description = "No such todo")
    ),
    tag = "todos"
)]
pub async fn delete_todo(
    _auth: Authorized,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = todo_id(&id_str)?;
    state
        .todos
        .delete_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    tracing::info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
