#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use shelf_api::{app, AppError, AppState, BookStore, Todo, TodoInput, TodoStore};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// `TodoStore` over a vector, standing in for PostgreSQL.
#[derive(Default)]
pub struct MemoryTodoStore {
    rows: Mutex<Vec<Todo>>,
    pub offline: bool,
}

impl MemoryTodoStore {
    pub fn offline() -> Self {
        MemoryTodoStore {
            offline: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_all(&self) -> Result<Vec<Todo>, AppError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, todo: TodoInput) -> Result<Todo, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let id = match todo.id {
            Some(id) if rows.iter().any(|t| t.id == id) => {
                return Err(AppError::Conflict("a todo with this id already exists".into()))
            }
            Some(id) => id,
            None => rows.iter().map(|t| t.id).max().unwrap_or(0) + 1,
        };
        let row = Todo {
            id,
            title: todo.title,
            description: todo.description,
            priority: todo.priority,
            completed: todo.completed,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_by_id(&self, id: i64, todo: TodoInput) -> Result<Option<Todo>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|t| t.id == id).map(|row| {
            row.title = todo.title;
            row.description = todo.description;
            row.priority = todo.priority;
            row.completed = todo.completed;
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let pos = rows.iter().position(|t| t.id == id);
        Ok(pos.map(|p| rows.remove(p)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.offline {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

pub fn test_app_with(todos: MemoryTodoStore, api_token: Option<&str>) -> Router {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let state = AppState::new(
        BookStore::default(),
        Arc::new(todos),
        api_token.map(str::to_string),
    );
    app(state, 64 * 1024)
}

pub fn test_app() -> Router {
    test_app_with(MemoryTodoStore::default(), None)
}

/// Send one request and return the status plus the JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    respond(app, request).await
}

/// Send `raw` as a JSON-typed body without re-encoding it.
pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    respond(app, request).await
}

async fn respond(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, &[]).await
}
