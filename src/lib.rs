//! Shelf API: an in-memory books catalog and a PostgreSQL-backed todo list over one axum router.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, FieldError};
pub use model::{Book, BookFilter, NewBook, Todo, TodoInput};
pub use response::{success_many, success_one, success_one_ok};
pub use routes::{app, auth_routes, book_routes, common_routes, todo_routes};
pub use service::{BookStore, EntitySchema, FieldKind, FieldRule, PgTodoStore, TodoStore};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_todos_table};
