//! Shared application state for all routes.

use crate::service::{BookStore, TodoStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<BookStore>,
    pub todos: Arc<dyn TodoStore>,
    /// Token expected by protected routes; `None` disables the check.
    pub api_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(books: BookStore, todos: Arc<dyn TodoStore>, api_token: Option<String>) -> Self {
        AppState {
            books: Arc::new(books),
            todos,
            api_token: api_token.map(Arc::from),
        }
    }
}
