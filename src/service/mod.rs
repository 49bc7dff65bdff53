//! Resource stores and request validation.

mod book_store;
mod todo_store;
mod validation;
pub use book_store::BookStore;
pub use todo_store::{PgTodoStore, TodoStore, TODOS_TABLE};
pub use validation::{EntitySchema, FieldKind, FieldRule};
