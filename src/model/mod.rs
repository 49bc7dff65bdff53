//! Entities served by the API.

pub mod book;
pub mod todo;

pub use book::*;
pub use todo::*;
