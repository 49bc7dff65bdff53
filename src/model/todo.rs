//! Todo row and request body.

use crate::service::{EntitySchema, FieldRule};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub completed: bool,
}

/// Body for create and full replace. `id` is honored on create only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TodoInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub priority: i32,
    #[serde(default)]
    pub completed: bool,
}

pub fn todo_schema() -> &'static EntitySchema {
    static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        EntitySchema::new("todo")
            .field("id", FieldRule::integer().range(Some(1.0), None))
            .field("title", FieldRule::text().required().length(Some(3), Some(50)))
            .field(
                "description",
                FieldRule::text().required().length(Some(3), Some(100)),
            )
            .field("priority", FieldRule::integer().required().range(Some(1.0), Some(5.0)))
            .field("completed", FieldRule::boolean())
    })
}
