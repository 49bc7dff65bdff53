//! Todo persistence: one parameterized statement per operation against the `todos` table.

use crate::error::AppError;
use crate::model::{Todo, TodoInput};
use async_trait::async_trait;
use sqlx::PgPool;

pub const TODOS_TABLE: &str = "todos";

const COLUMNS: &str = "id, title, description, priority, completed";

/// Storage seam for todos. Absence is `Ok(None)`, never an error.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Todo>, AppError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Todo>, AppError>;

    async fn create(&self, todo: TodoInput) -> Result<Todo, AppError>;

    /// Replace title, description, priority and completed. The id never changes.
    async fn update_by_id(&self, id: i64, todo: TodoInput) -> Result<Option<Todo>, AppError>;

    async fn delete_by_id(&self, id: i64) -> Result<Option<Todo>, AppError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        PgTodoStore { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list_all(&self) -> Result<Vec<Todo>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, TODOS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Todo>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, TODOS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, todo: TodoInput) -> Result<Todo, AppError> {
        let sql = insert_sql(todo.id.is_some());
        tracing::debug!(sql = %sql, id = ?todo.id, "query");
        let query = match todo.id {
            Some(id) => sqlx::query_as::<sqlx::Postgres, Todo>(&sql).bind(id),
            None => sqlx::query_as::<sqlx::Postgres, Todo>(&sql),
        };
        let row = query
            .bind(todo.title)
            .bind(todo.description)
            .bind(todo.priority)
            .bind(todo.completed)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;
        Ok(row)
    }

    async fn update_by_id(&self, id: i64, todo: TodoInput) -> Result<Option<Todo>, AppError> {
        let sql = format!(
            "UPDATE {} SET title = $2, description = $3, priority = $4, completed = $5 WHERE id = $1 RETURNING {}",
            TODOS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .bind(todo.title)
            .bind(todo.description)
            .bind(todo.priority)
            .bind(todo.completed)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING {}", TODOS_TABLE, COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// INSERT ... RETURNING; with an explicit id the id is bound first.
fn insert_sql(with_id: bool) -> String {
    let (columns, values) = if with_id {
        (COLUMNS, "$1, $2, $3, $4, $5")
    } else {
        ("title, description, priority, completed", "$1, $2, $3, $4")
    };
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        TODOS_TABLE, columns, values, COLUMNS
    )
}

fn map_unique_violation(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("a todo with this id already exists".into())
        }
        _ => AppError::Db(e),
    }
}
