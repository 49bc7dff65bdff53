//! Database bootstrap: create the target database and the `todos` table when missing.

use crate::error::{AppError, ConfigError};
use crate::service::TODOS_TABLE;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Create the `todos` table if it does not exist. Column constraints mirror the todo field rules.
pub async fn ensure_todos_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL CHECK (char_length(title) BETWEEN 3 AND 50),
            description TEXT NOT NULL CHECK (char_length(description) BETWEEN 3 AND 100),
            priority INTEGER NOT NULL CHECK (priority BETWEEN 1 AND 5),
            completed BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
        TODOS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(table = TODOS_TABLE, "table ready");
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database when absent.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let authority_start = url.find("://").map_or(0, |i| i + 3);
    let path_start = url[authority_start..]
        .find('/')
        .map(|i| authority_start + i + 1)
        .ok_or_else(|| ConfigError::InvalidDatabaseUrl("no database path".into()))?;
    let path_and_query = &url[path_start..];
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name.trim(), Some(query)),
        None => (path_and_query.trim(), None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(query) = query {
        admin_url.push('?');
        admin_url.push_str(query);
    }
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/todos").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "todos");
    }

    #[test]
    fn keeps_query_on_admin_url() {
        let (admin, name) =
            parse_db_name_from_url("postgres://localhost/todos?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "todos");
    }

    #[test]
    fn url_without_path_is_rejected() {
        let err = parse_db_name_from_url("postgres://localhost").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidDatabaseUrl(_))));
        assert_eq!(err.to_string(), "invalid DATABASE_URL: no database path");
    }

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
