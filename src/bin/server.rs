//! Server: loads config from env, ensures the database and `todos` table exist, mounts every route.

use shelf_api::{app, ensure_database_exists, ensure_todos_table, AppState, BookStore, PgTodoStore, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shelf_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_todos_table(&pool).await?;

    if config.api_token.is_none() {
        tracing::warn!("API_TOKEN not set; todo mutations are unauthenticated");
    }
    let state = AppState::new(
        BookStore::default(),
        Arc::new(PgTodoStore::new(pool)),
        config.api_token.clone(),
    );
    let router = app(state, config.body_limit_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
