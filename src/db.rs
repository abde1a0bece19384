use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};

pub type DbPool = PgPool;

const SCHEMA: &str = include_str!("../sql/produtos.sql");

/// Create the shared connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Create the `produtos` table when it does not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}
