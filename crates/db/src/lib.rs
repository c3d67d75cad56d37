//! PostgreSQL persistence for the asset tracker.
//!
//! Row types live in [`models`], query functions in [`repositories`], and
//! [`gateway::PgGateway`] exposes both through the core gateway traits.

pub mod gateway;
pub mod models;
pub mod repositories;

use std::future::Future;

use sqlx::postgres::PgPoolOptions;

pub use gateway::PgGateway;

pub type DbPool = sqlx::PgPool;

/// Rows requested per round trip when loading a full table.
pub const PAGE_SIZE: i64 = 1000;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Collect every row by requesting `page_size` rows at a time until a short
/// page comes back.
///
/// `fetch_page` receives `(limit, offset)`.
pub async fn fetch_all_pages<T, E, F, Fut>(page_size: i64, mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(i64, i64) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut rows = Vec::new();
    let mut offset = 0;
    loop {
        let page = fetch_page(page_size, offset).await?;
        let fetched = page.len() as i64;
        rows.extend(page);
        if fetched < page_size {
            break;
        }
        offset += page_size;
    }
    Ok(rows)
}
