//! Schema bootstrap
//!
//! The schema is idempotent (`IF NOT EXISTS`) and applied on every start.

use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = include_str!("../../migrations/0001_moderation.sql");

/// Create the offender and ban tables if they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Database schema ready");
    Ok(())
}
