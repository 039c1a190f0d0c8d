//! PostgreSQL implementation of BanRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guard_core::entities::BanRecord;
use guard_core::traits::{BanRepository, RepoResult};
use guard_core::value_objects::UserId;

use crate::models::BanRecordModel;

use super::error::map_db_error;

/// PostgreSQL implementation of BanRepository
#[derive(Clone)]
pub struct PgBanRepository {
    pool: PgPool,
}

impl PgBanRepository {
    /// Create a new PgBanRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BanRepository for PgBanRepository {
    #[instrument(skip(self))]
    async fn is_banned(&self, user_id: UserId) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM ban_records WHERE user_id = $1)
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId) -> RepoResult<Option<BanRecord>> {
        let result = sqlx::query_as::<_, BanRecordModel>(
            r"
            SELECT user_id, display_name, banned_at
            FROM ban_records
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(BanRecord::from))
    }

    #[instrument(skip(self), fields(user_id = %ban.user_id))]
    async fn ban_offender(&self, ban: &BanRecord) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // An existing ban wins; a racing duplicate is a no-op.
        sqlx::query(
            r"
            INSERT INTO ban_records (user_id, display_name, banned_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(ban.user_id.into_inner())
        .bind(&ban.display_name)
        .bind(ban.banned_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("DELETE FROM offenders WHERE user_id = $1")
            .bind(ban.user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: UserId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM ban_records WHERE user_id = $1")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
