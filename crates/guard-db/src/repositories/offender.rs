//! PostgreSQL implementation of OffenderRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guard_core::entities::{Offender, Subject};
use guard_core::traits::{OffenderRepository, RepoResult};
use guard_core::value_objects::UserId;

use crate::models::OffenderModel;

use super::error::map_db_error;

/// PostgreSQL implementation of OffenderRepository
#[derive(Clone)]
pub struct PgOffenderRepository {
    pool: PgPool,
}

impl PgOffenderRepository {
    /// Create a new PgOffenderRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OffenderRepository for PgOffenderRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId) -> RepoResult<Option<Offender>> {
        let result = sqlx::query_as::<_, OffenderModel>(
            r"
            SELECT user_id, display_name, warning_count, created_at, updated_at
            FROM offenders
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Offender::from))
    }

    #[instrument(skip(self), fields(user_id = %subject.user_id))]
    async fn increment_warnings(&self, subject: &Subject) -> RepoResult<Offender> {
        // Single-statement upsert: the row lock serialises concurrent increments.
        let model = sqlx::query_as::<_, OffenderModel>(
            r"
            INSERT INTO offenders (user_id, display_name, warning_count)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id) DO UPDATE
            SET warning_count = offenders.warning_count + 1,
                display_name = EXCLUDED.display_name,
                updated_at = NOW()
            RETURNING user_id, display_name, warning_count, created_at, updated_at
            ",
        )
        .bind(subject.user_id.into_inner())
        .bind(&subject.display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Offender::from(model))
    }
}
