//! Offender database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for offenders table
#[derive(Debug, Clone, FromRow)]
pub struct OffenderModel {
    pub user_id: i64,
    pub display_name: String,
    pub warning_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
