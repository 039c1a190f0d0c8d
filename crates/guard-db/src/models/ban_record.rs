//! Ban record database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for ban_records table
#[derive(Debug, Clone, FromRow)]
pub struct BanRecordModel {
    pub user_id: i64,
    pub display_name: String,
    pub banned_at: DateTime<Utc>,
}
