//! BanRecord entity - a standing removal decision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

use super::Subject;

/// Marker that a user is currently excluded from the group
///
/// Its presence is the only authority for "is banned". It is created when an offender
/// crosses the ban threshold and removed only by an explicit unban.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub banned_at: DateTime<Utc>,
}

impl BanRecord {
    /// Create a ban for the given subject at `banned_at`
    pub fn new(subject: &Subject, banned_at: DateTime<Utc>) -> Self {
        Self {
            user_id: subject.user_id,
            display_name: subject.display_name.clone(),
            banned_at,
        }
    }

    /// The subject this record belongs to
    pub fn subject(&self) -> Subject {
        Subject::new(self.user_id, self.display_name.clone())
    }
}
