//! Offender entity - a user's running violation count

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

use super::Subject;

/// Cumulative violation state for one user
///
/// Created lazily on the first violation and retired once the count reaches the ban
/// threshold. There is at most one Offender per `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offender {
    pub user_id: UserId,
    pub display_name: String,
    pub warning_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offender {
    /// Create a record with no warnings yet
    pub fn new(subject: &Subject) -> Self {
        let now = Utc::now();
        Self {
            user_id: subject.user_id,
            display_name: subject.display_name.clone(),
            warning_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Count one more violation, refreshing the display name
    pub fn record_warning(&mut self, display_name: &str) -> u32 {
        self.warning_count = self.warning_count.saturating_add(1);
        display_name.clone_into(&mut self.display_name);
        self.updated_at = Utc::now();
        self.warning_count
    }

    /// The subject this record belongs to
    pub fn subject(&self) -> Subject {
        Subject::new(self.user_id, self.display_name.clone())
    }
}
