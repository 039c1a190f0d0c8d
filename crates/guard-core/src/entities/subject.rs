//! Subject - the user an inbound event is about

use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// The actor of an event as seen by the escalation rules
///
/// `display_name` is a best-effort label for notices. It is never used as a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub user_id: UserId,
    pub display_name: String,
}

impl Subject {
    /// Create a new Subject
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }

    /// Build a subject from a platform profile: the handle if there is one,
    /// otherwise the given name
    pub fn from_profile(user_id: UserId, handle: Option<&str>, given_name: &str) -> Self {
        let display_name = handle
            .filter(|h| !h.is_empty())
            .unwrap_or(given_name)
            .to_string();
        Self {
            user_id,
            display_name,
        }
    }
}
