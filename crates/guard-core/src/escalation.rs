//! Escalation rules
//!
//! The offense-escalation state machine, kept free of I/O. Each rule takes the state
//! the caller read from storage and returns a [`Decision`]: the action to carry out on
//! the chat platform plus any state mutation that still has to be persisted.
//!
//! Per user there are two independent tracks:
//!
//! - offense: `NONE -> 1 (warn) -> 2 (warn) -> BAN_THRESHOLD (ban, offender retired)`
//! - ban: `NOT_BANNED -> BANNED (threshold reached) -> NOT_BANNED (unban)`
//!
//! Rejoining while banned is a self-loop on the ban track.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{BanRecord, Offender, Subject};
use crate::value_objects::UserId;

/// Number of violations at which warnings turn into removal
pub const BAN_THRESHOLD: u32 = 3;

/// What the caller must do on the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationAction {
    /// Delete the message and post warning `warning` of `threshold`
    Warn {
        subject: Subject,
        warning: u32,
        threshold: u32,
    },
    /// Delete the message, announce the removal and remove the member
    Ban { subject: Subject },
    /// A banned user joined again: notify the group and remove them
    RejectRejoin { ban: BanRecord },
    /// Nothing to do
    Allow,
    /// The ban was lifted
    Unbanned { user_id: UserId },
    /// There was no ban to lift
    NotFound { user_id: UserId },
}

impl ModerationAction {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Warn { .. } => "WARN",
            Self::Ban { .. } => "BAN",
            Self::RejectRejoin { .. } => "REJECT_REJOIN",
            Self::Allow => "ALLOW",
            Self::Unbanned { .. } => "UNBANNED",
            Self::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// Whether the action removes the member from the chat
    pub fn removes_member(&self) -> bool {
        matches!(self, Self::Ban { .. } | Self::RejectRejoin { .. })
    }
}

/// State change that must be persisted before the action is carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    /// Insert the ban record and delete the offender record, as one unit
    RecordBan(BanRecord),
    /// Delete the ban record for this user
    LiftBan(UserId),
}

/// Outcome of applying a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: ModerationAction,
    pub mutation: Option<StateMutation>,
}

impl Decision {
    fn action(action: ModerationAction) -> Self {
        Self {
            action,
            mutation: None,
        }
    }

    fn with_mutation(action: ModerationAction, mutation: StateMutation) -> Self {
        Self {
            action,
            mutation: Some(mutation),
        }
    }
}

/// Compute the offender record after one more violation
///
/// `current` is the stored record, if any. A missing record counts as zero warnings.
pub fn next_offense(current: Option<&Offender>, subject: &Subject) -> Offender {
    let mut offender = current.cloned().unwrap_or_else(|| Offender::new(subject));
    offender.record_warning(&subject.display_name);
    offender
}

/// Decide what a violation means once the warning count has been incremented
///
/// Below the threshold the warning count is already durable, so no further mutation is
/// needed. At or above it the offender is retired into a ban record.
pub fn escalate(updated: &Offender, now: DateTime<Utc>) -> Decision {
    let subject = updated.subject();

    if updated.warning_count < BAN_THRESHOLD {
        return Decision::action(ModerationAction::Warn {
            subject,
            warning: updated.warning_count,
            threshold: BAN_THRESHOLD,
        });
    }

    let ban = BanRecord::new(&subject, now);
    Decision::with_mutation(ModerationAction::Ban { subject }, StateMutation::RecordBan(ban))
}

/// Decide what to do with a member who just joined
pub fn check_rejoin(ban: Option<&BanRecord>) -> Decision {
    match ban {
        Some(ban) => Decision::action(ModerationAction::RejectRejoin { ban: ban.clone() }),
        None => Decision::action(ModerationAction::Allow),
    }
}

/// Decide the outcome of an unban request
pub fn unban(user_id: UserId, banned: bool) -> Decision {
    if banned {
        Decision::with_mutation(
            ModerationAction::Unbanned { user_id },
            StateMutation::LiftBan(user_id),
        )
    } else {
        Decision::action(ModerationAction::NotFound { user_id })
    }
}
