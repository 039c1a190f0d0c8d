//! Escalation engine
//!
//! Runs the pure rules from `guard_core::escalation` against the repositories. Every
//! mutation is persisted before the action is returned, so a storage failure means the
//! caller never posts anything.

use chrono::Utc;
use tracing::{debug, info, instrument};

use guard_core::entities::Subject;
use guard_core::escalation::{self, Decision, ModerationAction, StateMutation};
use guard_core::value_objects::UserId;

use super::{ServiceContext, ServiceError, ServiceResult};

/// Applies escalation rules to persisted offender and ban state
#[derive(Clone)]
pub struct EscalationEngine {
    ctx: ServiceContext,
}

impl EscalationEngine {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Screen a message from a non-administrator
    ///
    /// Returns [`ModerationAction::Allow`] without touching storage when the text is not
    /// flagged.
    #[instrument(skip(self, text), fields(user_id = %subject.user_id))]
    pub async fn screen_message(
        &self,
        subject: &Subject,
        text: &str,
    ) -> ServiceResult<ModerationAction> {
        if !self.ctx.detector().is_flagged(text) {
            return Ok(ModerationAction::Allow);
        }
        debug!("Message flagged");
        self.record_violation(subject).await
    }

    /// Count one violation and escalate
    #[instrument(skip(self), fields(user_id = %subject.user_id))]
    pub async fn record_violation(&self, subject: &Subject) -> ServiceResult<ModerationAction> {
        ensure_user(subject.user_id)?;

        let updated = self.ctx.offender_repo().increment_warnings(subject).await?;
        let decision = escalation::escalate(&updated, Utc::now());
        self.commit(decision).await
    }

    /// Decide what to do with a member who just joined
    #[instrument(skip(self))]
    pub async fn check_rejoin(&self, user_id: UserId) -> ServiceResult<ModerationAction> {
        ensure_user(user_id)?;

        let ban = self.ctx.ban_repo().find(user_id).await?;
        self.commit(escalation::check_rejoin(ban.as_ref())).await
    }

    /// Lift a ban
    #[instrument(skip(self))]
    pub async fn unban(&self, user_id: UserId) -> ServiceResult<ModerationAction> {
        let banned = self.ctx.ban_repo().is_banned(user_id).await?;
        self.commit(escalation::unban(user_id, banned)).await
    }

    /// Persist a state mutation
    ///
    /// Returns whether the mutation changed anything. A `LiftBan` that finds no record
    /// (another unban got there first) returns `false`.
    #[instrument(skip(self))]
    pub async fn apply(&self, mutation: &StateMutation) -> ServiceResult<bool> {
        match mutation {
            StateMutation::RecordBan(ban) => {
                self.ctx.ban_repo().ban_offender(ban).await?;
                Ok(true)
            }
            StateMutation::LiftBan(user_id) => Ok(self.ctx.ban_repo().delete(*user_id).await?),
        }
    }

    async fn commit(&self, decision: Decision) -> ServiceResult<ModerationAction> {
        let mut action = decision.action;

        if let Some(mutation) = &decision.mutation {
            let changed = self.apply(mutation).await?;
            if let (false, StateMutation::LiftBan(user_id)) = (changed, mutation) {
                action = ModerationAction::NotFound { user_id: *user_id };
            }
        }

        info!(action = action.kind(), "Escalation decided");
        Ok(action)
    }
}

/// Platform user ids are positive; anything else is a channel or anonymous sender
fn ensure_user(user_id: UserId) -> ServiceResult<()> {
    if user_id.into_inner() > 0 {
        Ok(())
    } else {
        Err(ServiceError::validation(format!(
            "{user_id} is not a user account"
        )))
    }
}
