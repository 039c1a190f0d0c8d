//! User-facing notice texts

use guard_core::escalation::ModerationAction;

/// Text to post in the chat for an action, if any
pub fn render(action: &ModerationAction) -> Option<String> {
    match action {
        ModerationAction::Warn {
            subject,
            warning,
            threshold,
        } => Some(format!(
            "@{}, this is warning #{warning} of {threshold} for sharing a contract address. \
             On warning #{threshold}, you will be removed from the group.",
            subject.display_name
        )),
        ModerationAction::Ban { subject } => Some(format!(
            "@{} has been removed from the group for repeated violations.",
            subject.display_name
        )),
        ModerationAction::RejectRejoin { ban } => Some(format!(
            "A banned user (@{}) attempted to rejoin and was removed again.",
            ban.display_name
        )),
        ModerationAction::Unbanned { user_id } => Some(format!("User {user_id} has been unbanned.")),
        ModerationAction::NotFound { user_id } => Some(format!("User {user_id} is not banned.")),
        ModerationAction::Allow => None,
    }
}
