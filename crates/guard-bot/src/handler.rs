//! Per-event moderation handler
//!
//! Each event is an isolated unit of work. State is persisted by the engine before any
//! platform call is made; after that, every platform call is attempted and logged on
//! its own so one failure does not skip the rest.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use guard_common::{AppResult, ModerationConfig};
use guard_core::entities::Subject;
use guard_core::escalation::ModerationAction;
use guard_core::value_objects::{ChatId, UserId};
use guard_service::notices;
use guard_service::{AdminCommand, CommandError, EscalationEngine};

use crate::events::InboundEvent;
use crate::platform::{ChatPlatform, MessageId};

/// Routes inbound events through the escalation engine and onto the platform
#[derive(Clone)]
pub struct EventHandler {
    engine: EscalationEngine,
    platform: Arc<dyn ChatPlatform>,
    unban_admin_only: bool,
}

impl EventHandler {
    pub fn new(
        engine: EscalationEngine,
        platform: Arc<dyn ChatPlatform>,
        config: &ModerationConfig,
    ) -> Self {
        Self {
            engine,
            platform,
            unban_admin_only: config.unban_admin_only,
        }
    }

    /// Handle one event
    ///
    /// Errors mean the event was dropped before anything was posted: the administrator
    /// lookup or a storage call failed.
    #[instrument(skip(self, event), fields(kind = event.kind(), chat_id = %event.chat_id()))]
    pub async fn handle(&self, event: InboundEvent) -> AppResult<()> {
        match event {
            InboundEvent::Message {
                chat_id,
                message_id,
                sender,
                text,
            } => self.on_message(chat_id, message_id, &sender, &text).await,
            InboundEvent::MemberJoined { chat_id, member } => self.on_join(chat_id, &member).await,
            InboundEvent::UnbanCommand {
                chat_id,
                message_id,
                sender,
                text,
                command,
            } => {
                self.on_unban(chat_id, message_id, &sender, &text, command)
                    .await
            }
        }
    }

    async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> AppResult<bool> {
        let admins = self.platform.administrators(chat_id).await?;
        Ok(admins.contains(&user_id))
    }

    async fn on_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        sender: &Subject,
        text: &str,
    ) -> AppResult<()> {
        if self.is_admin(chat_id, sender.user_id).await? {
            debug!(user_id = %sender.user_id, "Sender is an administrator");
            return Ok(());
        }

        let action = self.engine.screen_message(sender, text).await?;
        self.carry_out(chat_id, Some(message_id), &action).await;
        Ok(())
    }

    async fn on_join(&self, chat_id: ChatId, member: &Subject) -> AppResult<()> {
        let action = self.engine.check_rejoin(member.user_id).await?;
        self.carry_out(chat_id, None, &action).await;
        Ok(())
    }

    async fn on_unban(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        sender: &Subject,
        text: &str,
        command: Result<AdminCommand, CommandError>,
    ) -> AppResult<()> {
        if !self.is_admin(chat_id, sender.user_id).await? {
            // A command from a non-administrator is still a message to screen.
            let action = self.engine.screen_message(sender, text).await?;
            if !matches!(action, ModerationAction::Allow) {
                self.carry_out(chat_id, Some(message_id), &action).await;
                return Ok(());
            }
            if self.unban_admin_only {
                warn!(user_id = %sender.user_id, "Ignoring unban from non-administrator");
                return Ok(());
            }
        }

        let user_id = match command {
            Ok(AdminCommand::Unban(user_id)) => user_id,
            Err(usage) => {
                self.reply(chat_id, Some(message_id), &usage.to_string())
                    .await;
                return Ok(());
            }
        };

        let action = self.engine.unban(user_id).await?;
        self.carry_out(chat_id, Some(message_id), &action).await;
        Ok(())
    }

    /// Execute an action on the platform
    ///
    /// `message_id` is the message that triggered the action, if any.
    async fn carry_out(&self, chat_id: ChatId, message_id: Option<MessageId>, action: &ModerationAction) {
        if matches!(action, ModerationAction::Allow) {
            return;
        }
        info!(action = action.kind(), "Carrying out moderation action");

        let notice = notices::render(action);
        match action {
            ModerationAction::Warn { .. } => {
                self.delete(chat_id, message_id).await;
                self.announce(chat_id, notice.as_deref()).await;
            }
            ModerationAction::Ban { subject } => {
                self.delete(chat_id, message_id).await;
                self.announce(chat_id, notice.as_deref()).await;
                self.remove(chat_id, subject.user_id).await;
            }
            ModerationAction::RejectRejoin { ban } => {
                self.announce(chat_id, notice.as_deref()).await;
                self.remove(chat_id, ban.user_id).await;
            }
            ModerationAction::Unbanned { .. } | ModerationAction::NotFound { .. } => {
                if let Some(text) = notice.as_deref() {
                    self.reply(chat_id, message_id, text).await;
                }
            }
            ModerationAction::Allow => {}
        }
    }

    async fn delete(&self, chat_id: ChatId, message_id: Option<MessageId>) {
        let Some(message_id) = message_id else {
            return;
        };
        if let Err(e) = self.platform.delete_message(chat_id, message_id).await {
            warn!(error = %e, message_id, "Failed to delete message");
        }
    }

    async fn announce(&self, chat_id: ChatId, text: Option<&str>) {
        if let Some(text) = text {
            self.reply(chat_id, None, text).await;
        }
    }

    async fn reply(&self, chat_id: ChatId, reply_to: Option<MessageId>, text: &str) {
        if let Err(e) = self.platform.send_reply(chat_id, reply_to, text).await {
            warn!(error = %e, "Failed to send message");
        }
    }

    async fn remove(&self, chat_id: ChatId, user_id: UserId) {
        // The ban record stays in place either way; a later rejoin is still caught.
        if let Err(e) = self.platform.remove_member(chat_id, user_id).await {
            warn!(error = %e, user_id = %user_id, "Failed to remove member");
        }
    }
}
