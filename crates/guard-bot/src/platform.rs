//! Chat platform ports
//!
//! The handler and dispatcher talk to the platform through these traits so tests can
//! substitute a recording fake for the Bot API.

use async_trait::async_trait;

use guard_core::value_objects::{ChatId, UserId};

use crate::telegram::{PlatformResult, TelegramClient, Update};

/// Platform-assigned message id, unique within a chat
pub type MessageId = i64;

/// Calls the moderation handler makes against the chat
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Ids of the chat's administrators
    async fn administrators(&self, chat_id: ChatId) -> PlatformResult<Vec<UserId>>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> PlatformResult<()>;

    /// Post `text`, as a reply when `reply_to` is set
    async fn send_reply(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> PlatformResult<()>;

    /// Remove a member from the chat
    ///
    /// Removal is a kick: the member may technically rejoin, and the persisted ban
    /// record decides what happens when they do.
    async fn remove_member(&self, chat_id: ChatId, user_id: UserId) -> PlatformResult<()>;
}

/// Source of inbound updates
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Wait for the next batch of updates after `offset`
    async fn poll(&self, offset: Option<i64>) -> PlatformResult<Vec<Update>>;
}

#[async_trait]
impl ChatPlatform for TelegramClient {
    async fn administrators(&self, chat_id: ChatId) -> PlatformResult<Vec<UserId>> {
        let members = self.get_chat_administrators(chat_id.into_inner()).await?;
        Ok(members.into_iter().map(|m| UserId::new(m.user.id)).collect())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> PlatformResult<()> {
        TelegramClient::delete_message(self, chat_id.into_inner(), message_id).await?;
        Ok(())
    }

    async fn send_reply(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> PlatformResult<()> {
        self.send_message(chat_id.into_inner(), text, reply_to).await?;
        Ok(())
    }

    async fn remove_member(&self, chat_id: ChatId, user_id: UserId) -> PlatformResult<()> {
        self.ban_chat_member(chat_id.into_inner(), user_id.into_inner())
            .await?;
        self.unban_chat_member(chat_id.into_inner(), user_id.into_inner())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UpdateSource for TelegramClient {
    async fn poll(&self, offset: Option<i64>) -> PlatformResult<Vec<Update>> {
        self.get_updates(offset).await
    }
}
