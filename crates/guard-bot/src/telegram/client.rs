//! Bot API HTTP client

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, instrument};

use guard_common::TelegramConfig;

use super::{ApiResponse, ChatMember, Message, PlatformResult, Update, User};

/// Thin client over the Telegram Bot API
///
/// The base URL embeds the bot token, so the client deliberately has no `Debug` impl.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    poll_timeout: u64,
}

impl TelegramClient {
    /// Create a client from configuration
    ///
    /// The HTTP timeout must exceed the long-poll timeout, which the configuration
    /// loader already enforces.
    pub fn new(config: &TelegramConfig) -> PlatformResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: format!(
                "{}/bot{}",
                config.api_url.trim_end_matches('/'),
                config.bot_token
            ),
            poll_timeout: config.poll_timeout,
        })
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> PlatformResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}/{method}", self.base_url))
            .json(params)
            .send()
            .await?;

        // Error answers still carry the JSON envelope, whatever the HTTP status.
        let body: ApiResponse<R> = response.json().await?;
        body.into_result()
    }

    /// Identity of the bot itself
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> PlatformResult<User> {
        self.call("getMe", &json!({})).await
    }

    /// Long-poll for updates after `offset`
    #[instrument(skip(self))]
    pub async fn get_updates(&self, offset: Option<i64>) -> PlatformResult<Vec<Update>> {
        let updates: Vec<Update> = self
            .call(
                "getUpdates",
                &json!({
                    "offset": offset,
                    "timeout": self.poll_timeout,
                    "allowed_updates": ["message"],
                }),
            )
            .await?;
        debug!(count = updates.len(), "Polled updates");
        Ok(updates)
    }

    #[instrument(skip(self))]
    pub async fn get_chat_administrators(&self, chat_id: i64) -> PlatformResult<Vec<ChatMember>> {
        self.call("getChatAdministrators", &json!({ "chat_id": chat_id }))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> PlatformResult<bool> {
        self.call(
            "deleteMessage",
            &json!({ "chat_id": chat_id, "message_id": message_id }),
        )
        .await
    }

    /// Send a message, optionally as a reply
    ///
    /// Replies are sent even if the original message was deleted in the meantime.
    #[instrument(skip(self, text))]
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> PlatformResult<Message> {
        let mut params = json!({ "chat_id": chat_id, "text": text });
        if let Some(message_id) = reply_to {
            params["reply_parameters"] = json!({
                "message_id": message_id,
                "allow_sending_without_reply": true,
            });
        }
        self.call("sendMessage", &params).await
    }

    #[instrument(skip(self))]
    pub async fn ban_chat_member(&self, chat_id: i64, user_id: i64) -> PlatformResult<bool> {
        self.call(
            "banChatMember",
            &json!({ "chat_id": chat_id, "user_id": user_id }),
        )
        .await
    }

    /// Lift a platform-side ban; a no-op for members who are not banned
    #[instrument(skip(self))]
    pub async fn unban_chat_member(&self, chat_id: i64, user_id: i64) -> PlatformResult<bool> {
        self.call(
            "unbanChatMember",
            &json!({ "chat_id": chat_id, "user_id": user_id, "only_if_banned": true }),
        )
        .await
    }
}
