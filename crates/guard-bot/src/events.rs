//! Inbound event translation
//!
//! Turns Bot API updates into the three events the moderation handler understands.
//! Private chats, channels and messages without text or joins are dropped here.

use guard_core::entities::Subject;
use guard_core::value_objects::{ChatId, UserId};
use guard_service::{AdminCommand, CommandError};

use crate::platform::MessageId;
use crate::telegram::{Update, User};

/// An event the handler acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A text message in a moderated chat
    Message {
        chat_id: ChatId,
        message_id: MessageId,
        sender: Subject,
        text: String,
    },
    /// A member joined (or was added to) a moderated chat
    MemberJoined { chat_id: ChatId, member: Subject },
    /// An `/unban` command, parsed or malformed
    ///
    /// Carries the raw text so a non-administrator's command is still screened.
    UnbanCommand {
        chat_id: ChatId,
        message_id: MessageId,
        sender: Subject,
        text: String,
        command: Result<AdminCommand, CommandError>,
    },
}

impl InboundEvent {
    /// Chat the event happened in
    pub fn chat_id(&self) -> ChatId {
        match self {
            Self::Message { chat_id, .. }
            | Self::MemberJoined { chat_id, .. }
            | Self::UnbanCommand { chat_id, .. } => *chat_id,
        }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::MemberJoined { .. } => "member_joined",
            Self::UnbanCommand { .. } => "unban_command",
        }
    }
}

fn subject_of(user: &User) -> Subject {
    Subject::from_profile(
        UserId::new(user.id),
        user.username.as_deref(),
        &user.first_name,
    )
}

/// Translate one update
///
/// `bot` is the bot's own account: its own join is not screened and `/unban@other_bot`
/// commands are ignored.
pub fn translate(update: &Update, bot: Option<&User>) -> Vec<InboundEvent> {
    let Some(message) = &update.message else {
        return Vec::new();
    };
    if !message.chat.is_group() {
        return Vec::new();
    }
    let chat_id = ChatId::new(message.chat.id);

    if !message.new_chat_members.is_empty() {
        return message
            .new_chat_members
            .iter()
            .filter(|member| !bot.is_some_and(|b| b.id == member.id))
            .map(|member| InboundEvent::MemberJoined {
                chat_id,
                member: subject_of(member),
            })
            .collect();
    }

    let (Some(text), Some(from)) = (&message.text, &message.from) else {
        return Vec::new();
    };

    let bot_username = bot.and_then(|b| b.username.as_deref());
    if let Some(command) = AdminCommand::parse(text, bot_username) {
        return vec![InboundEvent::UnbanCommand {
            chat_id,
            message_id: message.message_id,
            sender: subject_of(from),
            text: text.clone(),
            command,
        }];
    }

    vec![InboundEvent::Message {
        chat_id,
        message_id: message.message_id,
        sender: subject_of(from),
        text: text.clone(),
    }]
}
