//! Test fixtures and event builders

use std::sync::atomic::{AtomicI64, Ordering};

use guard_bot::InboundEvent;
use guard_core::entities::Subject;
use guard_core::value_objects::{ChatId, UserId};
use guard_service::AdminCommand;

/// A well-formed 44-character base-58 address
pub const SAMPLE_ADDRESS: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

/// Chat used by every scenario
pub const GROUP: i64 = -100_200_300;

/// Administrator of [`GROUP`]
pub const ADMIN: i64 = 1;

static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Unique positive id for users and messages
///
/// Seeded from the clock so PostgreSQL-backed runs do not collide with earlier ones.
pub fn unique_id() -> i64 {
    let base = (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or_default()
        % 1_000_000_000_000) as i64;
    base * 1000 + COUNTER.fetch_add(1, Ordering::SeqCst) % 1000
}

/// A user in [`GROUP`]
#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub name: String,
}

impl Member {
    pub fn unique(name: &str) -> Self {
        Self {
            id: unique_id(),
            name: name.to_string(),
        }
    }

    pub fn admin() -> Self {
        Self {
            id: ADMIN,
            name: "admin".to_string(),
        }
    }

    pub fn user_id(&self) -> UserId {
        UserId::new(self.id)
    }

    pub fn subject(&self) -> Subject {
        Subject::new(self.user_id(), self.name.clone())
    }

    /// A text message from this member
    pub fn says(&self, message_id: i64, text: &str) -> InboundEvent {
        InboundEvent::Message {
            chat_id: ChatId::new(GROUP),
            message_id,
            sender: self.subject(),
            text: text.to_string(),
        }
    }

    /// This member posting a contract address
    pub fn shills(&self, message_id: i64) -> InboundEvent {
        self.says(message_id, &format!("huge gem, buy now {SAMPLE_ADDRESS}"))
    }

    /// This member joining the group
    pub fn joins(&self) -> InboundEvent {
        InboundEvent::MemberJoined {
            chat_id: ChatId::new(GROUP),
            member: self.subject(),
        }
    }

    /// This member sending arbitrary `/unban` text
    pub fn commands(&self, message_id: i64, text: &str) -> InboundEvent {
        InboundEvent::UnbanCommand {
            chat_id: ChatId::new(GROUP),
            message_id,
            sender: self.subject(),
            text: text.to_string(),
            command: AdminCommand::parse(text, None).expect("text is an /unban command"),
        }
    }

    /// This member sending `/unban <target>`
    pub fn unbans(&self, message_id: i64, target: &Member) -> InboundEvent {
        InboundEvent::UnbanCommand {
            chat_id: ChatId::new(GROUP),
            message_id,
            sender: self.subject(),
            text: format!("/unban {}", target.id),
            command: Ok(AdminCommand::Unban(target.user_id())),
        }
    }
}
