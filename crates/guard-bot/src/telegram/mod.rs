//! Telegram Bot API
//!
//! Wire types, the HTTP client and its error type.

mod client;
mod error;
mod types;

pub use client::TelegramClient;
pub use error::{PlatformError, PlatformResult};
pub use types::{ApiResponse, Chat, ChatMember, Message, Update, User};
