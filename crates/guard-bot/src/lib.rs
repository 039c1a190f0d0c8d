//! # guard-bot
//!
//! Telegram front end for the contract-address moderation engine: Bot API client,
//! update translation, per-event handler, long-poll dispatcher and liveness server.

pub mod app;
pub mod dispatcher;
pub mod events;
pub mod handler;
pub mod platform;
pub mod server;
pub mod telegram;

pub use app::run;
pub use events::InboundEvent;
pub use handler::EventHandler;
pub use platform::{ChatPlatform, MessageId, UpdateSource};
