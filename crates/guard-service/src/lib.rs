//! # guard-service
//!
//! Application layer: runs the escalation rules against the repositories, parses admin
//! commands and renders the notices posted to the chat.

pub mod commands;
pub mod notices;
pub mod services;

pub use commands::{AdminCommand, CommandError};
pub use services::{EscalationEngine, ServiceContext, ServiceError, ServiceResult};
