//! # guard-core
//!
//! Domain layer for the moderation bot: offender and ban-record entities, the
//! contract-address detector, the escalation rules, and the repository traits the
//! storage layer implements. Nothing here knows about the chat platform or the database.

pub mod detection;
pub mod entities;
pub mod error;
pub mod escalation;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use detection::{is_flagged, ContractAddressDetector};
pub use entities::{BanRecord, Offender, Subject};
pub use error::DomainError;
pub use escalation::{Decision, ModerationAction, StateMutation, BAN_THRESHOLD};
pub use traits::{BanRepository, OffenderRepository, RepoResult};
pub use value_objects::{ChatId, IdParseError, UserId};
