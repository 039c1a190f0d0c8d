//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in guard-core.

mod ban;
mod error;
mod offender;

pub use ban::PgBanRepository;
pub use offender::PgOffenderRepository;
