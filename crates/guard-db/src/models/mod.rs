//! Database models - SQLx-compatible structs for PostgreSQL tables

mod ban_record;
mod offender;

pub use ban_record::BanRecordModel;
pub use offender::OffenderModel;
