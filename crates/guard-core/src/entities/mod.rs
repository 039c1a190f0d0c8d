//! Domain entities - per-user moderation state

mod ban_record;
mod offender;
mod subject;

pub use ban_record::BanRecord;
pub use offender::Offender;
pub use subject::Subject;
