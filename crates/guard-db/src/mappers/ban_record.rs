//! BanRecord entity <-> model mapper

use guard_core::entities::BanRecord;
use guard_core::value_objects::UserId;

use crate::models::BanRecordModel;

/// Convert BanRecordModel to BanRecord entity
impl From<BanRecordModel> for BanRecord {
    fn from(model: BanRecordModel) -> Self {
        BanRecord {
            user_id: UserId::new(model.user_id),
            display_name: model.display_name,
            banned_at: model.banned_at,
        }
    }
}
