//! Offender entity <-> model mapper

use guard_core::entities::Offender;
use guard_core::value_objects::UserId;

use crate::models::OffenderModel;

/// Convert OffenderModel to Offender entity
///
/// The column is constrained to be non-negative, so the clamp only guards against
/// rows written outside this crate.
impl From<OffenderModel> for Offender {
    fn from(model: OffenderModel) -> Self {
        Offender {
            user_id: UserId::new(model.user_id),
            display_name: model.display_name,
            warning_count: u32::try_from(model.warning_count).unwrap_or(0),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
