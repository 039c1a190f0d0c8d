//! Services - application logic over the repository ports

mod context;
mod error;
mod escalation;

pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use escalation::EscalationEngine;
