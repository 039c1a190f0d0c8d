//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage timeout: {0}")]
    StorageTimeout(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and replies
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUserId(_) => "INVALID_USER_ID",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageTimeout(_) => "STORAGE_TIMEOUT",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidUserId(_))
    }

    /// Check if this error came from the storage engine
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::StorageTimeout(_))
    }
}
