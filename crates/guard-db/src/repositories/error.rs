//! Error handling utilities for repositories

use guard_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Pool exhaustion surfaces as a timeout so callers can tell a stalled store apart from
/// a failed query.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut => {
            DomainError::StorageTimeout("timed out acquiring a database connection".to_string())
        }
        other => DomainError::DatabaseError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_storage_timeout() {
        let err = map_db_error(SqlxError::PoolTimedOut);
        assert_eq!(err.code(), "STORAGE_TIMEOUT");
        assert!(err.is_storage());
    }

    #[test]
    fn test_other_errors_map_to_database_error() {
        let err = map_db_error(SqlxError::RowNotFound);
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
