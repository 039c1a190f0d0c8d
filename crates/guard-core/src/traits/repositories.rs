//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the storage layer provides the
//! implementation. Offenders and bans live in two separately keyed collections.

use async_trait::async_trait;

use crate::entities::{BanRecord, Offender, Subject};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Offender Repository
// ============================================================================

#[async_trait]
pub trait OffenderRepository: Send + Sync {
    /// Find the offender record for a user
    async fn find(&self, user_id: UserId) -> RepoResult<Option<Offender>>;

    /// Atomically add one warning and return the updated record
    ///
    /// Creates the record on first use. Concurrent calls for the same user must never
    /// lose an increment.
    async fn increment_warnings(&self, subject: &Subject) -> RepoResult<Offender>;
}

// ============================================================================
// Ban Repository
// ============================================================================

#[async_trait]
pub trait BanRepository: Send + Sync {
    /// Check if a ban record exists for the user
    async fn is_banned(&self, user_id: UserId) -> RepoResult<bool>;

    /// Get the ban record
    async fn find(&self, user_id: UserId) -> RepoResult<Option<BanRecord>>;

    /// Record a ban and retire the offender record as one unit
    ///
    /// If the two writes cannot be made atomic, the ban must be written first so a
    /// failure in between leaves the user banned.
    async fn ban_offender(&self, ban: &BanRecord) -> RepoResult<()>;

    /// Remove a ban, returning whether one existed
    async fn delete(&self, user_id: UserId) -> RepoResult<bool>;
}
