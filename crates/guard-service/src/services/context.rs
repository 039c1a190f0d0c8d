//! Service context - dependency container for services
//!
//! Holds the repositories and the detector used by the escalation engine.

use std::sync::Arc;

use guard_core::traits::{BanRepository, OffenderRepository};
use guard_core::ContractAddressDetector;
use guard_db::{InMemoryStore, PgBanRepository, PgOffenderRepository, PgPool};

/// Service context containing all dependencies
///
/// Storage handles are built once at startup and injected here; nothing reaches for a
/// global connection.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    offender_repo: Arc<dyn OffenderRepository>,
    ban_repo: Arc<dyn BanRepository>,

    // Pattern matching
    detector: ContractAddressDetector,
}

impl ServiceContext {
    /// Create a new service context from explicit repositories
    pub fn new(
        offender_repo: Arc<dyn OffenderRepository>,
        ban_repo: Arc<dyn BanRepository>,
    ) -> Self {
        Self {
            offender_repo,
            ban_repo,
            detector: ContractAddressDetector::new(),
        }
    }

    /// Context backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgOffenderRepository::new(pool.clone())),
            Arc::new(PgBanRepository::new(pool)),
        )
    }

    /// Context backed by process-local maps
    pub fn in_memory(store: &InMemoryStore) -> Self {
        Self::new(Arc::new(store.offenders()), Arc::new(store.bans()))
    }

    // =========================================================================
    // Repository Accessors
    // =========================================================================

    pub fn offender_repo(&self) -> &dyn OffenderRepository {
        self.offender_repo.as_ref()
    }

    pub fn ban_repo(&self) -> &dyn BanRepository {
        self.ban_repo.as_ref()
    }

    pub fn detector(&self) -> &ContractAddressDetector {
        &self.detector
    }
}
