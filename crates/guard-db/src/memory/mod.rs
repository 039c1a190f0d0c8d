//! In-memory repositories
//!
//! `DashMap`-backed implementations of the repository traits for the `memory` storage
//! backend and for tests. State is process-local and lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use guard_core::entities::{BanRecord, Offender, Subject};
use guard_core::escalation::next_offense;
use guard_core::traits::{BanRepository, OffenderRepository, RepoResult};
use guard_core::value_objects::UserId;

/// Shared maps behind the in-memory repositories
///
/// Both repositories handed out by one store see the same state, which `ban_offender`
/// needs to retire the offender record.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    offenders: Arc<DashMap<UserId, Offender>>,
    bans: Arc<DashMap<UserId, BanRecord>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Offender repository over this store
    pub fn offenders(&self) -> InMemoryOffenderRepository {
        InMemoryOffenderRepository {
            offenders: Arc::clone(&self.offenders),
        }
    }

    /// Ban repository over this store
    pub fn bans(&self) -> InMemoryBanRepository {
        InMemoryBanRepository {
            offenders: Arc::clone(&self.offenders),
            bans: Arc::clone(&self.bans),
        }
    }
}

/// In-memory implementation of OffenderRepository
#[derive(Clone)]
pub struct InMemoryOffenderRepository {
    offenders: Arc<DashMap<UserId, Offender>>,
}

#[async_trait]
impl OffenderRepository for InMemoryOffenderRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId) -> RepoResult<Option<Offender>> {
        Ok(self.offenders.get(&user_id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self), fields(user_id = %subject.user_id))]
    async fn increment_warnings(&self, subject: &Subject) -> RepoResult<Offender> {
        // The entry guard holds the shard lock across read-modify-write.
        let updated = match self.offenders.entry(subject.user_id) {
            Entry::Occupied(mut entry) => {
                let next = next_offense(Some(entry.get()), subject);
                entry.insert(next.clone());
                next
            }
            Entry::Vacant(entry) => {
                let next = next_offense(None, subject);
                entry.insert(next.clone());
                next
            }
        };
        Ok(updated)
    }
}

/// In-memory implementation of BanRepository
#[derive(Clone)]
pub struct InMemoryBanRepository {
    offenders: Arc<DashMap<UserId, Offender>>,
    bans: Arc<DashMap<UserId, BanRecord>>,
}

#[async_trait]
impl BanRepository for InMemoryBanRepository {
    #[instrument(skip(self))]
    async fn is_banned(&self, user_id: UserId) -> RepoResult<bool> {
        Ok(self.bans.contains_key(&user_id))
    }

    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId) -> RepoResult<Option<BanRecord>> {
        Ok(self.bans.get(&user_id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self), fields(user_id = %ban.user_id))]
    async fn ban_offender(&self, ban: &BanRecord) -> RepoResult<()> {
        // Ban first, then retire the offender.
        self.bans.entry(ban.user_id).or_insert_with(|| ban.clone());
        self.offenders.remove(&ban.user_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: UserId) -> RepoResult<bool> {
        Ok(self.bans.remove(&user_id).is_some())
    }
}
