//! The in-memory cache store with disk write-through.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use jobsuite_core::{ContractorClient, Estimate};

use crate::entity::CacheEntity;
use crate::error::CacheError;
use crate::kind::EntityKind;
use crate::persist::CacheDir;
use crate::slice::EntitySlice;

/// One cached slice per entity kind, hydrated from disk at startup and
/// mirrored back on every mutation.
#[derive(Debug)]
pub struct CacheStore {
    dir: CacheDir,
    estimates: RwLock<EntitySlice<Estimate>>,
    clients: RwLock<EntitySlice<ContractorClient>>,
    projects: RwLock<EntitySlice<Estimate>>,
}

fn read_guard<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_guard<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl CacheStore {
    /// Open a store over `dir`, loading any snapshots present.
    ///
    /// Unreadable snapshots are treated as absent and logged at warn, so a
    /// corrupt file never prevents startup.
    #[must_use]
    pub fn open(dir: CacheDir) -> Self {
        let estimates = Self::hydrate(&dir, EntityKind::Estimates);
        let clients = Self::hydrate(&dir, EntityKind::Clients);
        let projects = Self::hydrate(&dir, EntityKind::Projects);
        Self {
            dir,
            estimates: RwLock::new(estimates),
            clients: RwLock::new(clients),
            projects: RwLock::new(projects),
        }
    }

    fn hydrate<T: CacheEntity>(dir: &CacheDir, kind: EntityKind) -> EntitySlice<T> {
        match dir.load(kind) {
            Ok(Some(slice)) => {
                tracing::debug!(%kind, count = slice.len(), "hydrated cache slice");
                slice
            }
            Ok(None) => EntitySlice::default(),
            Err(error) => {
                tracing::warn!(%kind, %error, "discarding unreadable cache snapshot");
                EntitySlice::default()
            }
        }
    }

    #[must_use]
    pub fn dir(&self) -> &CacheDir {
        &self.dir
    }

    fn mutate_estimates(
        &self,
        kind: EntityKind,
        f: impl FnOnce(&mut EntitySlice<Estimate>),
    ) {
        let lock = match kind {
            EntityKind::Estimates => &self.estimates,
            EntityKind::Projects => &self.projects,
            EntityKind::Clients => return,
        };
        let mut slice = write_guard(lock);
        f(&mut slice);
        self.dir.persist(kind, &slice);
    }

    fn mutate_clients(&self, f: impl FnOnce(&mut EntitySlice<ContractorClient>)) {
        let mut slice = write_guard(&self.clients);
        f(&mut slice);
        self.dir.persist(EntityKind::Clients, &slice);
    }

    // --- estimate / project slices -------------------------------------

    pub fn set_estimates(&self, kind: EntityKind, records: Vec<Estimate>) {
        self.mutate_estimates(kind, |slice| slice.set_all(records));
    }

    pub fn upsert_estimate(&self, kind: EntityKind, record: Estimate) {
        self.mutate_estimates(kind, |slice| slice.add(record));
    }

    pub fn remove_estimate(&self, kind: EntityKind, id: &str) {
        self.mutate_estimates(kind, |slice| slice.remove(id));
    }

    #[must_use]
    pub fn estimates(&self, kind: EntityKind) -> Vec<Estimate> {
        match kind {
            EntityKind::Estimates => read_guard(&self.estimates).select_all(),
            EntityKind::Projects => read_guard(&self.projects).select_all(),
            EntityKind::Clients => Vec::new(),
        }
    }

    #[must_use]
    pub fn estimate_by_id(&self, kind: EntityKind, id: &str) -> Option<Estimate> {
        match kind {
            EntityKind::Estimates => read_guard(&self.estimates).select_by_id(id),
            EntityKind::Projects => read_guard(&self.projects).select_by_id(id),
            EntityKind::Clients => None,
        }
    }

    // --- client slice ---------------------------------------------------

    pub fn set_clients(&self, records: Vec<ContractorClient>) {
        self.mutate_clients(|slice| slice.set_all(records));
    }

    pub fn upsert_client(&self, record: ContractorClient) {
        self.mutate_clients(|slice| slice.add(record));
    }

    pub fn remove_client(&self, id: &str) {
        self.mutate_clients(|slice| slice.remove(id));
    }

    #[must_use]
    pub fn clients(&self) -> Vec<ContractorClient> {
        read_guard(&self.clients).select_all()
    }

    #[must_use]
    pub fn client_by_id(&self, id: &str) -> Option<ContractorClient> {
        read_guard(&self.clients).select_by_id(id)
    }

    // --- kind-generic views ----------------------------------------------

    #[must_use]
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Estimates => read_guard(&self.estimates).len(),
            EntityKind::Clients => read_guard(&self.clients).len(),
            EntityKind::Projects => read_guard(&self.projects).len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.len(kind) == 0
    }

    #[must_use]
    pub fn last_fetched(&self, kind: EntityKind) -> Option<DateTime<Utc>> {
        match kind {
            EntityKind::Estimates => read_guard(&self.estimates).last_fetched,
            EntityKind::Clients => read_guard(&self.clients).last_fetched,
            EntityKind::Projects => read_guard(&self.projects).last_fetched,
        }
    }

    /// A slice needs refetching when invalidated, never fetched, or older
    /// than `ttl`.
    #[must_use]
    pub fn is_stale(&self, kind: EntityKind, ttl: Duration) -> bool {
        match kind {
            EntityKind::Estimates => read_guard(&self.estimates).is_stale(ttl),
            EntityKind::Clients => read_guard(&self.clients).is_stale(ttl),
            EntityKind::Projects => read_guard(&self.projects).is_stale(ttl),
        }
    }

    /// Mark a slice for refetch on the next refresh pass without dropping
    /// its contents.
    pub fn invalidate(&self, kind: EntityKind) {
        match kind {
            EntityKind::Estimates => write_guard(&self.estimates).invalidate(),
            EntityKind::Clients => write_guard(&self.clients).invalidate(),
            EntityKind::Projects => write_guard(&self.projects).invalidate(),
        }
    }

    /// Sweep records whose status has gone terminal since they were cached.
    /// Returns the number removed across all slices.
    pub fn cleanup_archived(&self) -> usize {
        let mut removed = 0;
        self.mutate_estimates(EntityKind::Estimates, |slice| {
            removed += slice.cleanup_archived();
        });
        self.mutate_estimates(EntityKind::Projects, |slice| {
            removed += slice.cleanup_archived();
        });
        removed
    }

    /// Drop every slice's contents and snapshot files.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] when a snapshot file cannot be removed.
    pub fn clear(&self) -> Result<(), CacheError> {
        *write_guard(&self.estimates) = EntitySlice::default();
        *write_guard(&self.clients) = EntitySlice::default();
        *write_guard(&self.projects) = EntitySlice::default();
        self.dir.clear_all()
    }
}
