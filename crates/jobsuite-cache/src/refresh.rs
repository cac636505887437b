//! Background refresh of cache slices.
//!
//! One interval task per entity kind refetches its slice when it has gone
//! stale, but only while the user is active. Manual refreshes share an
//! in-flight set with the timers so a kind is never fetched twice at once.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use jobsuite_core::{ContractorClient, Estimate};
use tokio::task::JoinHandle;

use crate::activity::ActivityTracker;
use crate::error::CacheError;
use crate::kind::EntityKind;
use crate::store::CacheStore;

/// Fetches fresh entity lists from the upstream.
pub trait EntityFetcher: Send + Sync + 'static {
    fn fetch_estimates(
        &self,
    ) -> impl Future<Output = Result<Vec<Estimate>, CacheError>> + Send;

    fn fetch_clients(
        &self,
    ) -> impl Future<Output = Result<Vec<ContractorClient>, CacheError>> + Send;

    fn fetch_projects(
        &self,
    ) -> impl Future<Output = Result<Vec<Estimate>, CacheError>> + Send;
}

/// Timing knobs for the refresh loops.
#[derive(Debug, Clone, Copy)]
pub struct RefreshSchedule {
    /// How old a slice may get before a tick refetches it.
    pub expiration: Duration,
    /// How often each loop wakes to check staleness.
    pub tick: Duration,
    /// How recently the user must have interacted for refresh to run.
    pub activity_window: Duration,
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self {
            expiration: Duration::from_secs(600),
            tick: Duration::from_secs(60),
            activity_window: Duration::from_secs(300),
        }
    }
}

/// Drives the per-kind refresh loops over a [`CacheStore`].
pub struct RefreshEngine<F> {
    store: Arc<CacheStore>,
    fetcher: Arc<F>,
    activity: Arc<ActivityTracker>,
    schedule: RefreshSchedule,
    in_flight: Arc<Mutex<HashSet<EntityKind>>>,
}

impl<F> Clone for RefreshEngine<F> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            fetcher: Arc::clone(&self.fetcher),
            activity: Arc::clone(&self.activity),
            schedule: self.schedule,
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<F: EntityFetcher> RefreshEngine<F> {
    #[must_use]
    pub fn new(
        store: Arc<CacheStore>,
        fetcher: Arc<F>,
        activity: Arc<ActivityTracker>,
        schedule: RefreshSchedule,
    ) -> Self {
        Self {
            store,
            fetcher,
            activity,
            schedule,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    #[must_use]
    pub fn activity(&self) -> &Arc<ActivityTracker> {
        &self.activity
    }

    /// Spawn one interval loop per entity kind. The handles run until
    /// aborted or the runtime shuts down.
    #[must_use]
    pub fn spawn(&self) -> Vec<JoinHandle<()>> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let engine = self.clone();
                tokio::spawn(async move {
                    let mut interval = tokio::time::interval(engine.schedule.tick);
                    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                    // The first tick fires immediately; skip it so startup
                    // reads come from the hydrated snapshot.
                    interval.tick().await;
                    loop {
                        interval.tick().await;
                        engine.tick(kind).await;
                    }
                })
            })
            .collect()
    }

    async fn tick(&self, kind: EntityKind) {
        if !self.activity.is_active(self.schedule.activity_window) {
            tracing::trace!(%kind, "user inactive; skipping refresh tick");
            return;
        }
        if !self.store.is_stale(kind, self.schedule.expiration) {
            return;
        }
        if let Err(error) = self.refresh_now(kind).await {
            tracing::warn!(%kind, %error, "background refresh failed");
        }
    }

    /// Refetch one kind immediately, replacing its slice on success.
    ///
    /// A fetch already in flight for the kind is not duplicated; the call
    /// returns without touching the slice. On failure the stale slice is
    /// left as-is for the next attempt.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Fetch`] when the upstream fetch fails.
    pub async fn refresh_now(&self, kind: EntityKind) -> Result<(), CacheError> {
        if !self.begin(kind) {
            tracing::debug!(%kind, "refresh already in flight");
            return Ok(());
        }
        let result = self.fetch_and_store(kind).await;
        self.finish(kind);
        result
    }

    /// Refresh every kind, returning the first error after attempting all.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Fetch`] when any upstream fetch fails.
    pub async fn refresh_all(&self) -> Result<(), CacheError> {
        let mut first_error = None;
        for kind in EntityKind::ALL {
            if let Err(error) = self.refresh_now(kind).await {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn fetch_and_store(&self, kind: EntityKind) -> Result<(), CacheError> {
        match kind {
            EntityKind::Estimates => {
                let records = self.fetcher.fetch_estimates().await?;
                tracing::debug!(count = records.len(), "refreshed estimates");
                self.store.set_estimates(EntityKind::Estimates, records);
            }
            EntityKind::Clients => {
                let records = self.fetcher.fetch_clients().await?;
                tracing::debug!(count = records.len(), "refreshed clients");
                self.store.set_clients(records);
            }
            EntityKind::Projects => {
                let records = self.fetcher.fetch_projects().await?;
                tracing::debug!(count = records.len(), "refreshed projects");
                self.store.set_estimates(EntityKind::Projects, records);
            }
        }
        Ok(())
    }

    fn begin(&self, kind: EntityKind) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind)
    }

    fn finish(&self, kind: EntityKind) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&kind);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use jobsuite_core::EstimateStatus;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::persist::CacheDir;

    struct CountingFetcher {
        estimate_calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        fn new(fail: bool) -> Self {
            Self {
                estimate_calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl EntityFetcher for CountingFetcher {
        async fn fetch_estimates(&self) -> Result<Vec<Estimate>, CacheError> {
            self.estimate_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CacheError::Fetch("backend unreachable".into()));
            }
            Ok(vec![Estimate {
                id: "e-1".into(),
                status: EstimateStatus::NewLead,
                ..Estimate::default()
            }])
        }

        async fn fetch_clients(&self) -> Result<Vec<ContractorClient>, CacheError> {
            Ok(Vec::new())
        }

        async fn fetch_projects(&self) -> Result<Vec<Estimate>, CacheError> {
            Ok(Vec::new())
        }
    }

    fn engine(tmp: &tempfile::TempDir, fail: bool) -> RefreshEngine<CountingFetcher> {
        RefreshEngine::new(
            Arc::new(CacheStore::open(CacheDir::new(tmp.path()))),
            Arc::new(CountingFetcher::new(fail)),
            Arc::new(ActivityTracker::new()),
            RefreshSchedule::default(),
        )
    }

    #[tokio::test]
    async fn refresh_now_replaces_the_slice() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let engine = engine(&tmp, false);

        engine
            .refresh_now(EntityKind::Estimates)
            .await
            .expect("refresh");
        assert_eq!(engine.store().len(EntityKind::Estimates), 1);
        assert_eq!(
            engine.fetcher.estimate_calls.load(Ordering::SeqCst),
            1
        );
    }

    #[tokio::test]
    async fn failed_refresh_leaves_the_slice_untouched() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let engine = engine(&tmp, true);

        engine.store().set_estimates(
            EntityKind::Estimates,
            vec![Estimate {
                id: "e-old".into(),
                status: EstimateStatus::EstimateSent,
                ..Estimate::default()
            }],
        );

        let result = engine.refresh_now(EntityKind::Estimates).await;
        assert!(result.is_err());
        assert_eq!(engine.store().len(EntityKind::Estimates), 1);
        assert!(
            engine
                .store()
                .estimate_by_id(EntityKind::Estimates, "e-old")
                .is_some()
        );
    }

    #[tokio::test]
    async fn inactive_tick_does_not_fetch() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let engine = engine(&tmp, false);
        engine.activity().set_foreground(false);

        engine.tick(EntityKind::Estimates).await;
        assert_eq!(
            engine.fetcher.estimate_calls.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn fresh_slice_is_not_refetched_on_tick() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let engine = engine(&tmp, false);

        engine
            .refresh_now(EntityKind::Estimates)
            .await
            .expect("refresh");
        engine.tick(EntityKind::Estimates).await;
        assert_eq!(
            engine.fetcher.estimate_calls.load(Ordering::SeqCst),
            1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_loops_refetch_stale_slices() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let engine = engine(&tmp, false);
        engine.activity().set_foreground(true);

        let handles = engine.spawn();
        // The first tick is swallowed at startup; the refetch lands on the
        // second.
        tokio::time::sleep(engine.schedule.tick * 2).await;
        assert!(engine.fetcher.estimate_calls.load(Ordering::SeqCst) >= 1);
        assert_eq!(engine.store().len(EntityKind::Estimates), 1);
        for handle in handles {
            handle.abort();
        }
    }

    #[tokio::test]
    async fn in_flight_kind_is_not_fetched_twice() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let engine = engine(&tmp, false);

        assert!(engine.begin(EntityKind::Estimates));
        engine
            .refresh_now(EntityKind::Estimates)
            .await
            .expect("deduped refresh");
        assert_eq!(
            engine.fetcher.estimate_calls.load(Ordering::SeqCst),
            0
        );
        engine.finish(EntityKind::Estimates);
    }
}
