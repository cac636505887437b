//! Normalized per-kind entity slice.
//!
//! Invariant: every id in `ids` has exactly one record in `entities` and
//! vice versa, and `ids` preserves insertion order. Terminal-status records
//! never survive a write.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::CacheEntity;

/// Serializable state of one slice, also the on-disk snapshot shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: CacheEntity")]
pub struct EntitySlice<T> {
    pub entities: HashMap<String, T>,
    pub ids: Vec<String>,
    pub last_fetched: Option<DateTime<Utc>>,
    #[serde(skip)]
    invalidated: bool,
}

impl<T> Default for EntitySlice<T> {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            ids: Vec::new(),
            last_fetched: None,
            invalidated: false,
        }
    }
}

impl<T: CacheEntity> EntitySlice<T> {
    /// Replace the whole slice from a fetched list.
    ///
    /// Terminal records are filtered out, `ids` follows input order (a
    /// duplicate id keeps its first position; the last record wins), and
    /// `last_fetched` is stamped with now. Clears any invalidation mark.
    pub fn set_all(&mut self, records: Vec<T>) {
        self.entities = HashMap::with_capacity(records.len());
        self.ids = Vec::with_capacity(records.len());
        for record in records {
            if record.is_terminal() {
                continue;
            }
            let id = record.id().to_string();
            if self.entities.insert(id.clone(), record).is_none() {
                self.ids.push(id);
            }
        }
        self.last_fetched = Some(Utc::now());
        self.invalidated = false;
    }

    /// Insert or replace one record. A terminal record removes any cached
    /// copy instead.
    pub fn add(&mut self, record: T) {
        if record.is_terminal() {
            self.remove(record.id());
            return;
        }
        let id = record.id().to_string();
        if self.entities.insert(id.clone(), record).is_none() {
            self.ids.push(id);
        }
    }

    /// Merge an updated record over the cached copy (records are full
    /// backend responses, so the merge is a wholesale replace). Terminal
    /// records are removed; unknown non-terminal records are inserted.
    pub fn update(&mut self, record: T) {
        // Same semantics either way; the distinct entry point mirrors the
        // write paths callers use.
        self.add(record);
    }

    /// Remove a record by id. No-op when absent.
    pub fn remove(&mut self, id: &str) {
        if self.entities.remove(id).is_some() {
            self.ids.retain(|existing| existing != id);
        }
    }

    /// Sweep out any terminal-status stragglers (e.g. hydrated from an old
    /// snapshot). Returns how many were dropped.
    pub fn cleanup_archived(&mut self) -> usize {
        let stale: Vec<String> = self
            .ids
            .iter()
            .filter(|id| self.entities.get(*id).is_some_and(CacheEntity::is_terminal))
            .cloned()
            .collect();
        for id in &stale {
            self.remove(id);
        }
        stale.len()
    }

    /// All records in insertion order.
    #[must_use]
    pub fn select_all(&self) -> Vec<T> {
        self.ids
            .iter()
            .filter_map(|id| self.entities.get(id).cloned())
            .collect()
    }

    #[must_use]
    pub fn select_by_id(&self, id: &str) -> Option<T> {
        self.entities.get(id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Mark the slice for refresh on the next timer tick regardless of age.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    #[must_use]
    pub const fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Whether the slice needs a refetch: never fetched, marked invalid, or
    /// older than `ttl`.
    #[must_use]
    pub fn is_stale(&self, ttl: Duration) -> bool {
        if self.invalidated {
            return true;
        }
        match self.last_fetched {
            None => true,
            Some(at) => {
                let age = Utc::now().signed_duration_since(at);
                age >= chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jobsuite_core::{Estimate, EstimateStatus};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn estimate(id: &str, status: EstimateStatus) -> Estimate {
        Estimate {
            id: id.to_string(),
            status,
            ..Estimate::default()
        }
    }

    #[test]
    fn set_all_normalizes_ids_and_entities() {
        let mut slice = EntitySlice::default();
        slice.set_all(vec![
            estimate("e-1", EstimateStatus::NewLead),
            estimate("e-2", EstimateStatus::EstimateSent),
            estimate("e-3", EstimateStatus::ProjectInProgress),
        ]);

        assert_eq!(slice.ids, vec!["e-1", "e-2", "e-3"]);
        assert_eq!(slice.entities.len(), 3);
        assert!(slice.last_fetched.is_some());
        for id in &slice.ids {
            assert!(slice.entities.contains_key(id), "{id} missing from map");
        }
    }

    #[test]
    fn set_all_keeps_each_id_exactly_once() {
        let mut slice = EntitySlice::default();
        let mut dup = estimate("e-1", EstimateStatus::NewLead);
        dup.client_name = Some("second".into());
        slice.set_all(vec![estimate("e-1", EstimateStatus::NewLead), dup]);

        assert_eq!(slice.ids, vec!["e-1"]);
        // Last occurrence wins.
        assert_eq!(
            slice.select_by_id("e-1").and_then(|e| e.client_name),
            Some("second".to_string())
        );
    }

    #[rstest]
    #[case(EstimateStatus::Archived)]
    #[case(EstimateStatus::ProjectCompleted)]
    #[case(EstimateStatus::ProjectCancelled)]
    fn terminal_statuses_are_filtered_on_set(#[case] status: EstimateStatus) {
        let mut slice = EntitySlice::default();
        slice.set_all(vec![
            estimate("e-1", EstimateStatus::NewLead),
            estimate("e-2", status),
        ]);
        assert_eq!(slice.ids, vec!["e-1"]);
        assert!(slice.select_by_id("e-2").is_none());
    }

    #[test]
    fn add_terminal_removes_existing_copy() {
        let mut slice = EntitySlice::default();
        slice.set_all(vec![estimate("e-1", EstimateStatus::EstimateSent)]);

        slice.add(estimate("e-1", EstimateStatus::Archived));
        assert!(slice.is_empty());
        assert!(slice.select_by_id("e-1").is_none());
    }

    #[test]
    fn update_inserts_unknown_non_terminal_records() {
        let mut slice = EntitySlice::default();
        slice.update(estimate("e-9", EstimateStatus::NewLead));
        assert_eq!(slice.len(), 1);

        // Terminal update of an unknown id stays a no-op.
        slice.update(estimate("e-10", EstimateStatus::ProjectCancelled));
        assert_eq!(slice.len(), 1);
    }

    #[test]
    fn cleanup_archived_sweeps_stragglers() {
        let mut slice = EntitySlice::default();
        slice.set_all(vec![estimate("e-1", EstimateStatus::NewLead)]);
        // Simulate a snapshot that was written before a status change.
        slice
            .entities
            .insert("e-2".into(), estimate("e-2", EstimateStatus::Archived));
        slice.ids.push("e-2".into());

        assert_eq!(slice.cleanup_archived(), 1);
        assert_eq!(slice.ids, vec!["e-1"]);
    }

    #[test]
    fn select_all_preserves_insertion_order() {
        let mut slice = EntitySlice::default();
        let records: Vec<Estimate> = (0..5)
            .map(|i| estimate(&format!("e-{i}"), EstimateStatus::NewLead))
            .collect();
        slice.set_all(records.clone());
        assert_eq!(slice.select_all(), records);
    }

    #[test]
    fn staleness_and_invalidation() {
        let mut slice: EntitySlice<Estimate> = EntitySlice::default();
        assert!(slice.is_stale(Duration::from_secs(600)), "never fetched");

        slice.set_all(vec![]);
        assert!(!slice.is_stale(Duration::from_secs(600)));
        assert!(slice.is_stale(Duration::ZERO));

        slice.invalidate();
        assert!(slice.is_stale(Duration::from_secs(600)));

        // A fresh set clears the mark.
        slice.set_all(vec![]);
        assert!(!slice.is_invalidated());
    }
}
