//! Disk write-through for cache slices.
//!
//! Mirrors every slice mutation to a JSON snapshot per entity kind.
//! Fire-and-forget: persistence failures are logged at warn and never
//! propagated to the caller that mutated the cache. A storage-full style
//! failure clears every cache file and retries the write once.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::entity::CacheEntity;
use crate::error::CacheError;
use crate::kind::EntityKind;
use crate::slice::EntitySlice;

const COLUMN_SETTINGS_FILE: &str = "jobsuite_column_settings.json";

/// Snapshot directory handle.
#[derive(Debug, Clone)]
pub struct CacheDir {
    dir: PathBuf,
}

impl CacheDir {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, kind: EntityKind) -> PathBuf {
        self.dir.join(kind.snapshot_file())
    }

    /// Mirror a slice to disk. Never fails; see the module docs.
    pub fn persist<T: CacheEntity>(&self, kind: EntityKind, slice: &EntitySlice<T>) {
        let json = match serde_json::to_vec(slice) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%kind, %error, "failed to serialize cache snapshot");
                return;
            }
        };

        if let Err(error) = self.write_snapshot(kind, &json) {
            if matches!(
                error.kind(),
                std::io::ErrorKind::StorageFull | std::io::ErrorKind::QuotaExceeded
            ) {
                tracing::warn!(%kind, "cache storage full; clearing all snapshots and retrying");
                if let Err(error) = self.clear_all() {
                    tracing::warn!(%error, "failed to clear cache snapshots");
                    return;
                }
                if let Err(error) = self.write_snapshot(kind, &json) {
                    tracing::warn!(%kind, %error, "cache snapshot retry failed");
                }
            } else {
                tracing::warn!(%kind, %error, "failed to write cache snapshot");
            }
        }
    }

    fn write_snapshot(&self, kind: EntityKind, json: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.snapshot_path(kind), json)
    }

    /// Load a snapshot. `Ok(None)` when no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] on unreadable or unparseable snapshots.
    pub fn load<T: CacheEntity>(
        &self,
        kind: EntityKind,
    ) -> Result<Option<EntitySlice<T>>, CacheError> {
        let path = self.snapshot_path(kind);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// The snapshot timestamp for a kind, if a snapshot exists and parses.
    #[must_use]
    pub fn timestamp(&self, kind: EntityKind) -> Option<DateTime<Utc>> {
        let bytes = fs::read(self.snapshot_path(kind)).ok()?;
        let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        value
            .get("last_fetched")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }

    /// Remove one kind's snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] when an existing file cannot be removed.
    pub fn clear(&self, kind: EntityKind) -> Result<(), CacheError> {
        let path = self.snapshot_path(kind);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Remove every snapshot (column settings included).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] when a file cannot be removed.
    pub fn clear_all(&self) -> Result<(), CacheError> {
        for kind in EntityKind::ALL {
            self.clear(kind)?;
        }
        let settings = self.dir.join(COLUMN_SETTINGS_FILE);
        if settings.exists() {
            fs::remove_file(settings)?;
        }
        Ok(())
    }

    /// Save board column settings verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] on serialization or write failure.
    pub fn save_column_settings(&self, settings: &serde_json::Value) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.dir.join(COLUMN_SETTINGS_FILE),
            serde_json::to_vec(settings)?,
        )?;
        Ok(())
    }

    /// Load board column settings. `Ok(None)` when never saved.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] on read or parse failure.
    pub fn load_column_settings(&self) -> Result<Option<serde_json::Value>, CacheError> {
        let path = self.dir.join(COLUMN_SETTINGS_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use jobsuite_core::{Estimate, EstimateStatus};
    use pretty_assertions::assert_eq;

    use super::*;

    fn estimate(id: &str) -> Estimate {
        Estimate {
            id: id.to_string(),
            status: EstimateStatus::NewLead,
            ..Estimate::default()
        }
    }

    #[test]
    fn snapshot_round_trip_preserves_order_and_timestamp() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let cache = CacheDir::new(tmp.path());

        let mut slice = EntitySlice::default();
        slice.set_all(vec![estimate("e-1"), estimate("e-2"), estimate("e-3")]);
        cache.persist(EntityKind::Estimates, &slice);

        let loaded: EntitySlice<Estimate> = cache
            .load(EntityKind::Estimates)
            .expect("load")
            .expect("snapshot exists");
        assert_eq!(loaded.ids, slice.ids);
        assert_eq!(loaded.last_fetched, slice.last_fetched);
        assert_eq!(
            cache.timestamp(EntityKind::Estimates),
            slice.last_fetched
        );
    }

    #[test]
    fn missing_snapshot_loads_as_none() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let cache = CacheDir::new(tmp.path());
        let loaded: Option<EntitySlice<Estimate>> =
            cache.load(EntityKind::Clients).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn clear_all_removes_every_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let cache = CacheDir::new(tmp.path());

        let mut slice = EntitySlice::default();
        slice.set_all(vec![estimate("e-1")]);
        cache.persist(EntityKind::Estimates, &slice);
        cache.persist(EntityKind::Projects, &slice);
        cache
            .save_column_settings(&serde_json::json!({"order": ["NEW_LEAD"]}))
            .expect("settings");

        cache.clear_all().expect("clear");
        assert!(std::fs::read_dir(tmp.path()).expect("dir").next().is_none());
    }

    #[test]
    fn column_settings_round_trip() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let cache = CacheDir::new(tmp.path());

        let settings = serde_json::json!({"hidden": ["ARCHIVED"], "widths": {"NEW_LEAD": 280}});
        cache.save_column_settings(&settings).expect("save");
        assert_eq!(
            cache.load_column_settings().expect("load"),
            Some(settings)
        );
    }
}
