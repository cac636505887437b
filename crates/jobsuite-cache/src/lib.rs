//! Normalized client-side entity cache.
//!
//! Each entity kind (estimates, clients, projects) lives in a slice of
//! records keyed by id plus an ordered id list. Slices are mirrored to JSON
//! snapshots on every mutation and hydrated at startup, and a background
//! engine refetches stale slices while the user is active.

pub mod activity;
pub mod entity;
pub mod error;
pub mod kind;
pub mod persist;
pub mod refresh;
pub mod slice;
pub mod store;

pub use activity::ActivityTracker;
pub use entity::CacheEntity;
pub use error::CacheError;
pub use kind::EntityKind;
pub use persist::CacheDir;
pub use refresh::{EntityFetcher, RefreshEngine, RefreshSchedule};
pub use slice::EntitySlice;
pub use store::CacheStore;
