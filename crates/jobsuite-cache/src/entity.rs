//! The trait cached entities implement.

use jobsuite_core::{ContractorClient, Estimate};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An entity the normalized cache can hold.
///
/// `is_terminal` marks records that have left the active pipeline; slices
/// drop them on every write.
pub trait CacheEntity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn is_terminal(&self) -> bool {
        false
    }
}

impl CacheEntity for Estimate {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl CacheEntity for ContractorClient {
    fn id(&self) -> &str {
        &self.id
    }
}
