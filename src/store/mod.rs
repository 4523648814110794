pub mod disk;
pub mod memory;

use crate::core::basket::BasketDocument;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Raw baskets of one full refresh plus the day they were fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cache_date: NaiveDate,
    /// Baskets keyed by API code, e.g. `IDX.UPBIT.UBMI`.
    pub api_cache: BTreeMap<String, BasketDocument>,
}

/// Persistence for the daily snapshot.
///
/// Implementations never fail towards the caller: an unusable snapshot is
/// `None`, and a failed save is only logged.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Option<Snapshot>;
    fn save(&self, snapshot: &Snapshot);
}
