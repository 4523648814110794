use super::{Snapshot, SnapshotStore};
use std::sync::Mutex;
use tracing::debug;

/// In-process snapshot store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Mutex::new(Some(snapshot)),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        let snapshot = self.inner.lock().ok()?.clone();
        if snapshot.is_some() {
            debug!("Snapshot HIT");
        } else {
            debug!("Snapshot MISS");
        }
        snapshot
    }

    fn save(&self, snapshot: &Snapshot) {
        if let Ok(mut inner) = self.inner.lock() {
            debug!("Snapshot PUT");
            *inner = Some(snapshot.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[test]
    fn test_memory_store_load_save() {
        let store = MemoryStore::new();

        // Initially, store is empty
        assert!(store.load().is_none());

        let snapshot = Snapshot {
            cache_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            api_cache: BTreeMap::new(),
        };
        store.save(&snapshot);
        assert_eq!(store.load(), Some(snapshot));
    }
}
