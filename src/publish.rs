//! Atomically replaced storage for the most recent KPI snapshot.

use crate::types::KpiSnapshot;
use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Shared cell holding the latest published [`KpiSnapshot`].
///
/// Readers load the current snapshot without locking; producers replace it
/// wholesale. Each computation reserves a generation up front, and a result
/// is only published if nothing newer has been published meanwhile, so a slow
/// producer never overwrites a fresher snapshot (last snapshot wins).
#[derive(Debug, Default)]
pub struct SnapshotStore {
    latest: ArcSwapOption<KpiSnapshot>,
    reserved: AtomicU64,
    published: Mutex<u64>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next publication generation. Call before starting a
    /// computation whose result will be offered to [`publish`](Self::publish).
    pub fn begin(&self) -> u64 {
        self.reserved.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Offer a snapshot for a previously reserved generation.
    ///
    /// Returns `false` (dropping the snapshot) when a newer generation has
    /// already been published.
    pub fn publish(&self, generation: u64, snapshot: KpiSnapshot) -> bool {
        let mut published = match self.published.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if generation <= *published {
            return false;
        }
        *published = generation;
        self.latest.store(Some(Arc::new(snapshot)));
        true
    }

    /// The most recently published snapshot, if any.
    pub fn latest(&self) -> Option<Arc<KpiSnapshot>> {
        self.latest.load_full()
    }
}
