//! Periodic refresh: fetch records, aggregate, publish.
//!
//! The engine has no timer awareness of its own; this module is the external
//! scheduler that drives it. Each tick fetches a full record collection from
//! a [`RecordSource`], computes a snapshot, and offers it to the shared
//! [`SnapshotStore`]. A failed fetch leaves the previously published snapshot
//! in place.

use crate::error::Result;
use crate::kpi::KpiEngine;
use crate::publish::SnapshotStore;
use crate::types::SaleRecord;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Supplies a complete record collection on each poll.
pub trait RecordSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<SaleRecord>>;
}

/// Drives [`KpiEngine::compute`] on a fixed interval.
pub struct Refresher<S> {
    source: S,
    engine: KpiEngine,
    store: Arc<SnapshotStore>,
    interval: Duration,
}

impl<S: RecordSource> Refresher<S> {
    pub fn new(source: S, store: Arc<SnapshotStore>, interval: Duration) -> Self {
        Self {
            source,
            engine: KpiEngine::new(),
            store,
            interval,
        }
    }

    /// Fetch, aggregate, and publish once.
    ///
    /// Returns whether the result was published; `false` means a newer
    /// refresh completed while this one was in flight and its snapshot won.
    pub fn refresh_once(&self) -> Result<bool> {
        let generation = self.store.begin();
        let records = self.source.fetch()?;
        let snapshot = self.engine.compute(&records);
        let published = self.store.publish(generation, snapshot);
        if published {
            debug!(generation, record_count = records.len(), "published snapshot");
        } else {
            debug!(generation, "discarded stale snapshot");
        }
        Ok(published)
    }

    /// Refresh immediately, then on every interval tick, forever.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            if let Err(error) = self.refresh_once() {
                warn!(%error, "refresh failed; keeping previous snapshot");
            }
        }
    }
}
