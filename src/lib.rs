//! # Saleskpi
//!
//! Sales KPI aggregation engine: a pure, stateless transformation from a flat
//! collection of sale records into the derived metrics a dashboard renders.
//!
//! ## Quick Start
//!
//! ```rust
//! use saleskpi::{KpiEngine, SaleRecord};
//!
//! let records = vec![
//!     SaleRecord {
//!         region: "West".to_string(),
//!         category: "Furniture".to_string(),
//!         order_date: "2023-01-15".to_string(),
//!         ship_date: "2023-01-20".to_string(),
//!         sales: Some(261.96),
//!         profit: Some(41.91),
//!         ..Default::default()
//!     },
//! ];
//!
//! let snapshot = KpiEngine::new().compute(&records);
//! assert_eq!(snapshot.total_sales, 261.96);
//! assert_eq!(snapshot.sales_by_region["West"], 261.96);
//! assert_eq!(snapshot.average_fulfillment_time, Some(5.0));
//! ```
//!
//! ## Guarantees
//!
//! 1. **Never fails**: malformed dates fall back to the epoch bucket, missing
//!    numerics count as zero, empty grouping keys skip that grouping only
//! 2. **Deterministic**: totals are order-independent; ranked and bucketed
//!    outputs have defined ordering semantics
//! 3. **Reentrant**: no state is shared between `compute` calls; the only
//!    shared resource is the atomically replaced [`SnapshotStore`] reference
//!
//! ## Layers
//!
//! - [`kpi`] — the aggregation engine itself
//! - [`ingest`] — loading record collections from CSV/JSON exports
//! - [`publish`] / [`refresh`] — last-snapshot-wins publication on a poll timer

pub mod dates;
pub mod error;
pub mod ingest;
pub mod kpi;
pub mod publish;
pub mod refresh;
pub mod stats;
pub mod types;

// Re-export commonly used types for convenience
pub use error::IngestError;
pub use ingest::FileSource;
pub use kpi::KpiEngine;
pub use publish::SnapshotStore;
pub use refresh::{RecordSource, Refresher};
pub use types::{KpiSnapshot, SaleRecord, TrendPoint};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!NAME.is_empty());
        assert!(!DESCRIPTION.is_empty());
    }

    #[test]
    fn test_types_export() {
        let snapshot = KpiEngine::new().compute(&[]);
        assert_eq!(snapshot.record_count, 0);
        assert!(SnapshotStore::new().latest().is_none());
    }
}
