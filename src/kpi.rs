//! The KPI aggregation engine.
//!
//! [`KpiEngine::compute`] folds a flat collection of [`SaleRecord`]s into one
//! [`KpiSnapshot`]: scalar totals, keyed groupings, a ranked category table,
//! half-year and monthly buckets, fulfillment-time statistics, and the derived
//! ratio metrics. The computation is deterministic, side-effect free, and
//! reentrant; it never fails, only degrades malformed input to defined
//! fallbacks (missing numerics are zero, unparseable dates bucket under the
//! epoch, empty grouping keys skip that grouping only).

use crate::dates;
use crate::stats;
use crate::types::{KpiSnapshot, SaleRecord, TrendPoint};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Milliseconds per day, for fractional-day fulfillment times.
const MS_PER_DAY: f64 = 86_400_000.0;

/// Stateless aggregator turning record collections into KPI snapshots.
///
/// Carries no state between calls; concurrent calls with different
/// collections cannot interfere.
#[derive(Debug, Clone, Copy, Default)]
pub struct KpiEngine;

impl KpiEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute a full KPI snapshot from a record collection.
    pub fn compute(&self, records: &[SaleRecord]) -> KpiSnapshot {
        let total_sales: f64 = records.iter().map(SaleRecord::sales_or_zero).sum();
        let total_profit: f64 = records.iter().map(SaleRecord::profit_or_zero).sum();
        let record_count = records.len();
        // Floor at one so the per-record ratios survive an empty collection.
        let per_record_divisor = record_count.max(1) as f64;

        KpiSnapshot {
            total_sales,
            total_profit,
            profit_margin: profit_margin(total_sales, total_profit),
            sales_by_region: sum_by_key(records, |r| &r.region, SaleRecord::sales_or_zero),
            top_categories: ranked_categories(records),
            profit_distribution: sum_by_key(records, |r| &r.country, SaleRecord::profit_or_zero),
            sales_trend: sales_trend(records),
            monthly_revenue: monthly_revenue(records),
            customer_acquisition_cost: total_sales / per_record_divisor,
            customer_lifetime_value: total_profit / per_record_divisor,
            average_fulfillment_time: average_fulfillment_time(records),
            // No zero-sales guard here, unlike profit_margin; see KpiSnapshot.
            return_on_investment: (total_profit / total_sales) * 100.0,
            record_count,
        }
    }
}

/// 100 × profit / sales, zero whenever sales is not positive.
fn profit_margin(total_sales: f64, total_profit: f64) -> f64 {
    if total_sales > 0.0 {
        (total_profit / total_sales) * 100.0
    } else {
        0.0
    }
}

/// Group-and-sum `value` under `key`, skipping records whose key is empty.
fn sum_by_key<K, V>(records: &[SaleRecord], key: K, value: V) -> HashMap<String, f64>
where
    K: Fn(&SaleRecord) -> &str,
    V: Fn(&SaleRecord) -> f64,
{
    let mut sums = HashMap::new();
    for record in records {
        let key = key(record);
        if key.is_empty() {
            continue;
        }
        *sums.entry(key.to_string()).or_insert(0.0) += value(record);
    }
    sums
}

/// Per-category sales sums, ordered descending by value.
///
/// The sort is stable over first-seen category order, so equal sums keep
/// their input encounter order.
fn ranked_categories(records: &[SaleRecord]) -> IndexMap<String, f64> {
    let mut sums: IndexMap<String, f64> = IndexMap::new();
    for record in records {
        if record.category.is_empty() {
            continue;
        }
        *sums.entry(record.category.clone()).or_insert(0.0) += record.sales_or_zero();
    }
    sums.sort_by(|_, a, _, b| b.total_cmp(a));
    sums
}

/// Half-year sales buckets in first-occurrence order.
///
/// Buckets are keyed by the half-year start date (January 1 or July 1);
/// unparseable order dates land in the epoch half-year. The result is
/// intentionally left in encounter order rather than sorted by date.
fn sales_trend(records: &[SaleRecord]) -> Vec<TrendPoint> {
    let mut trend: Vec<TrendPoint> = Vec::new();
    for record in records {
        let period_start = dates::half_year_start(dates::parse_or_epoch(&record.order_date));
        match trend.iter_mut().find(|p| p.period_start == period_start) {
            Some(point) => point.sales += record.sales_or_zero(),
            None => trend.push(TrendPoint {
                period_start,
                sales: record.sales_or_zero(),
            }),
        }
    }
    trend
}

/// "Month YYYY" label → category → summed sales.
///
/// The month bucket is created even when the record has no category, so a
/// month whose records all lack categories still appears (empty) in the
/// output, matching the chart's month axis.
fn monthly_revenue(records: &[SaleRecord]) -> IndexMap<String, IndexMap<String, f64>> {
    let mut months: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();
    for record in records {
        let label = dates::month_label(dates::parse_or_epoch(&record.order_date));
        let month = months.entry(label).or_default();
        if record.category.is_empty() {
            continue;
        }
        *month.entry(record.category.clone()).or_insert(0.0) += record.sales_or_zero();
    }
    months
}

/// Central ship-minus-order elapsed time in fractional days.
///
/// Only records where both dates parse participate; with none, the answer is
/// `None` ("no data" stays distinguishable from "zero elapsed time"). The
/// median → mean → `None` chain is applied by [`stats::positive_median_or_mean`].
fn average_fulfillment_time(records: &[SaleRecord]) -> Option<f64> {
    let elapsed_days: Vec<f64> = records
        .iter()
        .filter_map(|record| {
            let ordered = dates::parse_datetime(&record.order_date)?;
            let shipped = dates::parse_datetime(&record.ship_date)?;
            Some((shipped - ordered).num_milliseconds() as f64 / MS_PER_DAY)
        })
        .collect();
    if elapsed_days.is_empty() {
        return None;
    }
    stats::positive_median_or_mean(&elapsed_days)
}
