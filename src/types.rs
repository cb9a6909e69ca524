//! Core value types: raw sale records in, derived KPI snapshots out.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One sales transaction line as stored in the source document database.
///
/// Upstream documents are hand-imported and routinely miss values, so every
/// field is defaulted: absent numerics count as zero in sums, absent strings
/// are empty (and empty grouping keys exclude the record from that grouping),
/// and dates are free-form strings parsed leniently with an epoch fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleRecord {
    #[serde(rename = "Order_ID")]
    pub order_id: String,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Ship_Date")]
    pub ship_date: String,
    #[serde(rename = "Fulfillment_Date")]
    pub fulfillment_date: String,
    #[serde(rename = "Ship_Mode")]
    pub ship_mode: String,
    #[serde(rename = "Customer_ID")]
    pub customer_id: String,
    #[serde(rename = "Customer_Name")]
    pub customer_name: String,
    #[serde(rename = "Segment")]
    pub segment: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub_Category")]
    pub sub_category: String,
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Sales")]
    pub sales: Option<f64>,
    #[serde(rename = "Quantity")]
    pub quantity: Option<i64>,
    #[serde(rename = "Discount")]
    pub discount: Option<f64>,
    #[serde(rename = "Profit")]
    pub profit: Option<f64>,
}

impl SaleRecord {
    /// Sales amount, with a missing value counting as zero.
    pub fn sales_or_zero(&self) -> f64 {
        self.sales.unwrap_or(0.0)
    }

    /// Profit amount, with a missing value counting as zero.
    pub fn profit_or_zero(&self) -> f64 {
        self.profit.unwrap_or(0.0)
    }
}

/// One accumulated half-year period of the sales trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// First day of the half-year (January 1 or July 1).
    pub period_start: NaiveDate,
    /// Sales summed over every record bucketed into this period.
    pub sales: f64,
}

/// The complete, immutable result of one aggregation pass.
///
/// Recomputed from scratch on every [`compute`](crate::kpi::KpiEngine::compute)
/// call; plain numbers, strings, and mappings throughout, so it serializes
/// directly into the shape a charting front end consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    /// Sum of all sales amounts, missing values counting as zero.
    pub total_sales: f64,
    /// Sum of all profit amounts, missing values counting as zero.
    pub total_profit: f64,
    /// 100 × profit / sales; zero whenever total sales is not positive.
    pub profit_margin: f64,
    /// Sales summed per region. Records with an empty region are skipped.
    pub sales_by_region: HashMap<String, f64>,
    /// Sales summed per category, ordered descending by value. Ties keep the
    /// order in which the categories were first seen in the input.
    pub top_categories: IndexMap<String, f64>,
    /// Profit summed per country. Records with an empty country are skipped.
    pub profit_distribution: HashMap<String, f64>,
    /// Half-year sales buckets in first-occurrence order (not date-sorted).
    pub sales_trend: Vec<TrendPoint>,
    /// "Month YYYY" label → category → summed sales. Unparseable order dates
    /// land under the epoch-derived label ("January 1970").
    pub monthly_revenue: IndexMap<String, IndexMap<String, f64>>,
    /// Total sales divided by the record count (floored at one).
    pub customer_acquisition_cost: f64,
    /// Total profit divided by the record count (floored at one).
    pub customer_lifetime_value: f64,
    /// Ship-minus-order elapsed time in fractional days, over records where
    /// both dates parse: the median if strictly positive, else the mean if
    /// strictly positive, else `None`. `None` also when no record qualifies.
    pub average_fulfillment_time: Option<f64>,
    /// 100 × profit / sales. Unlike [`profit_margin`](Self::profit_margin)
    /// this ratio is not guarded: zero total sales produces a non-finite
    /// value (NaN when profit is also zero, ±infinity otherwise).
    pub return_on_investment: f64,
    /// Number of input records the snapshot was computed from.
    pub record_count: usize,
}
