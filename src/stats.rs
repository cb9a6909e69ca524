//! Small-sample statistics used by the KPI engine.

use std::cmp::Ordering;

/// Mean of `values`, or zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sort-and-midpoint median of `values`, or zero for an empty slice.
///
/// Even-length inputs average the two central values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}

/// Median if strictly positive, else mean if strictly positive, else `None`.
///
/// The strict-positivity gates are deliberate: a sample whose central values
/// are zero or negative reports "no data" rather than the computed figure.
/// Any change here needs a product-owner decision.
pub fn positive_median_or_mean(values: &[f64]) -> Option<f64> {
    let median = median(values);
    if median > 0.0 {
        return Some(median);
    }
    let mean = mean(values);
    if mean > 0.0 { Some(mean) } else { None }
}
