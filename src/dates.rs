//! Lenient calendar handling for free-form document date strings.
//!
//! Source documents carry dates as strings in whatever format the importer
//! produced. Parsing never fails aggregation: an unparseable date is reported
//! as `None` here, and callers that must bucket every record substitute the
//! Unix epoch via [`parse_or_epoch`].

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Date-only formats accepted in addition to ISO datetimes.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Datetime formats tried before the date-only fallbacks.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// The sentinel substituted for unparseable dates: 1970-01-01T00:00:00.
pub fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Parse a free-form date string, preserving sub-day precision when present.
///
/// Tries RFC 3339, then bare datetimes, then date-only forms (ISO and US)
/// promoted to midnight. Empty or unrecognized input yields `None`.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Parse a date string, substituting the epoch sentinel on failure.
pub fn parse_or_epoch(raw: &str) -> NaiveDateTime {
    parse_datetime(raw).unwrap_or_else(epoch)
}

/// Start of the half-year containing `moment`: January 1 for Jan–Jun,
/// July 1 for Jul–Dec.
pub fn half_year_start(moment: NaiveDateTime) -> NaiveDate {
    let month = if moment.month0() < 6 { 1 } else { 7 };
    // Only an out-of-range year can fail here; the default is the epoch date.
    NaiveDate::from_ymd_opt(moment.year(), month, 1).unwrap_or_default()
}

/// "Month YYYY" label (English long month name) for monthly grouping.
pub fn month_label(moment: NaiveDateTime) -> String {
    moment.format("%B %Y").to_string()
}
