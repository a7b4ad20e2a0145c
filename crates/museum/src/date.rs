//! Date parsing and display labels shared by the timeline and the entry log.

use chrono::{DateTime, NaiveDate, Utc};

/// Label used for entries whose date is missing or cannot be parsed.
pub const UNDATED: &str = "Undated";

/// Parse a date as it appears in journey data.
///
/// Plain calendar dates (`2025-09-21`) resolve to midnight UTC. Full RFC 3339
/// timestamps are accepted as well. Anything else yields `None`.
pub fn parse(source: &str) -> Option<DateTime<Utc>> {
    let source = source.trim();
    if source.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(source, "%Y-%m-%d") {
        return Some(midnight(date));
    }

    DateTime::parse_from_rfc3339(source)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// The start of the given calendar day in UTC.
pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Format a date the way the timeline displays it, e.g. `Sep 21, 2025`.
pub fn label(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format an optional raw date string, falling back to [`UNDATED`].
pub fn label_or_undated(source: Option<&str>) -> String {
    source
        .and_then(parse)
        .map(|date| label(&date))
        .unwrap_or_else(|| String::from(UNDATED))
}
