use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::domain::RawEntry;

/// Layouts that carry their own UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%a, %d %b %Y %H:%M %z",
    "%d %b %Y %H:%M:%S %z",
    "%A, %d-%b-%y %H:%M:%S %z",
];

/// Layouts without zone information. Values are taken as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%B %d, %Y", "%b %d, %Y"];

/// Outcome of reading one candidate date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateField {
    Absent,
    Malformed(String),
    Parsed(DateTime<FixedOffset>),
}

/// Parse a raw date value with the flexible parser.
pub fn parse_date_field(raw: Option<&str>) -> DateField {
    let Some(raw) = raw else {
        return DateField::Absent;
    };

    match parse_flexible(raw) {
        Some(date) => DateField::Parsed(date),
        None => DateField::Malformed(raw.to_string()),
    }
}

/// Resolve the publication date of an entry.
///
/// Tries `published`, `updated` and `created` in that order and returns the
/// first value that parses. Values without zone information are taken as
/// UTC. When nothing usable is present the current time is returned, so such
/// entries sort as the most recent.
pub fn resolve_date(entry: &RawEntry) -> DateTime<FixedOffset> {
    let candidates = [
        ("published", entry.published.as_deref()),
        ("updated", entry.updated.as_deref()),
        ("created", entry.created.as_deref()),
    ];

    for (field, raw) in candidates {
        match parse_date_field(raw) {
            DateField::Parsed(date) => return date,
            DateField::Malformed(value) => {
                tracing::debug!(field, value = %value, "Ignoring unparseable date");
            }
            DateField::Absent => {}
        }
    }

    Utc::now().fixed_offset()
}

fn parse_flexible(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date);
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date);
    }

    for format in OFFSET_FORMATS {
        if let Ok(date) = DateTime::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(day) = NaiveDate::parse_from_str(raw, format) {
            return day
                .and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().fixed_offset());
        }
    }

    None
}
