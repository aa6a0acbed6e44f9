use crate::domain::{NormalizedEntry, RawEntry, RawFeed};
use crate::normalize::{resolve_date, sanitize};

/// Title used for entries that do not declare one.
pub const UNTITLED: &str = "Kein Titel";

/// Source name used for feeds that do not declare a title.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Map one raw entry into its canonical form.
///
/// `source_name` is expected to be sanitized already.
pub fn normalize_entry(raw: &RawEntry, source: &str, source_name: &str) -> NormalizedEntry {
    let title = sanitize(Some(raw.title.as_deref().unwrap_or(UNTITLED)));
    let description = sanitize(raw.summary.as_deref().or(raw.description.as_deref()));

    NormalizedEntry {
        title,
        link: raw.link.clone().unwrap_or_default(),
        description,
        date: resolve_date(raw),
        author: sanitize(raw.author.as_deref()),
        source: source.to_string(),
        source_name: source_name.to_string(),
        categories: raw
            .categories
            .iter()
            .map(|term| sanitize(Some(term.as_str())))
            .collect(),
    }
}

/// Normalize every entry of a fetched feed, preserving document order.
pub fn normalize_feed(source: &str, feed: &RawFeed) -> Vec<NormalizedEntry> {
    let source_name = sanitize(Some(feed.title.as_deref().unwrap_or(UNKNOWN_SOURCE)));

    feed.entries
        .iter()
        .map(|entry| normalize_entry(entry, source, &source_name))
        .collect()
}
