use crate::domain::NormalizedEntry;

/// Sort entries newest first and keep at most `max_entries`.
///
/// The sort is stable, so entries with equal dates keep their collection
/// order. No deduplication is performed.
pub fn aggregate(mut entries: Vec<NormalizedEntry>, max_entries: usize) -> Vec<NormalizedEntry> {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries.truncate(max_entries);
    entries
}
