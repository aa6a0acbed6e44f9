pub mod date;
pub mod entry;
pub mod text;

pub use date::{parse_date_field, resolve_date, DateField};
pub use entry::{normalize_entry, normalize_feed, UNKNOWN_SOURCE, UNTITLED};
pub use text::sanitize;
