pub mod file;
pub mod rss_writer;

pub use file::write_atomic;
pub use rss_writer::{format_rss_date, render};
