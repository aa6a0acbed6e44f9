pub mod aggregate;
pub mod fetch_service;
pub mod source_list;

pub use aggregate::aggregate;
pub use fetch_service::{FetchResult, FetchService};
