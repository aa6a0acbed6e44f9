pub mod dates;
pub mod http;
pub mod traits;

pub use http::HttpFeedFetcher;
pub use traits::FeedFetcher;
