use crate::domain::RawFeed;
use crate::errors::AggregatorResult;

/// Retrieves and parses one upstream feed.
#[cfg_attr(test, mockall::automock)]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the feed at `url`. Any transport or parse failure is an `Err`;
    /// a well-formed feed with zero entries is not.
    fn fetch(&self, url: &str) -> AggregatorResult<RawFeed>;
}
