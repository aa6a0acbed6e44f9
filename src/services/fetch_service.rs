use std::thread;
use std::time::Duration;

use crate::domain::{NormalizedEntry, RawFeed};
use crate::normalize::normalize_feed;
use crate::sources::FeedFetcher;

/// Entries gathered from one pass over the source list.
#[derive(Debug, Default)]
pub struct FetchResult {
    pub entries: Vec<NormalizedEntry>,
    pub fetched: Vec<String>,
    pub failed: Vec<(String, String)>, // (url, error_message)
}

pub struct FetchService<F: FeedFetcher> {
    fetcher: F,
    request_delay: Duration,
}

impl<F: FeedFetcher> FetchService<F> {
    pub fn new(fetcher: F, request_delay: Duration) -> Self {
        Self {
            fetcher,
            request_delay,
        }
    }

    /// Fetch a single source. Failures are reported here and handed back as
    /// a message so the caller can move on to the next source.
    pub fn fetch_source(&self, url: &str) -> Result<RawFeed, String> {
        println!("Fetching: {}", url);

        self.fetcher.fetch(url).map_err(|e| {
            eprintln!("Error fetching {}: {}", url, e);
            tracing::warn!(url, error = %e, "Skipping source");
            e.to_string()
        })
    }

    /// Fetch and normalize every source in order, pausing after each attempt.
    pub fn collect(&self, sources: &[String]) -> FetchResult {
        let mut result = FetchResult::default();

        for url in sources {
            match self.fetch_source(url) {
                Ok(feed) => {
                    let entries = normalize_feed(url, &feed);
                    tracing::debug!(url = %url, count = entries.len(), "Normalized entries");
                    result.entries.extend(entries);
                    result.fetched.push(url.clone());
                }
                Err(message) => {
                    result.failed.push((url.clone(), message));
                }
            }

            if !self.request_delay.is_zero() {
                thread::sleep(self.request_delay);
            }
        }

        result
    }
}
