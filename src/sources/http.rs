use std::time::Duration;

use feed_rs::parser;
use reqwest::blocking::Client;

use crate::config::Config;
use crate::domain::{RawEntry, RawFeed};
use crate::errors::{AggregatorError, AggregatorResult};
use crate::sources::dates::{extract_entry_dates, RawDates};
use crate::sources::traits::FeedFetcher;

pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> AggregatorResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> AggregatorResult<Self> {
        Self::new(config.request_timeout, &config.user_agent)
    }

    fn parse_bytes(bytes: &[u8]) -> AggregatorResult<RawFeed> {
        let parsed = parser::parse(bytes).map_err(|e| AggregatorError::FeedParse(e.to_string()))?;

        // feed-rs normalizes dates to UTC and drops the ones it cannot read,
        // so the published text is taken from the document itself.
        let mut dates = extract_entry_dates(bytes);
        if dates.len() != parsed.entries.len() {
            tracing::debug!(
                raw = dates.len(),
                parsed = parsed.entries.len(),
                "Raw dates do not line up with entries, using parsed dates"
            );
            dates = vec![RawDates::default(); parsed.entries.len()];
        }

        Ok(Self::raw_feed(parsed, dates))
    }

    fn raw_feed(feed: feed_rs::model::Feed, dates: Vec<RawDates>) -> RawFeed {
        let title = feed.title.map(|t| t.content);
        let entries = feed
            .entries
            .into_iter()
            .zip(dates)
            .map(|(entry, dates)| Self::raw_entry(entry, dates))
            .collect();

        RawFeed::new(title).with_entries(entries)
    }

    fn raw_entry(entry: feed_rs::model::Entry, dates: RawDates) -> RawEntry {
        // Prefer the alternate link, as feed readers do
        let link = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
            .or_else(|| entry.links.first())
            .map(|l| l.href.clone());

        RawEntry::new(entry.title.map(|t| t.content))
            .with_link(link)
            .with_summary(entry.summary.map(|t| t.content))
            .with_description(entry.content.and_then(|c| c.body))
            .with_author(entry.authors.into_iter().next().map(|p| p.name))
            .with_published(dates.published.or_else(|| entry.published.map(|dt| dt.to_rfc3339())))
            .with_updated(dates.updated.or_else(|| entry.updated.map(|dt| dt.to_rfc3339())))
            .with_created(dates.created)
            .with_categories(entry.categories.into_iter().map(|c| c.term).collect())
    }
}

impl FeedFetcher for HttpFeedFetcher {
    fn fetch(&self, url: &str) -> AggregatorResult<RawFeed> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes()?;
        Self::parse_bytes(&bytes)
    }
}
