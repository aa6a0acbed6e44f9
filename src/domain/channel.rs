use chrono::{DateTime, Utc};

use crate::domain::NormalizedEntry;

/// Fixed channel-level metadata of the aggregated feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMetadata {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    pub generator: String,
    pub self_link: String,
}

impl Default for ChannelMetadata {
    fn default() -> Self {
        Self {
            title: "IT-Security & Privacy News Aggregator".to_string(),
            link: "https://github.com/unChained-int/security-test".to_string(),
            description: "Aggregierter RSS-Feed aus führenden IT-Security, Privacy und Cyber Policy Quellen".to_string(),
            language: "de".to_string(),
            generator: "RSS-Aggregator Script".to_string(),
            self_link: "https://raw.githubusercontent.com/unChained-int/security-test/main/feed.xml"
                .to_string(),
        }
    }
}

/// The RSS channel produced by one run.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub channel: ChannelMetadata,
    pub built_at: DateTime<Utc>,
    pub items: Vec<NormalizedEntry>,
}

impl FeedDocument {
    pub fn new(channel: ChannelMetadata, items: Vec<NormalizedEntry>) -> Self {
        Self {
            channel,
            built_at: Utc::now(),
            items,
        }
    }

    pub fn with_built_at(mut self, built_at: DateTime<Utc>) -> Self {
        self.built_at = built_at;
        self
    }
}
