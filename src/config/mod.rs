use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::domain::ChannelMetadata;
use crate::errors::{AggregatorError, AggregatorResult};

/// Sources aggregated when no override is configured.
pub const DEFAULT_SOURCES: &[&str] = &[
    // IT-Security
    "https://feeds.feedburner.com/TheHackersNews?format=xml",
    "https://krebsonsecurity.com/feed/",
    "https://www.darkreading.com/rss.xml",
    "https://www.welivesecurity.com/en/rss/feed/",
    "https://www.infosecurity-magazine.com/rss/news/",
    "https://www.nist.gov/blogs/cybersecurity-insights/rss.xml",
    "https://www.techrepublic.com/rssfeeds/topic/cybersecurity/",
    "https://www.proofpoint.com/us/rss.xml",
    "https://www.upguard.com/blog/rss.xml",
    "https://blog.pcisecuritystandards.org/rss.xml",
    "https://www.securityweek.com/feed",
    "https://threatpost.com/feed/",
    "https://www.schneier.com/feed/atom/",
    // Privacy
    "https://privacyinternational.org/rss/news",
    "https://edps.europa.eu/press-publications/press-news/rss_en",
    "https://www.enforceprivacy.com/feed/",
    "https://www.dlapiperdataprotection.com/feed/",
    // Cyber policy
    "https://www.enisa.europa.eu/news/feed",
    "https://www.enisa.europa.eu/newsroom/rss",
    "https://www.bsi.bund.de/SharedDocs/RSS/DE/rss.xml",
    "https://www.cisa.gov/news-events/rss.xml",
    "https://www.techpolicy.com/feed/",
];

pub const DEFAULT_OUTPUT_PATH: &str = "feed.xml";
pub const DEFAULT_MAX_ENTRIES: usize = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_USER_AGENT: &str = "RSS-Aggregator/1.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub sources: Vec<String>,
    pub output_path: PathBuf,
    pub max_entries: usize,
    pub request_timeout: Duration,
    pub request_delay: Duration,
    pub user_agent: String,
    pub channel: ChannelMetadata,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_entries: DEFAULT_MAX_ENTRIES,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            channel: ChannelMetadata::default(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> AggregatorResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults plus whatever `lookup` returns for the
    /// `AGGREGATOR_*` keys.
    pub fn from_lookup<F>(lookup: F) -> AggregatorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("AGGREGATOR_SOURCES") {
            let sources: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            config = config.with_sources(sources)?;
        }

        if let Some(output) = lookup("AGGREGATOR_OUTPUT") {
            config.output_path = PathBuf::from(output);
        }

        if let Some(max) = parse_var(&lookup, "AGGREGATOR_MAX_ENTRIES")? {
            config.max_entries = max;
        }

        if let Some(secs) = parse_var(&lookup, "AGGREGATOR_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(ms) = parse_var(&lookup, "AGGREGATOR_DELAY_MS")? {
            config.request_delay = Duration::from_millis(ms);
        }

        if let Some(user_agent) = lookup("AGGREGATOR_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }

    /// Replace the source list. Every entry must be an absolute http(s) URL.
    pub fn with_sources(mut self, sources: Vec<String>) -> AggregatorResult<Self> {
        for source in &sources {
            validate_source(source)?;
        }
        self.sources = sources;
        Ok(self)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> AggregatorResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AggregatorError::Config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(None),
    }
}

fn validate_source(source: &str) -> AggregatorResult<()> {
    let parsed = Url::parse(source).map_err(|e| AggregatorError::InvalidUrl(format!("{}: {}", source, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AggregatorError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            source, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_fixed_run_settings() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.sources.len(), DEFAULT_SOURCES.len());
        assert_eq!(config.output_path, PathBuf::from("feed.xml"));
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.request_delay, Duration::from_millis(500));
        assert_eq!(config.user_agent, "RSS-Aggregator/1.0");
        assert_eq!(config.channel.language, "de");
    }

    #[test]
    fn test_default_sources_are_valid() {
        for source in DEFAULT_SOURCES {
            assert!(validate_source(source).is_ok(), "{} should be valid", source);
        }
    }

    #[test]
    fn test_overrides_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("AGGREGATOR_SOURCES", "https://a.example/feed, https://b.example/rss ,"),
            ("AGGREGATOR_OUTPUT", "/tmp/out.xml"),
            ("AGGREGATOR_MAX_ENTRIES", "25"),
            ("AGGREGATOR_TIMEOUT_SECS", "3"),
            ("AGGREGATOR_DELAY_MS", "0"),
            ("AGGREGATOR_USER_AGENT", "test-agent"),
        ]))
        .unwrap();

        assert_eq!(
            config.sources,
            vec!["https://a.example/feed", "https://b.example/rss"]
        );
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.xml"));
        assert_eq!(config.max_entries, 25);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let result = Config::from_lookup(lookup_from(&[("AGGREGATOR_MAX_ENTRIES", "lots")]));
        assert!(matches!(result, Err(AggregatorError::Config(_))));
    }

    #[test]
    fn test_invalid_source_rejected() {
        let result = Config::default().with_sources(vec!["ftp://example.com/feed".to_string()]);
        assert!(matches!(result, Err(AggregatorError::InvalidUrl(_))));

        let result = Config::default().with_sources(vec!["not a url".to_string()]);
        assert!(matches!(result, Err(AggregatorError::InvalidUrl(_))));
    }
}
