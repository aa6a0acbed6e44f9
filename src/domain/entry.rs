use chrono::{DateTime, FixedOffset};

/// A fetched upstream feed before any normalization.
#[derive(Debug, Clone, Default)]
pub struct RawFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

impl RawFeed {
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            entries: Vec::new(),
        }
    }

    pub fn with_entries(mut self, entries: Vec<RawEntry>) -> Self {
        self.entries = entries;
        self
    }
}

/// One upstream entry. Date fields hold the raw text as published so the
/// date resolver can tell missing values apart from malformed ones.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub created: Option<String>,
    pub categories: Vec<String>,
}

impl RawEntry {
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_published(mut self, published: Option<String>) -> Self {
        self.published = published;
        self
    }

    pub fn with_updated(mut self, updated: Option<String>) -> Self {
        self.updated = updated;
        self
    }

    pub fn with_created(mut self, created: Option<String>) -> Self {
        self.created = created;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }
}

/// Canonical entry record. Text fields are already XML-escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub date: DateTime<FixedOffset>,
    pub author: String,
    pub source: String,
    pub source_name: String,
    pub categories: Vec<String>,
}
