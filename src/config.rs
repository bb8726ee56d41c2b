//! Feed registry and criteria loading.
//!
//! The feed registry is a YAML document whose reserved top-level keys hold
//! global settings and whose remaining keys are categories of sources:
//!
//! ```yaml
//! filters:
//!   hours_back: 24
//!   keywords: [AI, regulation]
//!   exclude_keywords: [advertisement]
//!
//! google_news:
//!   enabled: true
//!   topics: ["artificial intelligence"]
//!
//! report:
//!   utc_offset_hours: 3
//!
//! tech_news:
//!   TechDaily:
//!     url: https://techdaily.example/rss
//!     tags: [tech]
//! ```
//!
//! Categories and sources keep their document order, which fixes the
//! collection order and therefore the deduplication tie-break.

use crate::error::ConfigError;
use crate::models::FeedSource;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_HOURS_BACK: u32 = 24;
pub const DEFAULT_MAX_PER_TOPIC: usize = 20;
pub const DEFAULT_TOPIC_URL_TEMPLATE: &str =
    "https://news.google.com/rss/search?q={query}&hl=ru&gl=RU&ceid=RU:ru";

/// Global filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub hours_back: u32,
    pub keywords: Vec<String>,
    pub exclude_keywords: Vec<String>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            hours_back: DEFAULT_HOURS_BACK,
            keywords: Vec::new(),
            exclude_keywords: Vec::new(),
        }
    }
}

/// Secondary collection against a topic-search feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TopicSearch {
    pub enabled: bool,
    pub topics: Vec<String>,
    pub max_per_topic: usize,
    /// Search feed URL with a `{query}` placeholder for the encoded topic.
    pub url_template: String,
}

impl Default for TopicSearch {
    fn default() -> Self {
        Self {
            enabled: false,
            topics: Vec::new(),
            max_per_topic: DEFAULT_MAX_PER_TOPIC,
            url_template: DEFAULT_TOPIC_URL_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Offset of the clock used for report timestamps and file names.
    pub utc_offset_hours: i32,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    url: String,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    category: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawFeedsConfig {
    #[serde(default)]
    filters: Filters,
    #[serde(default)]
    google_news: TopicSearch,
    #[serde(default)]
    report: ReportSettings,
    #[serde(flatten)]
    categories: Mapping,
}

/// The validated feed registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedsConfig {
    pub filters: Filters,
    pub topic_search: TopicSearch,
    pub report: ReportSettings,
    /// Every configured source, disabled ones included, in document order.
    pub sources: Vec<FeedSource>,
}

impl FeedsConfig {
    /// Parse and validate a registry document.
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawFeedsConfig = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sources = Vec::new();
        for (section, entries) in raw.categories {
            let section = match section {
                Value::String(s) => s,
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "category key must be a string, got {other:?}"
                    )));
                }
            };
            let entries = match entries {
                Value::Mapping(m) => m,
                Value::Null => continue,
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "category '{section}' must map source names to feeds"
                    )));
                }
            };
            for (name, entry) in entries {
                let name = match name {
                    Value::String(s) => s,
                    other => {
                        return Err(ConfigError::Invalid(format!(
                            "source name in '{section}' must be a string, got {other:?}"
                        )));
                    }
                };
                let entry: SourceEntry = serde_yaml::from_value(entry).map_err(|source| {
                    ConfigError::Invalid(format!("source '{name}' in '{section}': {source}"))
                })?;
                sources.push(FeedSource {
                    name,
                    url: entry.url,
                    tags: entry.tags,
                    category: entry.category.unwrap_or_else(|| section.clone()),
                    enabled: entry.enabled,
                });
            }
        }

        let config = Self {
            filters: raw.filters,
            topic_search: raw.google_news,
            report: raw.report,
            sources,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.filters.hours_back == 0 {
            return Err(ConfigError::Invalid("filters.hours_back must be positive".into()));
        }
        if !(-23..=23).contains(&self.report.utc_offset_hours) {
            return Err(ConfigError::Invalid(format!(
                "report.utc_offset_hours out of range: {}",
                self.report.utc_offset_hours
            )));
        }
        if self.topic_search.enabled && !self.topic_search.url_template.contains("{query}") {
            return Err(ConfigError::Invalid(
                "google_news.url_template must contain {query}".into(),
            ));
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if !names.insert(source.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate source name '{}'",
                    source.name
                )));
            }
            let parsed = Url::parse(&source.url).map_err(|e| {
                ConfigError::Invalid(format!("source '{}' has invalid url: {e}", source.name))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "source '{}' url must be http(s)",
                    source.name
                )));
            }
        }
        Ok(())
    }

    /// Sources with `enabled: true`, in document order.
    pub fn enabled_sources(&self) -> Vec<FeedSource> {
        self.sources.iter().filter(|s| s.enabled).cloned().collect()
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the feed registry from disk.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_feeds(path: &Path) -> Result<FeedsConfig, ConfigError> {
    let text = read_config(path)?;
    let config = FeedsConfig::from_yaml(&text, path)?;
    info!(
        sources = config.sources.len(),
        enabled = config.enabled_sources().len(),
        keywords = config.filters.keywords.len(),
        "Loaded feed registry"
    );
    Ok(config)
}

/// Load the analysis criteria document.
///
/// The pipeline does not interpret it; it only has to exist and be valid YAML
/// so the downstream analysis step can rely on it.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_criteria(path: &Path) -> Result<Value, ConfigError> {
    let text = read_config(path)?;
    let criteria: Value = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded criteria document");
    Ok(criteria)
}
