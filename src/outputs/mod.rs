//! Report generation.
//!
//! # Submodules
//!
//! - [`summary`]: rankings and top-N lists derived from grouped articles
//! - [`json`]: raw data and summary JSON documents
//! - [`digest`]: the human-readable text digest
//! - [`sink`]: where the finished artifacts are written
//!
//! # Output Structure
//!
//! ```text
//! reports/
//! ├── raw_articles_2025-05-06_15-00.json
//! ├── raw_digest_2025-05-06_15-00.txt
//! ├── summary_2025-05-06_15-00.json
//! ├── latest.txt                  # copy of the newest digest
//! ├── raw_articles_latest.json    # copy of the newest raw data
//! └── summary_latest.json         # copy of the newest summary
//! ```

pub mod digest;
pub mod json;
pub mod sink;
pub mod summary;

use crate::error::SinkError;
use crate::models::{Article, ArticleGroups};
use chrono::{DateTime, FixedOffset};
use json::{RawDataDocument, SummaryDocument};
use serde::Serialize;
use sink::ReportSink;
use tracing::{info, instrument};

/// Timestamp layout used in documents and file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

pub const LATEST_DIGEST: &str = "latest.txt";
pub const LATEST_RAW: &str = "raw_articles_latest.json";
pub const LATEST_SUMMARY: &str = "summary_latest.json";

/// Every artifact of one run, rendered and ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBundle {
    pub timestamp: String,
    pub raw_json: String,
    pub summary_json: String,
    pub digest: String,
}

fn to_json<T: Serialize>(name: &str, value: &T) -> Result<String, SinkError> {
    serde_json::to_string_pretty(value).map_err(|source| SinkError::Serialize {
        name: name.to_string(),
        source,
    })
}

impl ReportBundle {
    /// Render all artifacts for `articles` as of `generated_at`.
    pub fn build(
        articles: &[Article],
        groups: &ArticleGroups,
        generated_at: DateTime<FixedOffset>,
    ) -> Result<Self, SinkError> {
        let timestamp = generated_at.format(FILE_TIMESTAMP_FORMAT).to_string();
        let raw_json = to_json(
            "raw articles",
            &RawDataDocument::new(&timestamp, articles, groups),
        )?;
        let summary_json = to_json(
            "summary",
            &SummaryDocument::new(&timestamp, articles, groups),
        )?;
        let digest = digest::render(articles, groups, generated_at);
        Ok(Self {
            timestamp,
            raw_json,
            summary_json,
            digest,
        })
    }

    pub fn raw_name(&self) -> String {
        format!("raw_articles_{}.json", self.timestamp)
    }

    pub fn digest_name(&self) -> String {
        format!("raw_digest_{}.txt", self.timestamp)
    }

    pub fn summary_name(&self) -> String {
        format!("summary_{}.json", self.timestamp)
    }

    /// Write the timestamped artifacts, then refresh the fixed-name copies.
    ///
    /// Returns the names written, in order.
    #[instrument(level = "info", skip_all, fields(timestamp = %self.timestamp))]
    pub async fn publish<S: ReportSink>(&self, sink: &S) -> Result<Vec<String>, SinkError> {
        let artifacts = [
            (self.raw_name(), &self.raw_json),
            (self.digest_name(), &self.digest),
            (LATEST_DIGEST.to_string(), &self.digest),
            (self.summary_name(), &self.summary_json),
            (LATEST_SUMMARY.to_string(), &self.summary_json),
            (LATEST_RAW.to_string(), &self.raw_json),
        ];

        let mut written = Vec::with_capacity(artifacts.len());
        for (name, content) in artifacts {
            sink.write(&name, content).await?;
            info!(file = %name, "Saved report");
            written.push(name);
        }
        Ok(written)
    }
}
