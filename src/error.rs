//! Error types for the digest pipeline.
//!
//! Only [`ConfigError`] and [`SinkError`] end a run. Per-source and per-entry
//! failures ([`SourceFetchError`], [`MalformedEntry`]) are recovered where they
//! happen and show up as fewer articles.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration document missing, unparseable, or invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A single feed source could not be fetched or parsed.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to parse feed: {0}")]
    Parse(String),
}

/// A feed entry without one of its required fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedEntry {
    #[error("entry has no title")]
    MissingTitle,

    #[error("entry has no link")]
    MissingLink,
}

/// Writing a report artifact failed.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a run that did not produce reports.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Not a crash: nothing survived filtering, so nothing is written.
    #[error("no articles after filtering")]
    EmptyResult,
}
