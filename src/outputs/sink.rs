//! Destinations for report artifacts.
//!
//! The pipeline only ever hands a [`ReportSink`] a file name and its
//! contents, which keeps disk access out of the pure stages.

use crate::error::SinkError;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, instrument};

/// Stores named report artifacts, overwriting existing ones.
pub trait ReportSink {
    async fn write(&self, name: &str, content: &str) -> Result<(), SinkError>;
}

/// Writes artifacts as files under one directory.
#[derive(Debug, Clone)]
pub struct FsReportSink {
    root: PathBuf,
}

impl FsReportSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ReportSink for FsReportSink {
    #[instrument(level = "debug", skip(self, content), fields(bytes = content.len()))]
    async fn write(&self, name: &str, content: &str) -> Result<(), SinkError> {
        let path = self.path_of(name);
        fs::write(&path, content)
            .await
            .map_err(|source| SinkError::Io {
                name: name.to_string(),
                source,
            })?;
        debug!(path = %path.display(), "Wrote report file");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use indexmap::IndexMap;
    use std::sync::Mutex;

    /// Keeps artifacts in memory, in write order.
    #[derive(Debug, Default)]
    pub struct MemorySink {
        pub files: Mutex<IndexMap<String, String>>,
    }

    impl MemorySink {
        pub fn names(&self) -> Vec<String> {
            self.files.lock().unwrap().keys().cloned().collect()
        }

        pub fn get(&self, name: &str) -> Option<String> {
            self.files.lock().unwrap().get(name).cloned()
        }
    }

    impl ReportSink for MemorySink {
        async fn write(&self, name: &str, content: &str) -> Result<(), SinkError> {
            self.files
                .lock()
                .unwrap()
                .insert(name.to_string(), content.to_string());
            Ok(())
        }
    }
}
