//! Sources of connection records.
//!
//! The graph is built from records held in a store outside this service.
//! Sources read them from a JSON file or an HTTP endpoint and drop records
//! without primary names.

mod client;
mod error;
mod file;

use std::future::Future;

use crate::graph::ConnectionRecord;

pub use client::{EdgesResponse, HttpSource, HttpSourceConfig};
pub use error::SourceError;
pub use file::FileSource;

/// Trait for providing connection records.
///
/// This abstraction allows the engine to be tested with in-memory data.
pub trait EdgeSource {
    /// Fetch the full record set.
    fn fetch(&self) -> impl Future<Output = Result<Vec<ConnectionRecord>, SourceError>> + Send;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<ConnectionRecord>,
}

impl MemorySource {
    /// Create a source that always returns the given records.
    pub fn new(records: Vec<ConnectionRecord>) -> Self {
        Self { records }
    }
}

impl EdgeSource for MemorySource {
    async fn fetch(&self) -> Result<Vec<ConnectionRecord>, SourceError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}

/// The source selected by server configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    File(FileSource),
    Http(HttpSource),
}

impl EdgeSource for ConfiguredSource {
    async fn fetch(&self) -> Result<Vec<ConnectionRecord>, SourceError> {
        match self {
            ConfiguredSource::File(source) => source.fetch().await,
            ConfiguredSource::Http(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            ConfiguredSource::File(source) => source.describe(),
            ConfiguredSource::Http(source) => source.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, StationGroup};
    use tempfile::tempdir;

    fn record() -> ConnectionRecord {
        ConnectionRecord::new(
            StationGroup::new(1).unwrap(),
            StationGroup::new(2).unwrap(),
            LineId(1),
            3,
        )
        .with_names(("莘庄", "Xinzhuang"), ("外环路", "Waihuan Road"))
    }

    #[tokio::test]
    async fn memory_source_returns_records() {
        let source = MemorySource::new(vec![record()]);
        assert_eq!(source.fetch().await.unwrap(), vec![record()]);
        assert_eq!(source.describe(), "1 in-memory records");
    }

    #[tokio::test]
    async fn configured_file_source_reads_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edges.json");
        std::fs::write(&path, serde_json::to_string(&vec![record()]).unwrap()).unwrap();

        let source = ConfiguredSource::File(FileSource::new(&path));

        assert_eq!(source.fetch().await.unwrap(), vec![record()]);
        assert_eq!(source.describe(), format!("file {}", path.display()));
    }

    #[tokio::test]
    async fn missing_file_is_error() {
        let dir = tempdir().unwrap();
        let source = ConfiguredSource::File(FileSource::new(dir.path().join("missing.json")));

        assert!(matches!(
            source.fetch().await,
            Err(SourceError::Io { .. })
        ));
    }
}
