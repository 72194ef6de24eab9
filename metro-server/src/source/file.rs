//! Connection records from a JSON file on disk.

use std::path::PathBuf;

use tracing::debug;

use crate::graph::{ConnectionRecord, retain_named};

use super::EdgeSource;
use super::error::SourceError;

/// Reads a JSON array of connection records from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EdgeSource for FileSource {
    async fn fetch(&self) -> Result<Vec<ConnectionRecord>, SourceError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        let records: Vec<ConnectionRecord> =
            serde_json::from_str(&contents).map_err(|e| SourceError::Json {
                message: e.to_string(),
            })?;

        let total = records.len();
        let records = retain_named(records);
        debug!(
            path = %self.path.display(),
            total,
            kept = records.len(),
            "Read connection records from file"
        );

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RECORDS: &str = r#"[
        {
            "from_station_travel_group": 1,
            "to_station_travel_group": 2,
            "line_id": 1,
            "travel_time": 3,
            "from_station_cn": "莘庄",
            "from_station_en": "Xinzhuang",
            "to_station_cn": "外环路",
            "to_station_en": "Waihuan Road"
        },
        {
            "from_station_travel_group": 2,
            "to_station_travel_group": 3,
            "line_id": 1,
            "travel_time": 2,
            "from_station_cn": "外环路",
            "from_station_en": "Waihuan Road",
            "to_station_cn": null,
            "to_station_en": "Lianhua Road"
        }
    ]"#;

    #[tokio::test]
    async fn reads_and_filters_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edges.json");
        std::fs::write(&path, RECORDS).unwrap();

        let records = FileSource::new(&path).fetch().await.unwrap();

        // The second record has no primary name for its destination.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].travel_time, 3);
        assert_eq!(records[0].to_name_en.as_deref(), Some("Waihuan Road"));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/path/edges.json");

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edges.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Json { .. }));
    }

    #[tokio::test]
    async fn zero_group_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edges.json");
        std::fs::write(
            &path,
            r#"[{"from_station_travel_group": 0, "to_station_travel_group": 2, "line_id": 1, "travel_time": 3}]"#,
        )
        .unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Json { .. }));
    }
}
