//! Where job postings come from. `CorpusStore` only sees the trait, so tests and
//! future feeds plug in without touching the store or the handlers.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::corpus::record::JobRecord;
use crate::corpus::CorpusError;

/// One fetch: the records that decoded, plus how many entries were dropped.
#[derive(Debug, Default)]
pub struct SourceBatch {
    pub records: Vec<JobRecord>,
    pub rejected: usize,
}

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Every posting currently available, in source order.
    async fn fetch(&self) -> Result<SourceBatch, CorpusError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Reads the scrapers' JSON dump: a top-level array of job records. Entries
/// that do not decode are logged and skipped; the rest still load.
pub struct JsonFileJobSource {
    path: PathBuf,
}

impl JsonFileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobSource for JsonFileJobSource {
    async fn fetch(&self) -> Result<SourceBatch, CorpusError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Jobs file not found; starting with an empty corpus");
                return Ok(SourceBatch::default());
            }
            Err(e) => {
                return Err(CorpusError::Io {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };

        let entries: Vec<serde_json::Value> =
            serde_json::from_slice(&bytes).map_err(|e| CorpusError::Parse {
                path: self.path.display().to_string(),
                source: e,
            })?;

        let mut batch = SourceBatch::default();
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<JobRecord>(entry) {
                Ok(record) => batch.records.push(record),
                Err(error) => {
                    warn!(path = %self.path.display(), index, %error, "Skipping undecodable job record");
                    batch.rejected += 1;
                }
            }
        }

        info!(
            path = %self.path.display(),
            records = batch.records.len(),
            rejected = batch.rejected,
            "Loaded job records"
        );
        Ok(batch)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

/// Fixed in-memory records.
#[cfg(test)]
pub struct StaticJobSource {
    records: Vec<JobRecord>,
}

#[cfg(test)]
impl StaticJobSource {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
#[async_trait]
impl JobSource for StaticJobSource {
    async fn fetch(&self) -> Result<SourceBatch, CorpusError> {
        Ok(SourceBatch {
            records: self.records.clone(),
            rejected: 0,
        })
    }

    fn describe(&self) -> String {
        format!("{} static records", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_is_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileJobSource::new(dir.path().join("nope.json"));
        let batch = source.fetch().await.unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.rejected, 0);
    }

    #[tokio::test]
    async fn test_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"job_id": "a", "title": "Dev", "skills": ["Rust"]}},
               {{"job_id": "b", "title": "QA", "experience": "2 years"}}]"#
        )
        .unwrap();

        let records = JsonFileJobSource::new(file.path()).fetch().await.unwrap().records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].experience.as_deref(), Some("2 years"));
    }

    #[tokio::test]
    async fn test_bad_record_is_skipped_not_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"job_id": "a", "title": "Dev", "skills": ["Rust"]}},
               {{"job_id": "b", "skills": ["Go"]}},
               {{"job_id": 7, "title": "Ops"}}]"#
        )
        .unwrap();

        let batch = JsonFileJobSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].job_id, "a");
        assert_eq!(batch.rejected, 2);
    }

    #[tokio::test]
    async fn test_non_array_document_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"job_id": "a", "title": "Dev"}}"#).unwrap();
        let err = JsonFileJobSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, CorpusError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = JsonFileJobSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, CorpusError::Parse { .. }));
    }
}
