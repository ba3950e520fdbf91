//! JSON file adapter: Implementation of `PatientSource`.
//!
//! Reads a JSON array of patient records from disk. The array is decoded
//! first and each element converted on its own, so one malformed record is
//! reported in place instead of failing the file.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::ValidationError;
use crate::ports::{LoadedRecord, PatientSource};

/// Error type for record source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Expected a JSON array of patient records in {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Patient source backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatientSource for JsonFileSource {
    type Error = SourceError;

    fn load_records(&self) -> Result<Vec<LoadedRecord>, SourceError> {
        let content = std::fs::read(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let values: Vec<Value> =
            serde_json::from_slice(&content).map_err(|source| SourceError::Decode {
                path: self.path.clone(),
                source,
            })?;

        let records: Vec<LoadedRecord> = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| decode_record(index, value))
            .collect();

        let malformed = records.iter().filter(|r| r.is_err()).count();
        tracing::info!(count = records.len(), malformed, "Loaded patient records");
        Ok(records)
    }
}

fn decode_record(index: usize, value: Value) -> LoadedRecord {
    serde_json::from_value(value).map_err(|e| ValidationError::Malformed {
        index,
        reason: e.to_string(),
    })
}
