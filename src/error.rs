//! Error type shared by the extract, load and pipeline stages.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting or loading a data file.
///
/// Every variant is fatal for the run: the pipeline stops at the first error
/// and the file being processed is rolled back.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Error walking {root:?}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Malformed JSON in {path:?} at line {line}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Empty data file: {0:?}")]
    EmptyFile(PathBuf),

    #[error("Missing field '{field}' in {path:?} at line {line}")]
    MissingField {
        path: PathBuf,
        line: usize,
        field: &'static str,
    },

    #[error("Timestamp {0} ms is out of range")]
    TimestampOutOfRange(i64),

    #[error("Schema mismatch: {0}")]
    Schema(String),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}

pub type EtlResult<T> = Result<T, EtlError>;
