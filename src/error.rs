//! Error types for the task model and the file-backed store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Date or timestamp text that is not in the fixed `YYYY-MM-DD[ HH:MM:SS]` layout.
#[derive(Debug, Error)]
pub enum DateError {
    #[error("expected {0}")]
    Shape(&'static str),

    #[error(transparent)]
    Invalid(#[from] chrono::ParseError),
}

/// A persisted record that cannot be turned back into a `Task`.
#[derive(Debug, Error)]
pub enum MalformedRecord {
    /// Missing keys or values of the wrong type
    #[error("invalid record: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("invalid due_date {value:?}: expected YYYY-MM-DD")]
    DueDate {
        value: String,
        source: DateError,
    },

    #[error("invalid created_at {value:?}: expected YYYY-MM-DD HH:MM:SS")]
    CreatedAt {
        value: String,
        source: DateError,
    },
}

/// Why an existing backing file could not be loaded.
#[derive(Debug, Error)]
pub enum CorruptCause {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("not a JSON array of task records: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: MalformedRecord,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid task index {position}: expected 1..={count}")]
    IndexOutOfRange { position: usize, count: usize },

    #[error("task file {} is corrupt: {cause}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        cause: CorruptCause,
    },

    /// The in-memory change has already been applied when this is returned.
    #[error("failed to save tasks to {}: {source}", path.display())]
    PersistFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
