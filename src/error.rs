//! Error types for schema-state conversion and rendering.

use std::io;
use thiserror::Error;

/// Result type for schema-state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur while converting or rendering schema state.
#[derive(Error, Debug)]
pub enum StateError {
    /// The output sink rejected a write.
    #[error("failed to write DDL: {0}")]
    Write(#[source] io::Error),

    /// Partition method has no DDL keyword.
    #[error("unsupported partition type: {0}")]
    UnsupportedPartitionType(String),

    /// A metadata document could not be (de)serialized.
    #[error("invalid metadata document: {0}")]
    Document(#[from] serde_json::Error),

    /// Reading or writing a metadata document file failed.
    #[error("failed to access metadata document: {0}")]
    Io(#[source] io::Error),

    /// SQL text could not be parsed.
    #[error("failed to parse statement: {0}")]
    Parse(String),
}

impl StateError {
    /// Check if this error came from the output sink.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}

impl From<io::Error> for StateError {
    fn from(err: io::Error) -> Self {
        Self::Write(err)
    }
}
