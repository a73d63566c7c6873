//! Error handling for eBird export parsing.
//!
//! Every failure is fatal to the run that produced it: the parser never
//! skips a bad record or retries a failed handler.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error type a row handler may return.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Return type of a row handler.
pub type HandlerResult = std::result::Result<(), HandlerError>;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Source unavailable: {path} - {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read record {record}: {source}")]
    Tokenizer {
        record: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed record {record}, column {column} ('{value}'): {reason}")]
    MalformedRecord {
        record: u64,
        column: usize,
        value: String,
        reason: String,
    },

    #[error("Handler failed on record {record}: {source}")]
    Handler {
        record: u64,
        #[source]
        source: HandlerError,
    },

    #[error("Worker task failed: {reason}")]
    WorkerPanicked { reason: String },
}

impl ParserError {
    /// Create a malformed record error for a single column
    pub fn malformed(
        record: u64,
        column: usize,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            record,
            column,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Record number the error refers to, when there is one
    pub fn record(&self) -> Option<u64> {
        match self {
            Self::Tokenizer { record, .. }
            | Self::MalformedRecord { record, .. }
            | Self::Handler { record, .. } => Some(*record),
            Self::SourceUnavailable { .. } | Self::WorkerPanicked { .. } => None,
        }
    }
}

impl From<tokio::task::JoinError> for ParserError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::WorkerPanicked {
            reason: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParserError>;
