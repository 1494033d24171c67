//! Dataset error types
//!
//! Every variant is fatal at startup: the dashboard cannot render without data.

use thiserror::Error;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading a local file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching a remote resource failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote resource answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// A row could not be decoded
    #[error("Line {line}: {message}")]
    Csv { line: u64, message: String },

    /// A required column is missing from the header
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A `Date` field could not be parsed
    #[error("Line {line}: could not parse date: {value}")]
    InvalidDate { line: u64, value: String },

    /// A `Region` field is not one of the known codes
    #[error("Line {line}: unknown region: {value}")]
    UnknownRegion { line: u64, value: String },
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
