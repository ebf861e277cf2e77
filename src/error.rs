//! Error types for the timetable search.
//!
//! The evolutionary core is made of total functions over an in-memory catalog,
//! so errors only arise before the search starts: while loading the catalog,
//! validating the configuration, or writing the final timetable.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a timetable search run.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// An invalid configuration or a catalog the search cannot operate on.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A malformed record in one of the catalog input files.
    #[error("Data format error in {file} at line {line}: {message}")]
    DataFormat {
        file: PathBuf,
        line: u64,
        message: String,
    },

    /// The population holds no individual to report.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON configuration file could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimetableError {
    /// Shorthand for a data format error.
    pub fn data_format(file: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        TimetableError::DataFormat {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// A specialized Result type for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
