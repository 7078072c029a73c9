use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row could not be decoded into a trip record.
    #[error("Failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A column every city file must carry is missing from the header.
    #[error("Required column {column:?} missing from {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A timestamp cell did not match any recognised format.
    #[error("Invalid timestamp {value:?} on row {row}")]
    TimestampParse { row: usize, value: String },

    /// A selector value is not part of its permitted vocabulary.
    #[error("Invalid {kind}: {value}")]
    InvalidSelection { kind: &'static str, value: String },

    /// A statistic was requested over a selection with no trips.
    #[error("No trips match the selected filters")]
    EmptyDataset,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
