//! Error kinds for the two migration stages.
//!
//! `ParseError` means the source logs need fixing, `InsertError` means the
//! database (or the connection to it) does. Callers match on the type to tell
//! the two apart.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("invalid timestamp '{raw}': {source}")]
    Format {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("timestamp '{raw}' does not exist in the local time zone")]
    NonexistentLocalTime { raw: String },
}

#[derive(Debug, Error)]
pub enum RowError {
    #[error("row has {found} fields, missing the {field} column")]
    MissingField { field: &'static str, found: usize },
    #[error("bad {field} column: {source}")]
    Timestamp {
        field: &'static str,
        #[source]
        source: TimestampError,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}:{line}: {source}", path.display())]
    Row {
        path: PathBuf,
        line: u64,
        #[source]
        source: RowError,
    },
}

/// A single record failed to insert or commit. `index` is the resume point.
#[derive(Debug, Error)]
#[error("Failed at {index}: {source}")]
pub struct InsertError {
    pub index: usize,
    #[source]
    pub source: rusqlite::Error,
}
