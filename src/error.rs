//! Error types surfaced to the driving CLI.
//!
//! Malformed field values are not errors: coercion turns them into zeros.

use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration problems. Fatal: no session is created.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing CSV file, please provide a file path")]
    MissingInput,
}

/// The input file could not be read or parsed as CSV.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as CSV: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Results could not be written.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
