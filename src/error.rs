//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O and JSON errors, and provides semantic variants
//! for malformed documents, unexpected file names and invalid configuration.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed JSON document {}: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Book file name does not carry an integer id: {name}")]
    InvalidBookFileName { name: String },

    #[error("Invalid configuration: {field}={value}")]
    InvalidConfig { field: &'static str, value: String },

    #[error("Directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },
}
