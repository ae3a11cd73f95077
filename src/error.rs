//! Error types for query pack generation
//!
//! Per-line problems are not errors: they are recorded as
//! [`crate::record::Rejection`]s and the scan continues. Everything here is
//! fatal and ends the run.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while reading the database or writing the pack
#[derive(Error, Debug)]
pub enum QpackError {
    #[error("Rootkit database not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read rootkit database {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write query pack {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize query pack: {0}")]
    Serialize(#[from] serde_json::Error),
}
