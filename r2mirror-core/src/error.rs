//! Mirror error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for mirror operations.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Errors that can occur while mirroring buckets.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("S3 operation failed: {0}")]
    S3(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("missing environment variable: {0}")]
    MissingEnv(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MirrorError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
