use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file or string into a [`Dataset`](crate::Dataset)
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset does not match the expected shape:\n{}", .0.join("\n"))]
    Schema(Vec<String>),
}
