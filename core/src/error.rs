//! Error taxonomy shared by the Runner and the Renderer.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    /// An endpoint could not be reached before measurement started.
    #[error("failed to connect to {endpoint} at {address}: {reason}")]
    ConnectionFailure {
        endpoint: String,
        address: String,
        reason: String,
    },

    /// A store command failed mid-run. Not retried.
    #[error("store command failed: {0}")]
    Store(String),

    /// The Renderer was started before any result document was written.
    #[error("results file not found: {}", .0.display())]
    RenderInputMissing(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed result document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl BenchError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BenchError::Io {
            path: path.into(),
            source,
        }
    }
}
