use std::path::PathBuf;
use thiserror::Error;

use crate::dialect::Dialect;

/// Core error type for styleflow operations.
///
/// Every failure is single-attempt: nothing in the pipeline retries, and a
/// failed load for one asset never affects sibling assets.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid module pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("unsupported stylesheet extension: {path}")]
    UnsupportedExtension { path: PathBuf },

    #[error("no {dialect} engine available: {reason}")]
    EngineUnavailable { dialect: Dialect, reason: String },

    #[error("cannot resolve '{specifier}' from '{from}'")]
    ResolutionFailure { specifier: String, from: PathBuf },

    #[error("failed to write artifact {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{dialect} render error: {message}")]
    Render { dialect: Dialect, message: String },

    #[error("[{plugin}] transform error: {message}")]
    Transform { plugin: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
