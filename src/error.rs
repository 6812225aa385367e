//! Error type for the loaders and report writers
//!
//! The projection engine itself is infallible; only reading inputs and writing
//! reports can fail.

use std::path::PathBuf;

/// Errors raised while loading parameter sets or writing reports
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A raw parameter document that is not a JSON object
    #[error("expected a JSON object of parameters, got {0}")]
    NotAnObject(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
