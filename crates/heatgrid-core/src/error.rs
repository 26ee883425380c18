//! Unified error handling for heatgrid-core

use thiserror::Error;

/// Core error type for heatgrid-core
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete configuration (empty color table, bad
    /// first-day-of-week, missing required settings). Fatal to the pass.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetched or provided data is not an array of valid records.
    /// Aborts the current render pass; no partial grid is produced.
    #[error("Data shape error: {0}")]
    DataShape(String),

    /// Network request failed. Surfaced once; the core never retries.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A newer render pass was started while this one was fetching.
    /// The stale result is discarded, never applied.
    #[error("Render pass superseded by a newer one")]
    Superseded,
}

/// Result type alias for heatgrid-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data shape error
    pub fn data_shape(msg: impl Into<String>) -> Self {
        Error::DataShape(msg.into())
    }
}

// Convert to String for embedding callers that return plain messages
impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
