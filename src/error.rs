use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the playlist generator
#[derive(Error, Debug)]
pub enum XtreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error on {}: {}", path.display(), source)]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, XtreamError>;
