//! Error types for vscdl

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for vscdl
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    ApiError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The identifier could not be mapped to any deployment
    #[error("Could not resolve `{identifier}`: {reason}")]
    ResolutionError { identifier: String, reason: String },

    #[error("Deployment {0} has no source tree")]
    SourceNotFound(String),

    /// A single entry could not be fetched or written
    #[error("Download of {} failed: {source}", path.display())]
    DownloadError {
        path: PathBuf,
        #[source]
        source: Box<FetchError>,
    },

    #[error("Unsafe path: {0}")]
    UnsafePath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FetchError {
    pub fn download(path: impl Into<PathBuf>, source: FetchError) -> Self {
        FetchError::DownloadError {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// HTTP status of an API failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::ApiError { status, .. } => Some(*status),
            FetchError::HttpError(e) => e.status().map(|s| s.as_u16()),
            FetchError::DownloadError { source, .. } => source.status(),
            _ => None,
        }
    }
}
