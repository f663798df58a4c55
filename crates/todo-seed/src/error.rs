//! Error types for the seed client.

use std::fmt;

/// Errors reported by the seed endpoint itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http { status: u16, message: String },
    /// The endpoint does not exist.
    NotFound { url: String },
    /// Network/connection error.
    Network { message: String },
    /// The response body could not be decoded as seed records.
    InvalidResponse { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::NotFound { url } => write!(f, "seed endpoint not found: {}", url),
            ApiError::Network { message } => write!(f, "Network error: {}", message),
            ApiError::InvalidResponse { message } => {
                write!(f, "Invalid seed response: {}", message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Top-level error type for the seed client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint answered with an error, or the answer was unusable.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The HTTP client could not be constructed or the request failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Returns the endpoint error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for seed client operations.
pub type Result<T> = std::result::Result<T, Error>;
