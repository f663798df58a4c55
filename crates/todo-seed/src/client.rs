//! HTTP client for the seed endpoint.

use std::fmt;
use std::time::Duration;

use crate::error::{ApiError, Error, Result};
use crate::models::SeedTodo;

/// Default base URL of the seed endpoint.
pub const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Number of sample todos requested by default.
pub const DEFAULT_LIMIT: u32 = 5;

/// Request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for fetching sample todos.
///
/// The seed endpoint is only consulted once, the first time a profile is
/// opened without any persisted todos. Requests are never retried.
#[derive(Clone)]
pub struct SeedClient {
    http_client: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl SeedClient {
    /// Creates a new SeedClient pointed at the public sample endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Creates a new SeedClient with a custom base URL.
    ///
    /// A trailing slash on `base_url` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
            limit: DEFAULT_LIMIT,
        })
    }

    /// Sets the number of todos requested.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the number of todos requested.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the full URL that [`fetch_todos`](Self::fetch_todos) requests.
    pub fn todos_url(&self) -> String {
        format!("{}/todos?_limit={}", self.base_url, self.limit)
    }

    /// Fetches the sample todos.
    ///
    /// # Errors
    ///
    /// - `ApiError::Network` if the endpoint cannot be reached.
    /// - `ApiError::NotFound` / `ApiError::Http` for non-success statuses.
    /// - `ApiError::InvalidResponse` if the body is not a list of seed records.
    pub async fn fetch_todos(&self) -> Result<Vec<SeedTodo>> {
        let url = self.todos_url();
        tracing::debug!(%url, "fetching seed todos");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.parse_error_response(&url, response).await);
        }

        let body = response.text().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        let todos: Vec<SeedTodo> =
            serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse {
                message: e.to_string(),
            })?;

        tracing::debug!(count = todos.len(), "received seed todos");
        Ok(todos)
    }

    /// Converts a non-success response into our error types.
    async fn parse_error_response(&self, url: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();

        let api_error = match status.as_u16() {
            404 => ApiError::NotFound {
                url: url.to_string(),
            },
            code => ApiError::Http {
                status: code,
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    message
                },
            },
        };

        Error::Api(api_error)
    }
}

impl fmt::Debug for SeedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedClient")
            .field("base_url", &self.base_url)
            .field("limit", &self.limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_client_default_base_url() {
        let client = SeedClient::new().unwrap();
        assert_eq!(client.base_url(), BASE_URL);
        assert_eq!(client.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_seed_client_trims_trailing_slash() {
        let client = SeedClient::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_todos_url_includes_limit() {
        let client = SeedClient::with_base_url("http://localhost:8080")
            .unwrap()
            .with_limit(3);
        assert_eq!(client.todos_url(), "http://localhost:8080/todos?_limit=3");
    }

    #[test]
    fn test_seed_client_is_debug() {
        let client = SeedClient::new().unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("SeedClient"));
        assert!(debug_str.contains("jsonplaceholder"));
    }
}
