//! Star Wars API client
//!
//! Fetches an endpoint once, parses the body as JSON and keeps it in the
//! shared cache. Every later fetch of the same endpoint is served from the
//! cache without touching the network.

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::CacheEntry;
use crate::state::SharedState;

/// User agent sent with every request
const USER_AGENT: &str = concat!("swapi-console/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when fetching an endpoint
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failed before a response arrived (DNS, TCP, TLS) or the
    /// body stream broke
    #[error("Request to '{endpoint}' failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// No complete response within the configured deadline
    #[error("Request to '{endpoint}' timed out after {timeout_ms} ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    /// The server answered with a status of 400 or above
    #[error("Request to '{endpoint}' returned HTTP {status_code}")]
    HttpStatus { endpoint: String, status_code: u16 },

    /// The body was not valid JSON
    #[error("Failed to parse response from '{endpoint}': {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// The endpoint the failed request was for
    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Network { endpoint, .. }
            | FetchError::Timeout { endpoint, .. }
            | FetchError::HttpStatus { endpoint, .. }
            | FetchError::Parse { endpoint, .. } => endpoint,
        }
    }
}

/// Client for fetching and caching Star Wars API resources
#[derive(Debug, Clone)]
pub struct SwapiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Cache, counters and configuration
    state: Arc<SharedState>,
}

impl SwapiClient {
    /// Creates a client bound to the given shared state
    ///
    /// Certificate verification stays on unless the configuration explicitly
    /// sets `insecure`.
    pub fn new(state: Arc<SharedState>) -> Result<Self, reqwest::Error> {
        if state.config.insecure {
            warn!("TLS certificate verification is disabled for all outbound requests");
        }

        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(state.config.insecure)
            .build()?;

        Ok(Self { http_client, state })
    }

    /// The shared state this client reads and updates
    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    /// Full URL for an endpoint
    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.state.config.base_url, endpoint)
    }

    /// Fetches an endpoint, serving it from the cache when possible
    ///
    /// # Arguments
    /// * `endpoint` - Path relative to the base URL, optionally with a query string
    ///
    /// # Returns
    /// * `Ok(CacheEntry)` - The parsed body, shared with the cache
    /// * `Err(FetchError)` - If the request, status check or parse fails
    ///
    /// # Behavior
    /// - A cache hit returns immediately and touches no counter
    /// - A miss performs one request; success populates the cache
    /// - Any failure increments the error counter exactly once and caches nothing
    pub async fn fetch(&self, endpoint: &str) -> Result<CacheEntry, FetchError> {
        if let Some(entry) = self.state.cache.lookup(endpoint) {
            debug!(endpoint, "cache hit");
            return Ok(entry);
        }

        debug!(endpoint, "cache miss, fetching");
        match self.fetch_from_api(endpoint).await {
            Ok(entry) => {
                self.state.cache.store(endpoint, entry.clone());
                Ok(entry)
            }
            Err(err) => {
                self.state.metrics.record_error();
                warn!(endpoint, error = %err, "fetch failed");
                Err(err)
            }
        }
    }

    /// Performs the request under the configured deadline and parses the body
    async fn fetch_from_api(&self, endpoint: &str) -> Result<CacheEntry, FetchError> {
        let timeout_ms = self.state.config.timeout_ms;
        let url = self.url_for(endpoint);

        // Dropping the in-flight future on expiry aborts the request.
        let body = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.read_body(endpoint, &url),
        )
        .await
        .map_err(|_| FetchError::Timeout {
            endpoint: endpoint.to_string(),
            timeout_ms,
        })??;

        let value: Value = serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            endpoint: endpoint.to_string(),
            source,
        })?;

        Ok(Arc::new(value))
    }

    /// Sends the GET and buffers the whole body of a successful response
    async fn read_body(&self, endpoint: &str, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(endpoint, e))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FetchError::HttpStatus {
                endpoint: endpoint.to_string(),
                status_code: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.request_error(endpoint, e))?;

        Ok(body.to_vec())
    }

    /// Maps a transport error, keeping timeouts reported by reqwest as timeouts
    fn request_error(&self, endpoint: &str, source: reqwest::Error) -> FetchError {
        if source.is_timeout() {
            FetchError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_ms: self.state.config.timeout_ms,
            }
        } else {
            FetchError::Network {
                endpoint: endpoint.to_string(),
                source,
            }
        }
    }
}
