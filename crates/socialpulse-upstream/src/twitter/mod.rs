//! Twitter/X scraper client (RapidAPI-hosted).

mod extract;
mod url;

use reqwest::{Client, Url};
use serde_json::Value;

use socialpulse_core::RapidApiCredentials;

use crate::error::UpstreamError;
use crate::http::{build_client, endpoint, normalize_base_url, send_json};

pub use extract::extract_stats;
pub use url::{TargetError, TwitterTarget};

/// Client for the Twitter/X scraper endpoints `tweet.php` and
/// `screenname.php`.
///
/// Use [`TwitterClient::new`] for the configured RapidAPI host or
/// [`TwitterClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: Client,
    api_key: String,
    host: String,
    base_url: Url,
}

impl TwitterClient {
    /// Creates a client for `https://{host}/`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if the host is malformed.
    pub fn new(
        credentials: &RapidApiCredentials,
        timeout_secs: Option<u64>,
    ) -> Result<Self, UpstreamError> {
        let base_url = format!("https://{}", credentials.host);
        Self::with_base_url(credentials, timeout_secs, &base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    /// The `X-RapidAPI-Host` header still carries `credentials.host`.
    ///
    /// # Errors
    ///
    /// Same as [`TwitterClient::new`].
    pub fn with_base_url(
        credentials: &RapidApiCredentials,
        timeout_secs: Option<u64>,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            api_key: credentials.api_key.clone(),
            host: credentials.host.clone(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Fetches the raw payload for `target` from the matching endpoint.
    ///
    /// Exactly one request is made; a failure is not retried against the
    /// other endpoint.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] on a non-2xx response.
    /// - [`UpstreamError::Http`] on network failure.
    pub async fn fetch(&self, target: &TwitterTarget) -> Result<Value, UpstreamError> {
        let (path, param, value) = match target {
            TwitterTarget::Tweet { id } => ("tweet.php", "id", id.as_str()),
            TwitterTarget::Profile { handle } => ("screenname.php", "screenname", handle.as_str()),
        };
        let url = endpoint(&self.base_url, path)?;

        tracing::debug!(url = %url, param, value, "fetching twitter stats");

        let request = self
            .client
            .get(url)
            .query(&[(param, value)])
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host);
        send_json(request).await
    }
}
