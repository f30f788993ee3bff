use thiserror::Error;

/// Errors returned by the upstream API clients.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-2xx status. `body` is the decoded
    /// JSON body, or the raw text as a JSON string when it was not JSON.
    #[error("upstream returned HTTP {status}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl UpstreamError {
    /// The upstream HTTP status, when the request got that far.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
