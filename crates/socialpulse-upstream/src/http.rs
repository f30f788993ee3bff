//! Shared `reqwest` plumbing for the upstream clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::error::UpstreamError;

pub(crate) const USER_AGENT: &str = "socialpulse/0.1 (stats-proxy)";

/// Builds the HTTP client shared by one upstream.
///
/// Upstream calls carry no overall timeout unless `timeout_secs` is set.
pub(crate) fn build_client(timeout_secs: Option<u64>) -> Result<Client, UpstreamError> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Parses `base_url`, ensuring it ends with exactly one slash so relative
/// endpoint paths join under it instead of replacing its last segment.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<Url, UpstreamError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| UpstreamError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn endpoint(base_url: &Url, path: &str) -> Result<Url, UpstreamError> {
    base_url
        .join(path)
        .map_err(|e| UpstreamError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}

/// Sends `request` and decodes the body.
///
/// Bodies that are not JSON come back as a JSON string holding the raw text,
/// so shape extraction fails on them instead of the transport.
///
/// # Errors
///
/// - [`UpstreamError::Http`] on network failure.
/// - [`UpstreamError::Status`] on a non-2xx response, carrying the body.
pub(crate) async fn send_json(request: RequestBuilder) -> Result<Value, UpstreamError> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

    if !status.is_success() {
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
