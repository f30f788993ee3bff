//! Client for the external virality scoring service (`POST /predict`).
//!
//! The service itself is not part of this workspace. Callers treat it as
//! optional and ignore its failures.

use reqwest::{Client, Url};

use socialpulse_core::{Metric, ViralityRequest, ViralityScore};

use crate::error::UpstreamError;
use crate::http::{build_client, endpoint, normalize_base_url, send_json};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

/// Follower count assumed when the caller has none, giving the model a
/// plausible audience size for content-only scoring.
pub const ASSUMED_FOLLOWERS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct ViralityClient {
    client: Client,
    base_url: Url,
}

impl ViralityClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if `base_url` is malformed.
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Scores `request`.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] on a non-2xx response.
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::Deserialize`] if the score body is malformed.
    pub async fn predict(&self, request: &ViralityRequest) -> Result<ViralityScore, UpstreamError> {
        let url = endpoint(&self.base_url, "predict")?;
        let body = send_json(self.client.post(url).json(request)).await?;
        serde_json::from_value(body).map_err(|e| UpstreamError::Deserialize {
            context: "predict".to_string(),
            source: e,
        })
    }
}

/// Builds a scoring request from dashboard metrics.
///
/// Counts that are missing or not plain integers (`"N/A"`) become 0, and a
/// zero follower count is replaced by [`ASSUMED_FOLLOWERS`].
#[must_use]
pub fn scoring_request(
    followers: Option<&Metric>,
    views: Option<&Metric>,
    likes: Option<&Metric>,
    comments: Option<&Metric>,
) -> ViralityRequest {
    let count = |m: Option<&Metric>| m.and_then(Metric::as_u64).unwrap_or(0);
    let followers = match count(followers) {
        0 => ASSUMED_FOLLOWERS,
        n => n,
    };
    ViralityRequest {
        followers,
        views: count(views),
        likes: count(likes),
        comments: count(comments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_request_sanitizes_counts() {
        let views = Metric::Text("1500".to_string());
        let likes = Metric::not_available();
        let comments = Metric::from(12);
        let req = scoring_request(None, Some(&views), Some(&likes), Some(&comments));
        assert_eq!(
            req,
            ViralityRequest {
                followers: ASSUMED_FOLLOWERS,
                views: 1500,
                likes: 0,
                comments: 12,
            }
        );
    }

    #[test]
    fn scoring_request_keeps_real_follower_count() {
        let followers = Metric::from(42);
        let req = scoring_request(Some(&followers), None, None, None);
        assert_eq!(req.followers, 42);
    }
}
