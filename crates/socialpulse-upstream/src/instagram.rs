//! Instagram scraper client (RapidAPI-hosted) and profile shape extractors.

use reqwest::{Client, Url};
use serde_json::Value;

use socialpulse_core::{InstagramFallback, InstagramOutcome, InstagramProfile, RapidApiCredentials};

use crate::error::UpstreamError;
use crate::http::{build_client, endpoint, normalize_base_url, send_json};
use crate::json::{at, boolean, metric, string};

pub const UNPARSED_WARNING: &str = "Could not parse standard stats. Raw response below.";

type ProfileExtractor = fn(&Value) -> Option<InstagramProfile>;

/// Profile shapes, highest priority first.
const PROFILE_EXTRACTORS: &[ProfileExtractor] = &[user_object, graphql_user];

#[derive(Debug, Clone)]
pub struct InstagramClient {
    client: Client,
    api_key: String,
    host: String,
    base_url: Url,
}

impl InstagramClient {
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
    ///
    /// # Errors
    ///
    /// Same as [`InstagramClient::new`].
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

    /// Fetches the raw profile payload for `username` from `ig/info_username/`.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] on a non-2xx response.
    /// - [`UpstreamError::Http`] on network failure.
    pub async fn fetch_profile(&self, username: &str) -> Result<Value, UpstreamError> {
        let url = endpoint(&self.base_url, "ig/info_username/")?;

        tracing::debug!(url = %url, username, "fetching instagram profile");

        let request = self
            .client
            .get(url)
            .query(&[("user", username)])
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host);
        send_json(request).await
    }
}

/// Normalizes `payload`, falling back to the untouched payload plus a warning
/// when no known shape matches.
#[must_use]
pub fn extract_outcome(payload: Value) -> InstagramOutcome {
    match extract_profile(&payload) {
        Some(profile) => InstagramOutcome::Profile(profile),
        None => InstagramOutcome::Fallback(InstagramFallback {
            warning: UNPARSED_WARNING.to_string(),
            raw: payload,
        }),
    }
}

#[must_use]
pub fn extract_profile(payload: &Value) -> Option<InstagramProfile> {
    PROFILE_EXTRACTORS.iter().find_map(|extract| extract(payload))
}

/// Scraper shape: `{user: {follower_count, following_count, media_count, ...}}`.
fn user_object(payload: &Value) -> Option<InstagramProfile> {
    let user = at(payload, &["user"]).filter(|v| v.is_object())?;

    Some(InstagramProfile {
        followers: metric(user, &[&["follower_count"], &["followers"]]),
        following: metric(user, &[&["following_count"], &["following"]]),
        posts: metric(user, &[&["media_count"], &["posts"]]),
        profile_pic_url: string(
            user,
            &[&["profile_pic_url"], &["hd_profile_pic_url_info", "url"]],
        ),
        ..common_fields(user)
    })
}

/// Web GraphQL shape: `{data: {user: {edge_followed_by: {count}, ...}}}`.
fn graphql_user(payload: &Value) -> Option<InstagramProfile> {
    let user = at(payload, &["data", "user"]).filter(|v| v.is_object())?;

    Some(InstagramProfile {
        followers: metric(user, &[&["edge_followed_by", "count"]]),
        following: metric(user, &[&["edge_follow", "count"]]),
        posts: metric(user, &[&["edge_owner_to_timeline_media", "count"]]),
        profile_pic_url: string(user, &[&["profile_pic_url_hd"]]),
        ..common_fields(user)
    })
}

fn common_fields(user: &Value) -> InstagramProfile {
    InstagramProfile {
        username: string(user, &[&["username"]]),
        full_name: string(user, &[&["full_name"]]),
        biography: string(user, &[&["biography"]]),
        is_private: boolean(user, &["is_private"]),
        ..InstagramProfile::default()
    }
}
