//! `YouTube` Data API v3 client for single-video statistics.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use socialpulse_core::{Metric, VideoStats};

use crate::error::UpstreamError;
use crate::http::{build_client, endpoint, normalize_base_url, send_json};
use crate::json::string;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/";

#[derive(Debug, Default, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Default, Deserialize)]
struct VideoItem {
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snippet {
    title: String,
    channel_title: String,
    published_at: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Statistics {
    view_count: Option<Metric>,
    like_count: Option<Metric>,
    comment_count: Option<Metric>,
}

impl Thumbnails {
    /// Best available thumbnail: high, then medium, then default.
    fn best_url(self) -> Option<String> {
        [self.high, self.medium, self.default]
            .into_iter()
            .flatten()
            .find_map(|t| t.url)
    }
}

impl From<VideoItem> for VideoStats {
    fn from(item: VideoItem) -> Self {
        let VideoItem {
            snippet,
            statistics,
        } = item;
        VideoStats {
            title: snippet.title,
            channel_title: snippet.channel_title,
            thumbnail_url: snippet.thumbnails.best_url(),
            published_at: snippet.published_at,
            view_count: statistics.view_count,
            like_count: statistics.like_count,
            comment_count: statistics.comment_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YouTubeClient {
    /// Creates a client against `base_url` (normally [`DEFAULT_BASE_URL`]).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if `base_url` is malformed.
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            api_key: api_key.to_owned(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Fetches snippet and statistics for one video.
    ///
    /// Returns `Ok(None)` when the API lists no video for `video_id`.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] on a non-2xx response.
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::Deserialize`] if the list envelope is malformed.
    pub async fn fetch_video(&self, video_id: &str) -> Result<Option<VideoStats>, UpstreamError> {
        let url = endpoint(&self.base_url, "youtube/v3/videos")?;

        tracing::debug!(url = %url, video_id, "fetching youtube video stats");

        let request = self.client.get(url).query(&[
            ("part", "snippet,statistics"),
            ("id", video_id),
            ("key", self.api_key.as_str()),
        ]);
        let body = send_json(request).await?;

        let list: VideoListResponse =
            serde_json::from_value(body).map_err(|e| UpstreamError::Deserialize {
                context: format!("videos(id={video_id})"),
                source: e,
            })?;

        Ok(list.items.into_iter().next().map(VideoStats::from))
    }
}

/// Reads `error.message` from a Data API error envelope.
#[must_use]
pub fn api_error_message(body: &Value) -> Option<String> {
    string(body, &[&["error", "message"]])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn thumbnail_prefers_high_then_medium_then_default() {
        let thumbs: Thumbnails = serde_json::from_value(json!({
            "default": {"url": "d"},
            "medium": {"url": "m"}
        }))
        .unwrap();
        assert_eq!(thumbs.best_url().as_deref(), Some("m"));

        let thumbs: Thumbnails = serde_json::from_value(json!({})).unwrap();
        assert!(thumbs.best_url().is_none());
    }

    #[test]
    fn statistics_pass_through_unmodified() {
        let item: VideoItem = serde_json::from_value(json!({
            "snippet": {
                "title": "Intro",
                "channelTitle": "Chan",
                "publishedAt": "2024-03-01T10:00:00Z",
                "thumbnails": {"high": {"url": "h"}}
            },
            "statistics": {"viewCount": "1000", "likeCount": "50"}
        }))
        .unwrap();

        let stats = VideoStats::from(item);
        assert_eq!(stats.title, "Intro");
        assert_eq!(stats.channel_title, "Chan");
        assert_eq!(stats.thumbnail_url.as_deref(), Some("h"));
        assert_eq!(stats.view_count, Some(Metric::Text("1000".to_string())));
        assert_eq!(stats.like_count, Some(Metric::Text("50".to_string())));
        assert!(stats.comment_count.is_none());
    }

    #[test]
    fn missing_items_decode_as_empty() {
        let list: VideoListResponse = serde_json::from_value(json!({"kind": "x"})).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn api_error_message_reads_nested_message() {
        let body = json!({"error": {"code": 400, "message": "API key not valid."}});
        assert_eq!(
            api_error_message(&body).as_deref(),
            Some("API key not valid.")
        );
        assert!(api_error_message(&json!("plain text")).is_none());
    }
}
