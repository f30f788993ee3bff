//! One fetch-and-render cycle per dashboard.
//!
//! Each dashboard goes idle -> loading -> result or error. Proxy failures
//! never abort the process; they become a [`View::Failed`] that `main`
//! prints as an error box.

use anyhow::Context;
use serde_json::Value;
use socialpulse_core::{InstagramOutcome, TwitterStats, VideoStats, ViralityRequest};
use socialpulse_upstream::virality::{scoring_request, ViralityClient};

use crate::input::{clean_instagram_input, extract_video_id};
use crate::panels;
use crate::proxy::ProxyClient;

/// What a dashboard shows once loading finishes.
#[derive(Debug, PartialEq)]
pub(crate) enum View {
    Panel(String),
    Failed { message: String, raw: Option<Value> },
}

impl View {
    fn failed(message: impl Into<String>) -> Self {
        View::Failed {
            message: message.into(),
            raw: None,
        }
    }
}

pub(crate) struct Dashboard {
    proxy: ProxyClient,
    scorer: Option<ViralityClient>,
}

impl Dashboard {
    /// The scoring client is optional: a malformed ML URL disables scoring
    /// instead of failing the dashboard.
    pub(crate) fn new(server_url: &str, ml_url: &str) -> anyhow::Result<Self> {
        let proxy = ProxyClient::new(server_url)?;
        let scorer = ViralityClient::new(ml_url, None)
            .inspect_err(|e| tracing::debug!(error = %e, "virality scoring disabled"))
            .ok();
        Ok(Self { proxy, scorer })
    }

    pub(crate) async fn twitter(&self, url: &str) -> View {
        let url = url.trim();
        if url.is_empty() {
            return View::failed("Please enter a Twitter/X URL");
        }
        self.twitter_view(url)
            .await
            .unwrap_or_else(|e| View::failed(format!("{e:#}")))
    }

    async fn twitter_view(&self, url: &str) -> anyhow::Result<View> {
        let reply = self.proxy.get("twitter", "url", url).await?;
        if let Some(message) = reply.failure(&["error"], "Failed to fetch stats") {
            return Ok(View::failed(message));
        }

        let stats: TwitterStats =
            serde_json::from_value(reply.body).context("unexpected response from server")?;
        let mut out = panels::twitter_panel(&stats);
        if let TwitterStats::Tweet(tweet) = &stats {
            let request = scoring_request(
                None,
                Some(&tweet.views),
                Some(&tweet.likes),
                Some(&tweet.replies),
            );
            self.append_score(&mut out, &request).await;
        }
        Ok(View::Panel(out))
    }

    pub(crate) async fn instagram(&self, input: &str) -> View {
        let username = clean_instagram_input(input);
        if username.is_empty() {
            return View::failed("Please enter an Instagram username");
        }
        self.instagram_view(&username)
            .await
            .unwrap_or_else(|e| View::failed(format!("{e:#}")))
    }

    async fn instagram_view(&self, username: &str) -> anyhow::Result<View> {
        let reply = self.proxy.get("instagram", "username", username).await?;
        if let Some(message) = reply.failure(&["message", "error"], "Failed to fetch stats") {
            return Ok(View::failed(message));
        }

        let outcome: InstagramOutcome =
            serde_json::from_value(reply.body).context("unexpected response from server")?;
        Ok(match outcome {
            InstagramOutcome::Profile(profile) => View::Panel(panels::instagram_panel(&profile)),
            InstagramOutcome::Fallback(fallback) => View::Failed {
                message: fallback.warning,
                raw: Some(fallback.raw),
            },
        })
    }

    pub(crate) async fn youtube(&self, input: &str) -> View {
        if input.trim().is_empty() {
            return View::failed("Please enter a YouTube URL");
        }
        let Some(video_id) = extract_video_id(input) else {
            return View::failed("Invalid YouTube URL. Please check and try again.");
        };
        self.youtube_view(&video_id)
            .await
            .unwrap_or_else(|e| View::failed(format!("{e:#}")))
    }

    async fn youtube_view(&self, video_id: &str) -> anyhow::Result<View> {
        let reply = self.proxy.get("api/video-stats", "videoId", video_id).await?;
        if let Some(message) = reply.failure(&["error"], "Failed to fetch data") {
            return Ok(View::failed(message));
        }

        let video: VideoStats =
            serde_json::from_value(reply.body).context("unexpected response from server")?;
        let mut out = panels::youtube_panel(&video);
        let request = scoring_request(
            None,
            video.view_count.as_ref(),
            video.like_count.as_ref(),
            video.comment_count.as_ref(),
        );
        self.append_score(&mut out, &request).await;
        Ok(View::Panel(out))
    }

    /// Appends the virality panel when scoring succeeds. Scoring failures
    /// are only logged.
    async fn append_score(&self, out: &mut String, request: &ViralityRequest) {
        let Some(scorer) = &self.scorer else {
            return;
        };
        match scorer.predict(request).await {
            Ok(score) => {
                out.push('\n');
                out.push_str(&panels::score_panel(&score));
            }
            Err(e) => tracing::debug!(error = %e, "virality scoring failed"),
        }
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
