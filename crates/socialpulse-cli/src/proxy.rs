use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

/// HTTP client for the socialpulse proxy server.
#[derive(Debug, Clone)]
pub(crate) struct ProxyClient {
    client: Client,
    base_url: Url,
}

/// A proxy response, decoded as JSON when possible.
#[derive(Debug)]
pub(crate) struct ProxyReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ProxyReply {
    /// Returns the error text when the proxy reported a failure.
    ///
    /// A reply fails when its status is not 2xx or its body carries an
    /// `error` field. The text is taken from the first string field in
    /// `fields`, else `fallback`.
    pub(crate) fn failure(&self, fields: &[&str], fallback: &str) -> Option<String> {
        if self.status.is_success() && self.body.get("error").is_none() {
            return None;
        }
        let message = fields
            .iter()
            .find_map(|field| {
                self.body
                    .get(*field)
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
            })
            .unwrap_or(fallback);
        Some(message.to_string())
    }
}

impl ProxyClient {
    pub(crate) fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .with_context(|| format!("invalid server URL: {base_url}"))?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, base_url })
    }

    /// Sends `GET {base}/{path}?{param}={value}`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the proxy cannot be reached or the body
    /// cannot be read. HTTP error statuses are returned as a [`ProxyReply`].
    pub(crate) async fn get(
        &self,
        path: &str,
        param: &str,
        value: &str,
    ) -> anyhow::Result<ProxyReply> {
        let mut url = self
            .base_url
            .join(path)
            .with_context(|| format!("invalid proxy path: {path}"))?;
        url.query_pairs_mut().append_pair(param, value);

        tracing::debug!(%url, "requesting proxy");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("could not reach server at {}", self.base_url))?;

        let status = response.status();
        let text = response.text().await.context("failed to read server response")?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ProxyReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reply(status: u16, body: Value) -> ProxyReply {
        ProxyReply {
            status: StatusCode::from_u16(status).expect("status"),
            body,
        }
    }

    #[test]
    fn success_without_error_field_is_not_a_failure() {
        assert_eq!(reply(200, json!({"type": "tweet"})).failure(&["error"], "x"), None);
    }

    #[test]
    fn failure_prefers_listed_fields_in_order() {
        let r = reply(404, json!({"error": "API request failed", "message": "User not found"}));
        assert_eq!(
            r.failure(&["message", "error"], "x").as_deref(),
            Some("User not found")
        );
        assert_eq!(
            r.failure(&["error"], "x").as_deref(),
            Some("API request failed")
        );
    }

    #[test]
    fn empty_message_falls_through_to_error_field() {
        let r = reply(599, json!({"error": "API request failed", "message": ""}));
        assert_eq!(
            r.failure(&["message", "error"], "Failed to fetch stats").as_deref(),
            Some("API request failed")
        );
    }

    #[test]
    fn failure_falls_back_for_non_json_bodies() {
        let r = reply(502, Value::String("Bad Gateway".to_string()));
        assert_eq!(
            r.failure(&["error"], "Failed to fetch stats").as_deref(),
            Some("Failed to fetch stats")
        );
    }

    #[test]
    fn error_field_on_success_status_is_a_failure() {
        let r = reply(200, json!({"error": "Video not found"}));
        assert_eq!(r.failure(&["error"], "x").as_deref(), Some("Video not found"));
    }
}
