//! Request/response payloads shared by the proxy server and the dashboard.
//!
//! Field names follow the JSON wire format the dashboards consume, so a few
//! types mix `snake_case` and `camelCase` on purpose.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An upstream count passed through verbatim.
///
/// Upstreams disagree on whether counts are JSON numbers or strings
/// (`"viewCount": "1234"`), so both are kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(serde_json::Number),
    Text(String),
}

impl Metric {
    #[must_use]
    pub fn zero() -> Self {
        Metric::Number(0.into())
    }

    #[must_use]
    pub fn not_available() -> Self {
        Metric::Text("N/A".to_string())
    }

    /// Builds a metric from a JSON number or string. Anything else
    /// (`null`, booleans, objects) is not a metric.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Metric::Number(n.clone())),
            Value::String(s) => Some(Metric::Text(s.clone())),
            _ => None,
        }
    }

    /// Reads the metric as a non-negative integer.
    ///
    /// Fractional numbers are truncated. Strings must be plain digits;
    /// `"N/A"` and `"1.2K"` yield `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Metric::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            }),
            Metric::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                trimmed.parse().ok()
            }
        }
    }
}

impl From<u64> for Metric {
    fn from(value: u64) -> Self {
        Metric::Number(value.into())
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Number(n) => write!(f, "{n}"),
            Metric::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetStats {
    pub id: String,
    pub likes: Metric,
    pub retweets: Metric,
    pub replies: Metric,
    pub views: Metric,
    pub text: Option<String>,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub username: String,
    pub followers: Metric,
    pub following: Metric,
    pub tweets: Metric,
    pub description: String,
}

/// Normalized Twitter/X result, tagged on the wire as
/// `{"type": "tweet", ...}` or `{"type": "profile", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TwitterStats {
    Tweet(TweetStats),
    Profile(ProfileStats),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstagramProfile {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub biography: Option<String>,
    pub followers: Option<Metric>,
    pub following: Option<Metric>,
    pub posts: Option<Metric>,
    pub is_private: Option<bool>,
    pub profile_pic_url: Option<String>,
}

/// Returned with HTTP 200 when the Instagram payload matched no known shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstagramFallback {
    pub warning: String,
    pub raw: Value,
}

/// Either a normalized profile or the raw-payload fallback.
///
/// `Fallback` is listed first: every `InstagramProfile` field is optional, so
/// the profile variant would otherwise swallow fallback bodies on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstagramOutcome {
    Fallback(InstagramFallback),
    Profile(InstagramProfile),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStats {
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: Option<String>,
    pub published_at: String,
    pub view_count: Option<Metric>,
    pub like_count: Option<Metric>,
    pub comment_count: Option<Metric>,
}

/// Error body returned by every proxy route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResult {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Input to the external virality scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViralityRequest {
    pub followers: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralityScore {
    pub virality_score: f64,
    pub category: String,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn metric_round_trips_strings_and_numbers_verbatim() {
        let text: Metric = serde_json::from_value(json!("1234")).unwrap();
        assert_eq!(text, Metric::Text("1234".to_string()));
        assert_eq!(serde_json::to_value(&text).unwrap(), json!("1234"));

        let number: Metric = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(serde_json::to_value(&number).unwrap(), json!(42));
    }

    #[test]
    fn metric_as_u64_reads_digit_strings_only() {
        assert_eq!(Metric::Text("987".to_string()).as_u64(), Some(987));
        assert_eq!(Metric::Text(" 12 ".to_string()).as_u64(), Some(12));
        assert_eq!(Metric::not_available().as_u64(), None);
        assert_eq!(Metric::Text("1.2K".to_string()).as_u64(), None);
        assert_eq!(Metric::from(7).as_u64(), Some(7));
        assert_eq!(Metric::Number(serde_json::Number::from(-3)).as_u64(), None);
    }

    #[test]
    fn metric_as_u64_truncates_fractional_numbers() {
        let metric: Metric = serde_json::from_str("12345.6").unwrap();
        assert_eq!(metric.as_u64(), Some(12_345));

        let negative: Metric = serde_json::from_str("-0.5").unwrap();
        assert_eq!(negative.as_u64(), None);
    }

    #[test]
    fn metric_from_value_rejects_non_scalars() {
        assert!(Metric::from_value(&Value::Null).is_none());
        assert!(Metric::from_value(&json!(true)).is_none());
        assert!(Metric::from_value(&json!({"count": 1})).is_none());
    }

    #[test]
    fn twitter_stats_serializes_with_type_tag() {
        let stats = TwitterStats::Profile(ProfileStats {
            username: "rustlang".to_string(),
            followers: Metric::from(10),
            following: Metric::zero(),
            tweets: Metric::from(3),
            description: String::new(),
        });
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["type"], "profile");
        assert_eq!(value["username"], "rustlang");
        assert_eq!(value["followers"], 10);
    }

    #[test]
    fn instagram_outcome_prefers_fallback_when_warning_present() {
        let body = json!({"warning": "could not parse", "raw": {"x": 1}});
        let outcome: InstagramOutcome = serde_json::from_value(body).unwrap();
        assert!(matches!(outcome, InstagramOutcome::Fallback(_)));

        let body = json!({"username": "a", "followers": 10});
        let outcome: InstagramOutcome = serde_json::from_value(body).unwrap();
        match outcome {
            InstagramOutcome::Profile(p) => assert_eq!(p.username.as_deref(), Some("a")),
            InstagramOutcome::Fallback(_) => panic!("expected profile"),
        }
    }

    #[test]
    fn video_stats_uses_camel_case_fields() {
        let stats = VideoStats {
            title: "t".to_string(),
            channel_title: "c".to_string(),
            thumbnail_url: None,
            published_at: "2024-01-01T00:00:00Z".to_string(),
            view_count: Some(Metric::Text("5".to_string())),
            like_count: None,
            comment_count: None,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["channelTitle"], "c");
        assert_eq!(value["viewCount"], "5");
        assert!(value["likeCount"].is_null());
    }

    #[test]
    fn error_result_omits_empty_optional_fields() {
        let value = serde_json::to_value(ErrorResult::new("URL is required")).unwrap();
        assert_eq!(value, json!({"error": "URL is required"}));
    }
}
