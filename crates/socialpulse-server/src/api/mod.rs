mod instagram;
mod twitter;
mod youtube;

use axum::{
    extract::rejection::QueryRejection,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use socialpulse_core::{AppConfig, ErrorResult};
use socialpulse_upstream::{InstagramClient, TwitterClient, UpstreamError, YouTubeClient};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{log_request, request_id};

/// Upstream clients, one per configured service.
///
/// A `None` client means the service has no credentials; its route answers
/// with a server configuration error instead of calling out.
#[derive(Clone, Default)]
pub struct AppState {
    pub twitter: Option<TwitterClient>,
    pub instagram: Option<InstagramClient>,
    pub youtube: Option<YouTubeClient>,
}

impl AppState {
    /// Builds clients for every service that has credentials in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured client cannot be constructed
    /// (malformed host or base URL, TLS backend failure).
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let timeout = config.upstream_timeout_secs;

        let twitter = config
            .twitter
            .as_ref()
            .map(|creds| TwitterClient::new(creds, timeout))
            .transpose()?;
        let instagram = config
            .instagram
            .as_ref()
            .map(|creds| InstagramClient::new(creds, timeout))
            .transpose()?;
        let youtube = config
            .youtube_api_key
            .as_deref()
            .map(|key| YouTubeClient::new(key, &config.youtube_api_base_url, timeout))
            .transpose()?;

        for (service, configured) in [
            ("twitter", twitter.is_some()),
            ("instagram", instagram.is_some()),
            ("youtube", youtube.is_some()),
        ] {
            if !configured {
                tracing::warn!(service, "credentials not configured; route will return 500");
            }
        }

        Ok(Self {
            twitter,
            instagram,
            youtube,
        })
    }
}

/// Error response: an HTTP status plus an [`ErrorResult`] body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResult,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResult::new(error),
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body = self.body.with_message(message);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<serde_json::Value>) -> Self {
        self.body = self.body.with_details(details);
        self
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Treats an absent or empty query parameter as missing.
pub(super) fn required(param: Option<String>) -> Option<String> {
    param.filter(|value| !value.is_empty())
}

/// Maps a RapidAPI client failure onto the proxy response.
///
/// Upstream HTTP errors keep their status and body; transport failures
/// become a 500. With `with_message`, the upstream `message` field (or the
/// status reason) is surfaced as `message` too.
pub(super) fn map_rapidapi_error(error: &UpstreamError, with_message: bool) -> ApiError {
    match error {
        UpstreamError::Status { status, body } => {
            tracing::error!(status, body = %body, "upstream API request failed");
            let status =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let mut api_error = ApiError::new(status, "API request failed");
            if with_message {
                let message = body
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .map(ToOwned::to_owned)
                    .or_else(|| status.canonical_reason().map(ToOwned::to_owned))
                    .unwrap_or_default();
                api_error = api_error.with_message(message);
            }
            api_error.with_details(body.clone())
        }
        other => {
            tracing::error!(error = %other, "upstream API call failed");
            ApiError::internal("Internal Server Error").with_details(other.to_string())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/twitter", get(twitter::twitter_stats))
        .route("/instagram", get(instagram::instagram_stats))
        .route("/api/video-stats", get(youtube::video_stats))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn(log_request)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "Server is running")
}
