use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use socialpulse_core::TwitterStats;
use socialpulse_upstream::twitter::{extract_stats, TwitterTarget};

use super::{map_rapidapi_error, required, ApiError, AppState};

const UNKNOWN_FORMAT_ERROR: &str = "Unknown API response format. Check server logs for raw data.";
const UNKNOWN_FORMAT_DETAILS: &str = "The API returned data, but we could not find the stats in \
     the expected structure. See terminal for full JSON.";

#[derive(Debug, Deserialize)]
pub(super) struct TwitterQuery {
    pub url: Option<String>,
}

/// `GET /twitter?url=` -> tweet or profile stats for a Twitter/X URL.
pub(super) async fn twitter_stats(
    State(state): State<AppState>,
    query: Result<Query<TwitterQuery>, QueryRejection>,
) -> Result<Json<TwitterStats>, ApiError> {
    let Query(query) = query?;
    let url = required(query.url).ok_or_else(|| ApiError::bad_request("URL is required"))?;

    let client = state
        .twitter
        .as_ref()
        .ok_or_else(|| ApiError::internal("Server API key not configured"))?;

    let target = TwitterTarget::parse(&url).map_err(|e| {
        tracing::debug!(url = %url, reason = %e, "rejected twitter url");
        ApiError::bad_request(e.message())
    })?;

    let payload = client
        .fetch(&target)
        .await
        .map_err(|e| map_rapidapi_error(&e, false))?;

    match extract_stats(&target, &payload) {
        Some(stats) => Ok(Json(stats)),
        None => {
            tracing::error!(
                ?target,
                raw = %payload,
                "failed to parse twitter API response"
            );
            Err(ApiError::internal(UNKNOWN_FORMAT_ERROR).with_details(UNKNOWN_FORMAT_DETAILS))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use socialpulse_upstream::TwitterClient;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::{credentials, get_json};
    use super::super::{build_app, AppState};

    async fn app_with_mock(server: &MockServer) -> axum::Router {
        let client = TwitterClient::with_base_url(&credentials(), None, &server.uri())
            .expect("client construction should not fail");
        build_app(AppState {
            twitter: Some(client),
            ..AppState::default()
        })
    }

    #[tokio::test]
    async fn missing_url_is_bad_request() {
        let (status, body) = get_json(build_app(AppState::default()), "/twitter").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "URL is required");

        let (status, _) = get_json(build_app(AppState::default()), "/twitter?url=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn repeated_query_key_is_bad_request_json() {
        let (status, body) =
            get_json(build_app(AppState::default()), "/twitter?url=a&url=b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn missing_credentials_is_server_error() {
        let (status, body) = get_json(
            build_app(AppState::default()),
            "/twitter?url=https%3A%2F%2Fx.com%2Frustlang",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server API key not configured");
    }

    #[tokio::test]
    async fn unrecognized_url_is_bad_request() {
        let server = MockServer::start().await;
        let (status, body) = get_json(
            app_with_mock(&server).await,
            "/twitter?url=https%3A%2F%2Fexample.org%2Fsomeone",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Could not determine if URL is tweet or profile");
    }

    #[tokio::test]
    async fn tweet_url_returns_tweet_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tweet.php"))
            .and(query_param("id", "1790000000000000001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "favorite_count": 250,
                "retweet_count": 20,
                "reply_count": 4,
                "view_count": 10000,
                "full_text": "shipping it",
                "user": {"screen_name": "rustlang"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get_json(
            app_with_mock(&server).await,
            "/twitter?url=https%3A%2F%2Fx.com%2Frustlang%2Fstatus%2F1790000000000000001",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "type": "tweet",
                "id": "1790000000000000001",
                "likes": 250,
                "retweets": 20,
                "replies": 4,
                "views": 10000,
                "text": "shipping it",
                "author": "rustlang"
            })
        );
    }

    #[tokio::test]
    async fn profile_url_returns_profile_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/screenname.php"))
            .and(query_param("screenname", "rustlang"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"user": {"result": {"legacy": {
                    "screen_name": "rustlang",
                    "followers_count": 150_000,
                    "friends_count": 10,
                    "statuses_count": 4_000,
                    "description": "Empowering everyone"
                }}}}
            })))
            .mount(&server)
            .await;

        let (status, body) = get_json(
            app_with_mock(&server).await,
            "/twitter?url=https%3A%2F%2Fx.com%2Frustlang",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "profile");
        assert_eq!(body["username"], "rustlang");
        assert_eq!(body["followers"], 150_000);
        assert_eq!(body["tweets"], 4_000);
    }

    #[tokio::test]
    async fn unknown_payload_shape_is_diagnostic_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/screenname.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
            .mount(&server)
            .await;

        let (status, body) = get_json(
            app_with_mock(&server).await,
            "/twitter?url=https%3A%2F%2Ftwitter.com%2Fjack",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Unknown API response format. Check server logs for raw data."
        );
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn upstream_status_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tweet.php"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"message": "Too many requests"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get_json(
            app_with_mock(&server).await,
            "/twitter?url=https%3A%2F%2Fx.com%2Fa%2Fstatus%2F9",
        )
        .await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "API request failed");
        assert_eq!(body["details"]["message"], "Too many requests");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_internal_error() {
        let client = TwitterClient::with_base_url(&credentials(), Some(2), "http://127.0.0.1:9")
            .expect("client construction should not fail");
        let app = build_app(AppState {
            twitter: Some(client),
            ..AppState::default()
        });

        let (status, body) = get_json(app, "/twitter?url=https%3A%2F%2Fx.com%2Fa").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert!(body["details"].is_string());
    }
}
