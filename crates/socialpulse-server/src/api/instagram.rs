use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use socialpulse_core::InstagramOutcome;
use socialpulse_upstream::instagram::extract_outcome;

use super::{map_rapidapi_error, required, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct InstagramQuery {
    pub username: Option<String>,
}

/// `GET /instagram?username=` -> normalized profile, or the raw payload with
/// a warning when its shape is not recognized.
pub(super) async fn instagram_stats(
    State(state): State<AppState>,
    query: Result<Query<InstagramQuery>, QueryRejection>,
) -> Result<Json<InstagramOutcome>, ApiError> {
    let Query(query) = query?;
    let username =
        required(query.username).ok_or_else(|| ApiError::bad_request("Username is required"))?;

    let client = state
        .instagram
        .as_ref()
        .ok_or_else(|| ApiError::internal("Server API key not configured"))?;

    tracing::info!(username = %username, "fetching instagram stats");

    let payload = client
        .fetch_profile(&username)
        .await
        .map_err(|e| map_rapidapi_error(&e, true))?;

    let outcome = extract_outcome(payload);
    if let InstagramOutcome::Fallback(fallback) = &outcome {
        tracing::warn!(
            username = %username,
            raw = %fallback.raw,
            "could not parse instagram stats; returning raw payload"
        );
    }
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use socialpulse_upstream::InstagramClient;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::{credentials, get_json};
    use super::super::{build_app, AppState};

    async fn app_with_payload(
        status: u16,
        payload: serde_json::Value,
    ) -> (MockServer, axum::Router) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ig/info_username/"))
            .and(query_param("user", "natgeo"))
            .respond_with(ResponseTemplate::new(status).set_body_json(payload))
            .expect(1)
            .mount(&server)
            .await;

        let client = InstagramClient::with_base_url(&credentials(), None, &server.uri())
            .expect("client construction should not fail");
        let app = build_app(AppState {
            instagram: Some(client),
            ..AppState::default()
        });
        (server, app)
    }

    #[tokio::test]
    async fn missing_username_is_bad_request() {
        let (status, body) = get_json(build_app(AppState::default()), "/instagram").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username is required");
    }

    #[tokio::test]
    async fn missing_credentials_is_server_error() {
        let (status, body) =
            get_json(build_app(AppState::default()), "/instagram?username=natgeo").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server API key not configured");
    }

    #[tokio::test]
    async fn user_object_payload_is_normalized() {
        let (_server, app) = app_with_payload(
            200,
            json!({"user": {"username": "a", "follower_count": 10}}),
        )
        .await;

        let (status, body) = get_json(app, "/instagram?username=natgeo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "username": "a",
                "full_name": null,
                "biography": null,
                "followers": 10,
                "following": null,
                "posts": null,
                "is_private": null,
                "profile_pic_url": null
            })
        );
    }

    #[tokio::test]
    async fn graphql_payload_reports_edge_follower_count() {
        let (_server, app) =
            app_with_payload(200, json!({"data": {"user": {"edge_followed_by": {"count": 10}}}}))
                .await;

        let (status, body) = get_json(app, "/instagram?username=natgeo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["followers"], 10);
    }

    #[tokio::test]
    async fn unknown_shape_is_ok_with_warning_and_raw() {
        let raw = json!({"status": "ok", "items": [1, 2]});
        let (_server, app) = app_with_payload(200, raw.clone()).await;

        let (status, body) = get_json(app, "/instagram?username=natgeo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["warning"],
            "Could not parse standard stats. Raw response below."
        );
        assert_eq!(body["raw"], raw);
    }

    #[tokio::test]
    async fn upstream_error_carries_message_and_details() {
        let (_server, app) =
            app_with_payload(401, json!({"message": "Invalid API key."})).await;

        let (status, body) = get_json(app, "/instagram?username=natgeo").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "API request failed");
        assert_eq!(body["message"], "Invalid API key.");
        assert_eq!(body["details"]["message"], "Invalid API key.");
    }
}
