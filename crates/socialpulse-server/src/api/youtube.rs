use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use socialpulse_core::VideoStats;
use socialpulse_upstream::{youtube::api_error_message, UpstreamError};

use super::{required, ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VideoStatsQuery {
    pub video_id: Option<String>,
}

/// `GET /api/video-stats?videoId=` -> title, channel and statistics for one video.
pub(super) async fn video_stats(
    State(state): State<AppState>,
    query: Result<Query<VideoStatsQuery>, QueryRejection>,
) -> Result<Json<VideoStats>, ApiError> {
    let Query(query) = query?;
    let video_id =
        required(query.video_id).ok_or_else(|| ApiError::bad_request("Video ID is required"))?;

    let client = state
        .youtube
        .as_ref()
        .ok_or_else(|| ApiError::internal("Server configuration error: API Key missing"))?;

    match client.fetch_video(&video_id).await {
        Ok(Some(stats)) => Ok(Json(stats)),
        Ok(None) => Err(ApiError::new(StatusCode::NOT_FOUND, "Video not found")),
        Err(e) => {
            tracing::error!(error = %e, video_id = %video_id, "error fetching video stats");
            let message = match &e {
                UpstreamError::Status { body, .. } => api_error_message(body)
                    .unwrap_or_else(|| "Failed to fetch data from YouTube API".to_string()),
                other => other.to_string(),
            };
            Err(ApiError::internal(message))
        }
    }
}
