//! Shape extractors for Twitter/X scraper payloads.
//!
//! The scraper APIs return either flat REST-style objects or nested GraphQL
//! result trees. Each extractor is a total function from the payload to an
//! optional record; [`extract_stats`] tries them in priority order.

use serde_json::Value;

use socialpulse_core::{Metric, ProfileStats, TweetStats, TwitterStats};

use super::url::TwitterTarget;
use crate::json::{at, first_at, has_any, metric, string};

type TweetExtractor = fn(&Value, &str) -> Option<TweetStats>;
type ProfileExtractor = fn(&Value, &str) -> Option<ProfileStats>;

/// Tweet shapes, highest priority first.
const TWEET_EXTRACTORS: &[TweetExtractor] = &[flat_tweet, graphql_tweet];

/// Profile shapes, highest priority first.
const PROFILE_EXTRACTORS: &[ProfileExtractor] = &[flat_profile, graphql_profile];

/// Normalizes `payload` for `target`, or `None` when no known shape matches.
#[must_use]
pub fn extract_stats(target: &TwitterTarget, payload: &Value) -> Option<TwitterStats> {
    match target {
        TwitterTarget::Tweet { id } => TWEET_EXTRACTORS
            .iter()
            .find_map(|extract| extract(payload, id))
            .map(TwitterStats::Tweet),
        TwitterTarget::Profile { handle } => PROFILE_EXTRACTORS
            .iter()
            .find_map(|extract| extract(payload, handle))
            .map(TwitterStats::Profile),
    }
}

/// Flat tweet: `{likes | favorite_count, retweets | retweet_count, ...}`.
pub(crate) fn flat_tweet(payload: &Value, requested_id: &str) -> Option<TweetStats> {
    if !has_any(payload, &[&["likes"], &["favorite_count"]]) {
        return None;
    }

    Some(TweetStats {
        id: requested_id.to_string(),
        likes: metric(payload, &[&["likes"], &["favorite_count"]]).unwrap_or_else(Metric::zero),
        retweets: metric(payload, &[&["retweets"], &["retweet_count"]])
            .unwrap_or_else(Metric::zero),
        replies: metric(payload, &[&["replies"], &["reply_count"]]).unwrap_or_else(Metric::zero),
        views: metric(payload, &[&["views"], &["view_count"]])
            .unwrap_or_else(Metric::not_available),
        text: string(payload, &[&["text"], &["full_text"]]),
        author: string(payload, &[&["user", "screen_name"]])
            .unwrap_or_else(|| "Unknown".to_string()),
    })
}

/// GraphQL `TweetDetail`: `{data: {tweetResult: {result: {legacy, core, views}}}}`,
/// with or without the outer `data` wrapper.
pub(crate) fn graphql_tweet(payload: &Value, requested_id: &str) -> Option<TweetStats> {
    let result = first_at(
        payload,
        &[&["data", "tweetResult", "result"], &["tweetResult", "result"]],
    )?;
    let legacy = at(result, &["legacy"]).filter(|v| v.is_object())?;

    Some(TweetStats {
        id: string(legacy, &[&["id_str"]]).unwrap_or_else(|| requested_id.to_string()),
        likes: metric(legacy, &[&["favorite_count"]]).unwrap_or_else(Metric::zero),
        retweets: metric(legacy, &[&["retweet_count"]]).unwrap_or_else(Metric::zero),
        replies: metric(legacy, &[&["reply_count"]]).unwrap_or_else(Metric::zero),
        views: metric(result, &[&["views", "count"]]).unwrap_or_else(Metric::not_available),
        text: string(legacy, &[&["full_text"]]),
        author: string(
            result,
            &[&["core", "user_results", "result", "legacy", "screen_name"]],
        )
        .unwrap_or_else(|| "Unknown".to_string()),
    })
}

/// Flat profile: `{followers_count | sub_count, friends_count, statuses_count, ...}`.
pub(crate) fn flat_profile(payload: &Value, requested_handle: &str) -> Option<ProfileStats> {
    if !has_any(payload, &[&["followers_count"], &["sub_count"]]) {
        return None;
    }

    Some(ProfileStats {
        username: string(payload, &[&["screen_name"]])
            .unwrap_or_else(|| requested_handle.to_string()),
        followers: metric(payload, &[&["followers_count"], &["sub_count"]])
            .unwrap_or_else(Metric::zero),
        following: metric(payload, &[&["friends_count"]]).unwrap_or_else(Metric::zero),
        tweets: metric(payload, &[&["statuses_count"]]).unwrap_or_else(Metric::zero),
        description: string(payload, &[&["description"]]).unwrap_or_default(),
    })
}

/// GraphQL `UserByScreenName`: `{data: {user: {result: {legacy}}}}`, with or
/// without the outer `data` wrapper.
pub(crate) fn graphql_profile(payload: &Value, requested_handle: &str) -> Option<ProfileStats> {
    let result = first_at(payload, &[&["data", "user", "result"], &["user", "result"]])?;
    let legacy = at(result, &["legacy"]).filter(|v| v.is_object())?;

    Some(ProfileStats {
        username: string(legacy, &[&["screen_name"]])
            .unwrap_or_else(|| requested_handle.to_string()),
        followers: metric(legacy, &[&["followers_count"]]).unwrap_or_else(Metric::zero),
        following: metric(legacy, &[&["friends_count"]]).unwrap_or_else(Metric::zero),
        tweets: metric(legacy, &[&["statuses_count"]]).unwrap_or_else(Metric::zero),
        description: string(legacy, &[&["description"]]).unwrap_or_default(),
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
