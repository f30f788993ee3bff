//! Plain-text panels for each dashboard.
//!
//! Rendering is pure: every function takes a decoded proxy result and
//! returns the text to print.

use std::fmt::Write as _;

use chrono::DateTime;
use socialpulse_core::{
    format_metric, InstagramProfile, Metric, ProfileStats, TweetStats, TwitterStats, VideoStats,
    ViralityScore,
};

fn count(metric: Option<&Metric>) -> u64 {
    metric.and_then(Metric::as_u64).unwrap_or(0)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    numerator as f64 / denominator as f64
}

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {label:<12} {value}");
}

/// Engagement line for a tweet: interactions as a share of views, or the
/// raw interaction count when views are unknown.
pub(crate) fn tweet_engagement(tweet: &TweetStats) -> String {
    let interactions = count(Some(&tweet.likes))
        .saturating_add(count(Some(&tweet.retweets)))
        .saturating_add(count(Some(&tweet.replies)));
    match count(Some(&tweet.views)) {
        0 => format!("{interactions} Interactions"),
        views => format!("{:.2}% (of views)", ratio(interactions, views) * 100.0),
    }
}

pub(crate) fn twitter_panel(stats: &TwitterStats) -> String {
    let mut out = String::new();
    match stats {
        TwitterStats::Tweet(tweet) => {
            let _ = writeln!(out, "Tweet by @{}", tweet.author);
            if let Some(text) = tweet.text.as_deref().filter(|t| !t.is_empty()) {
                let _ = writeln!(out, "  \"{text}\"");
            }
            row(&mut out, "Likes", &format_metric(Some(&tweet.likes)));
            row(&mut out, "Retweets", &format_metric(Some(&tweet.retweets)));
            row(&mut out, "Replies", &format_metric(Some(&tweet.replies)));
            row(&mut out, "Views", &format_metric(Some(&tweet.views)));
            row(&mut out, "Engagement", &tweet_engagement(tweet));
        }
        TwitterStats::Profile(ProfileStats {
            username,
            followers,
            following,
            tweets,
            description,
        }) => {
            let _ = writeln!(out, "Profile @{username}");
            if !description.is_empty() {
                let _ = writeln!(out, "  {description}");
            }
            row(&mut out, "Followers", &format_metric(Some(followers)));
            row(&mut out, "Following", &format_metric(Some(following)));
            row(&mut out, "Tweets", &format_metric(Some(tweets)));
            row(&mut out, "Engagement", "N/A (Profile View)");
        }
    }
    out
}

/// Followers per followed account, e.g. `"12.50x"`.
///
/// An unknown or zero following count is treated as 1.
pub(crate) fn follower_ratio(profile: &InstagramProfile) -> String {
    let followers = count(profile.followers.as_ref());
    let following = count(profile.following.as_ref()).max(1);
    format!("{:.2}x", ratio(followers, following))
}

pub(crate) fn instagram_panel(profile: &InstagramProfile) -> String {
    let mut out = String::new();
    let username = profile.username.as_deref().unwrap_or_default();
    let name = profile
        .full_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(username);

    let badge = if profile.is_private == Some(true) {
        " [private]"
    } else {
        ""
    };
    let _ = writeln!(out, "{name} (@{username}){badge}");
    if let Some(bio) = profile.biography.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "  {bio}");
    }
    row(&mut out, "Followers", &format_metric(profile.followers.as_ref()));
    row(&mut out, "Following", &format_metric(profile.following.as_ref()));
    row(&mut out, "Posts", &format_metric(profile.posts.as_ref()));
    row(&mut out, "Ratio", &follower_ratio(profile));
    if let Some(pic) = profile.profile_pic_url.as_deref() {
        row(&mut out, "Picture", pic);
    }
    out
}

/// Likes as a percentage of views. Unknown or zero views count as 1.
pub(crate) fn like_ratio(video: &VideoStats) -> String {
    let views = count(video.view_count.as_ref()).max(1);
    let likes = count(video.like_count.as_ref());
    format!("{:.2}%", ratio(likes, views) * 100.0)
}

/// Renders an RFC 3339 timestamp as a calendar date, or returns it as-is
/// when it does not parse.
pub(crate) fn published_date(published_at: &str) -> String {
    DateTime::parse_from_rfc3339(published_at).map_or_else(
        |_| published_at.to_string(),
        |dt| dt.format("%Y-%m-%d").to_string(),
    )
}

pub(crate) fn youtube_panel(video: &VideoStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", video.title);
    let _ = writeln!(out, "  by {}", video.channel_title);
    row(&mut out, "Published", &published_date(&video.published_at));
    row(&mut out, "Views", &format_metric(video.view_count.as_ref()));
    row(&mut out, "Likes", &format_metric(video.like_count.as_ref()));
    row(&mut out, "Comments", &format_metric(video.comment_count.as_ref()));
    row(&mut out, "Like ratio", &like_ratio(video));
    if let Some(thumb) = video.thumbnail_url.as_deref() {
        row(&mut out, "Thumbnail", thumb);
    }
    out
}

pub(crate) fn score_panel(score: &ViralityScore) -> String {
    let mut out = String::from("Virality\n");
    row(&mut out, "Score", &score.virality_score.to_string());
    row(&mut out, "Category", &score.category);
    row(
        &mut out,
        "Confidence",
        &format!("{:.1}%", score.confidence * 100.0),
    );
    out
}

/// Frames `message` in a box so it stands out from regular output.
pub(crate) fn error_box(message: &str) -> String {
    let width = message
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let border = format!("+{}+", "-".repeat(width + 2));

    let mut out = String::new();
    let _ = writeln!(out, "{border}");
    for line in message.lines() {
        let pad = width - line.chars().count();
        let _ = writeln!(out, "| {line}{} |", " ".repeat(pad));
    }
    let _ = writeln!(out, "{border}");
    out
}

#[cfg(test)]
#[path = "panels_test.rs"]
mod tests;
