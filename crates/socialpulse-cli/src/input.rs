//! Normalization of what the user typed before it is sent to the proxy.

use std::sync::LazyLock;

use regex::Regex;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("valid video id regex")
});

static INSTAGRAM_PROFILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"instagram\.com/([a-zA-Z0-9_.]+)").expect("valid instagram profile regex")
});

const VIDEO_ID_LEN: usize = 11;

/// Pulls the video ID out of a `YouTube` URL, or accepts a bare ID as typed.
///
/// Returns `None` for empty input and for URLs that carry no 11-character ID.
pub(crate) fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(id) = VIDEO_ID_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| id.len() == VIDEO_ID_LEN)
    {
        return Some(id.to_string());
    }

    if input.contains("://") || input.contains("youtu") {
        None
    } else {
        Some(input.to_string())
    }
}

/// Reduces a pasted profile URL or `@handle` to a bare username.
pub(crate) fn clean_instagram_input(input: &str) -> String {
    let input = input.trim();
    let username = if input.contains("instagram.com/") {
        INSTAGRAM_PROFILE_RE
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map_or(input, |m| m.as_str())
    } else {
        input
    };
    username.replacen('@', "", 1)
}
