//! Classification of pasted Twitter/X URLs into a tweet ID or profile handle.

use std::sync::LazyLock;

use regex::Regex;

static TWEET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"status/(\d+)").expect("valid tweet id regex"));
static X_HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"x\.com/([a-zA-Z0-9_]+)").expect("valid x.com handle regex"));
static TWITTER_HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"twitter\.com/([a-zA-Z0-9_]+)").expect("valid twitter.com handle regex")
});

/// What a Twitter/X URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwitterTarget {
    Tweet { id: String },
    Profile { handle: String },
}

/// Why a URL could not be turned into a [`TwitterTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    /// Contains `/status/` but no numeric ID follows.
    InvalidTweetUrl,
    /// Mentions a Twitter/X host but no handle could be read.
    InvalidProfileUrl,
    /// Neither a tweet nor a Twitter/X profile URL.
    Unrecognized,
}

impl TargetError {
    /// Client-facing message for the 400 response.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            TargetError::InvalidTweetUrl => "Invalid Tweet URL",
            TargetError::InvalidProfileUrl => "Invalid Profile URL",
            TargetError::Unrecognized => "Could not determine if URL is tweet or profile",
        }
    }
}

impl std::fmt::Display for TargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for TargetError {}

impl TwitterTarget {
    /// Classifies `url`: a `/status/` segment marks a tweet; otherwise a
    /// `twitter.com` or `x.com` host marks a profile.
    ///
    /// Only substring matching is done; the URL is not parsed or validated.
    ///
    /// # Errors
    ///
    /// Returns the [`TargetError`] describing which extraction failed.
    pub fn parse(url: &str) -> Result<Self, TargetError> {
        if url.contains("/status/") {
            return TWEET_ID_RE
                .captures(url)
                .map(|caps| TwitterTarget::Tweet {
                    id: caps[1].to_string(),
                })
                .ok_or(TargetError::InvalidTweetUrl);
        }

        if url.contains("twitter.com") || url.contains("x.com") {
            return X_HANDLE_RE
                .captures(url)
                .or_else(|| TWITTER_HANDLE_RE.captures(url))
                .map(|caps| TwitterTarget::Profile {
                    handle: caps[1].to_string(),
                })
                .ok_or(TargetError::InvalidProfileUrl);
        }

        Err(TargetError::Unrecognized)
    }
}
