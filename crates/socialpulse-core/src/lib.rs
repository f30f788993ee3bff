//! Shared configuration, payload types and display helpers for socialpulse.

pub mod app_config;
pub mod config;
pub mod format;
pub mod stats;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, RapidApiCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use format::{format_compact, format_metric};
pub use stats::{
    ErrorResult, InstagramFallback, InstagramOutcome, InstagramProfile, Metric, ProfileStats,
    TweetStats, TwitterStats, VideoStats, ViralityRequest, ViralityScore,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
