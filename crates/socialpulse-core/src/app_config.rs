use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Key and host pair for a RapidAPI-hosted scraper.
///
/// Only constructed when both values are configured; a half-configured
/// service is treated as unconfigured.
#[derive(Clone, PartialEq, Eq)]
pub struct RapidApiCredentials {
    pub api_key: String,
    pub host: String,
}

impl std::fmt::Debug for RapidApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RapidApiCredentials")
            .field("api_key", &"[redacted]")
            .field("host", &self.host)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_host: IpAddr,
    pub port: u16,
    pub port_attempts: u16,
    pub log_level: String,
    pub upstream_timeout_secs: Option<u64>,
    pub twitter: Option<RapidApiCredentials>,
    pub instagram: Option<RapidApiCredentials>,
    pub youtube_api_key: Option<String>,
    pub youtube_api_base_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_host", &self.bind_host)
            .field("port", &self.port)
            .field("port_attempts", &self.port_attempts)
            .field("log_level", &self.log_level)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("twitter", &self.twitter)
            .field("instagram", &self.instagram)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_api_base_url", &self.youtube_api_base_url)
            .finish()
    }
}
