use crate::app_config::{AppConfig, Environment, RapidApiCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Upstream credentials are optional: a missing key surfaces per request as a
/// server configuration error rather than failing startup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::IpAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        or_default(var, default)
            .parse::<u16>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let rapidapi = |prefix: &str| -> Option<RapidApiCredentials> {
        let api_key =
            optional(&format!("{prefix}_RAPIDAPI_KEY")).or_else(|| optional("RAPIDAPI_KEY"))?;
        let host =
            optional(&format!("{prefix}_RAPIDAPI_HOST")).or_else(|| optional("RAPIDAPI_HOST"))?;
        Some(RapidApiCredentials { api_key, host })
    };

    let env = parse_environment(&or_default("SOCIALPULSE_ENV", "development"));

    let bind_host = or_default("SOCIALPULSE_BIND_HOST", "0.0.0.0")
        .parse::<IpAddr>()
        .map_err(|e| invalid("SOCIALPULSE_BIND_HOST", e.to_string()))?;
    let port = parse_u16("PORT", "3000")?;
    let port_attempts = parse_u16("SOCIALPULSE_PORT_ATTEMPTS", "10")?;
    if port_attempts == 0 {
        return Err(invalid(
            "SOCIALPULSE_PORT_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }
    let log_level = or_default("SOCIALPULSE_LOG_LEVEL", "info");

    let upstream_timeout_secs = optional("SOCIALPULSE_UPSTREAM_TIMEOUT_SECS")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("SOCIALPULSE_UPSTREAM_TIMEOUT_SECS", e.to_string()))
        })
        .transpose()?;

    let youtube_api_base_url = or_default("YOUTUBE_API_BASE_URL", "https://www.googleapis.com");

    Ok(AppConfig {
        env,
        bind_host,
        port,
        port_attempts,
        log_level,
        upstream_timeout_secs,
        twitter: rapidapi("TWITTER"),
        instagram: rapidapi("INSTAGRAM"),
        youtube_api_key: optional("YOUTUBE_API_KEY"),
        youtube_api_base_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
