use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
pub const DEFAULT_SNAPSHOT_DIR: &str = "./snapshots";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Largest `maxResults` the comment thread endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Checks a log filter of the form `level` or `target=level`, comma separated.
///
/// Bare words must be levels; tracing would read anything else as a target
/// name and filter out every event.
///
/// # Errors
///
/// Returns the reason the filter was rejected.
pub fn validate_log_filter(filter: &str) -> Result<(), String> {
    if filter.trim().is_empty() {
        return Err("log filter is empty".to_owned());
    }
    for directive in filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let level = match directive.rsplit_once('=') {
            Some((target, _)) if target.trim().is_empty() => {
                return Err(format!("directive \"{directive}\" has no target"));
            }
            Some((_, level)) => level.trim(),
            None => directive,
        };
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "unknown log level \"{level}\", expected one of {}",
                LOG_LEVELS.join(", ")
            ));
        }
    }
    Ok(())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(var, format!("expected a boolean, got \"{raw}\""))),
        }
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?;
    let api_base_url = or_default("YTC_API_BASE_URL", DEFAULT_API_BASE_URL);
    let snapshot_dir = PathBuf::from(or_default("YTC_SNAPSHOT_DIR", DEFAULT_SNAPSHOT_DIR));
    let log_level = or_default("YTC_LOG_LEVEL", DEFAULT_LOG_LEVEL);
    validate_log_filter(&log_level).map_err(|reason| invalid("YTC_LOG_LEVEL", reason))?;
    let request_timeout_secs = parse_u64("YTC_REQUEST_TIMEOUT_SECS", "30")?;

    let page_size = parse_u32("YTC_PAGE_SIZE", "100")?;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(invalid(
            "YTC_PAGE_SIZE",
            format!("must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
        ));
    }

    let max_retries = parse_u32("YTC_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("YTC_RETRY_BACKOFF_BASE_MS", "1000")?;
    let include_replies = parse_bool("YTC_INCLUDE_REPLIES", "false")?;

    Ok(AppConfig {
        youtube_api_key,
        api_base_url,
        snapshot_dir,
        log_level,
        request_timeout_secs,
        page_size,
        max_retries,
        retry_backoff_base_ms,
        include_replies,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
