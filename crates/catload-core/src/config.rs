use crate::app_config::{AppConfig, ImageFailurePolicy};
use crate::ConfigError;

/// Default number of product builds allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENT_BUILDS: usize = 8;

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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let graphql_url = require("CATLOAD_GRAPHQL_URL")?;
    let auth_token = require("CATLOAD_AUTH_TOKEN")?;

    let request_timeout_secs = parse_u64("CATLOAD_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CATLOAD_USER_AGENT", "catload/0.1 (catalog-migration)");

    let max_concurrent_builds = parse_usize(
        "CATLOAD_MAX_CONCURRENT_BUILDS",
        &DEFAULT_MAX_CONCURRENT_BUILDS.to_string(),
    )?;
    if max_concurrent_builds == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATLOAD_MAX_CONCURRENT_BUILDS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let image_timeout_secs = parse_u64("CATLOAD_IMAGE_TIMEOUT_SECS", "30")?;
    let image_max_bytes = parse_u64("CATLOAD_IMAGE_MAX_BYTES", "20971520")?;
    let image_failure_policy =
        parse_image_failure_policy(&or_default("CATLOAD_IMAGE_FAILURE_POLICY", "fail"))?;

    Ok(AppConfig {
        graphql_url,
        auth_token,
        request_timeout_secs,
        user_agent,
        max_concurrent_builds,
        image_timeout_secs,
        image_max_bytes,
        image_failure_policy,
    })
}

/// Parse a string into an [`ImageFailurePolicy`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than `fail` or `skip`.
pub fn parse_image_failure_policy(s: &str) -> Result<ImageFailurePolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "fail" => Ok(ImageFailurePolicy::Fail),
        "skip" => Ok(ImageFailurePolicy::Skip),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CATLOAD_IMAGE_FAILURE_POLICY".to_string(),
            reason: format!("expected \"fail\" or \"skip\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
