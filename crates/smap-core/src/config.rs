use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    // Placeholder values from a template .env (e.g. "your_api_key_here")
    // count as unset so a half-filled file does not produce doomed requests.
    let credential = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty() && !v.contains("your_"))
    };

    let log_level = or_default("SMAP_LOG_LEVEL", "info");
    let platforms_path = PathBuf::from(or_default(
        "SMAP_PLATFORMS_PATH",
        "./config/platforms.yaml",
    ));
    let out_dir = PathBuf::from(or_default("SMAP_OUT_DIR", "./data"));

    let request_timeout_secs = parse_u64("SMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SMAP_USER_AGENT", "smap/0.1 (engagement-analytics)");

    let ma_window = parse_usize("SMAP_MA_WINDOW", "7")?;
    if ma_window == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SMAP_MA_WINDOW".to_string(),
            reason: "window must be at least 1".to_string(),
        });
    }

    let top_overall_n = parse_usize("SMAP_TOP_OVERALL_N", "5")?;
    let top_platform_n = parse_usize("SMAP_TOP_PLATFORM_N", "3")?;

    Ok(AppConfig {
        log_level,
        platforms_path,
        out_dir,
        request_timeout_secs,
        user_agent,
        ma_window,
        top_overall_n,
        top_platform_n,
        twitter_bearer_token: credential("TWITTER_BEARER_TOKEN"),
        youtube_api_key: credential("YOUTUBE_API_KEY"),
        facebook_access_token: credential("FACEBOOK_ACCESS_TOKEN"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
