//! Per-platform collection settings, loaded from `config/platforms.yaml`.
//!
//! Search queries, result limits, and page lists are deployment-tunable
//! data, not code, so they live in a YAML file next to the credentials'
//! `.env`. Every section is optional in the file; missing sections fall
//! back to the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterSettings {
    pub search_query: String,
    pub max_results: u32,
}

impl Default for TwitterSettings {
    fn default() -> Self {
        Self {
            search_query: "#datascience OR #machinelearning OR #ai".to_string(),
            max_results: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeSettings {
    pub search_query: String,
    pub max_results: u32,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            search_query: "data science OR machine learning".to_string(),
            max_results: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacebookSettings {
    pub page_ids: Vec<String>,
    pub limit: u32,
}

impl Default for FacebookSettings {
    fn default() -> Self {
        Self {
            page_ids: vec![
                "company_page_1".to_string(),
                "company_page_2".to_string(),
                "company_page_3".to_string(),
            ],
            limit: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSettings {
    #[serde(default)]
    pub twitter: TwitterSettings,
    #[serde(default)]
    pub youtube: YoutubeSettings,
    #[serde(default)]
    pub facebook: FacebookSettings,
}

/// Load and validate platform settings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_platform_settings(path: &Path) -> Result<PlatformSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let settings: PlatformSettings = serde_yaml::from_str(&content)?;
    validate_settings(&settings)?;

    Ok(settings)
}

fn validate_settings(settings: &PlatformSettings) -> Result<(), ConfigError> {
    if settings.twitter.search_query.trim().is_empty() {
        return Err(ConfigError::Validation(
            "twitter.search_query must be non-empty".to_string(),
        ));
    }
    if settings.youtube.search_query.trim().is_empty() {
        return Err(ConfigError::Validation(
            "youtube.search_query must be non-empty".to_string(),
        ));
    }
    // Twitter's recent-search endpoint caps max_results at 100.
    if settings.twitter.max_results == 0 || settings.twitter.max_results > 100 {
        return Err(ConfigError::Validation(
            "twitter.max_results must be in 1..=100".to_string(),
        ));
    }
    if settings.youtube.max_results == 0 || settings.youtube.max_results > 50 {
        return Err(ConfigError::Validation(
            "youtube.max_results must be in 1..=50".to_string(),
        ));
    }
    if settings.facebook.page_ids.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "facebook.page_ids must not contain empty ids".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = "twitter:\n  search_query: \"#rustlang\"\n  max_results: 25\n";
        let settings: PlatformSettings = serde_yaml::from_str(yaml).expect("should parse");

        assert_eq!(settings.twitter.search_query, "#rustlang");
        assert_eq!(settings.twitter.max_results, 25);
        assert_eq!(settings.youtube.max_results, 50);
        assert_eq!(settings.facebook.limit, 15);
    }

    #[test]
    fn empty_search_query_is_rejected() {
        let mut settings = PlatformSettings::default();
        settings.twitter.search_query = "  ".to_string();
        let err = validate_settings(&settings).expect_err("should reject");
        assert!(err.to_string().contains("twitter.search_query"), "got: {err}");
    }

    #[test]
    fn oversized_twitter_max_results_is_rejected() {
        let mut settings = PlatformSettings::default();
        settings.twitter.max_results = 500;
        let err = validate_settings(&settings).expect_err("should reject");
        assert!(err.to_string().contains("1..=100"), "got: {err}");
    }
}
