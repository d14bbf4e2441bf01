use super::AppConfig;
use std::path::PathBuf;
use tracing::debug;

/// Names an alternative settings file.
pub const CONFIG_PATH_VAR: &str = "BUDGET_BUDDY_CONFIG";

/// Overrides `api_base_url`.
pub const API_URL_VAR: &str = "BUDGET_BUDDY_API_URL";

/// Settings file location, honoring [`CONFIG_PATH_VAR`].
pub fn config_path(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup(CONFIG_PATH_VAR)
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| PathBuf::from("config.toml"), PathBuf::from)
}

/// Applies environment overrides on top of file settings.
#[must_use]
pub fn apply_overrides(mut config: AppConfig, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    if let Some(url) = lookup(API_URL_VAR).filter(|u| !u.trim().is_empty()) {
        debug!("{} overrides api_base_url", API_URL_VAR);
        config.api_base_url = url.trim().trim_end_matches('/').to_string();
    }
    config
}
