use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Backend root used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Application settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root URL of the finance API, without a trailing slash
    pub api_base_url: String,
    /// Per-request timeout; `None` leaves it to the transport
    pub request_timeout_secs: Option<u64>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Parses settings from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `path`.
///
/// # Errors
/// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("No config file at {:?}; using defaults", path);
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            api_base_url = "https://budget.example.com/api/v1"
            request_timeout_secs = 15
            log_filter = "budget_buddy=debug"
        "#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.api_base_url, "https://budget.example.com/api/v1");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.log_filter, "budget_buddy=debug");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("request_timeout_secs = 5").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.request_timeout_secs, Some(5));
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let result = parse_config("api_base_url = [not toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"http://10.0.0.2:8000/api/v1\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.2:8000/api/v1");
        assert_eq!(config.request_timeout_secs, None);
    }
}
