//! Configuration management for the client.
//!
//! Settings come from `config.toml` (optional) and are then overridden by
//! environment variables, which may themselves come from a `.env` file.

/// Environment variable names and overrides
pub mod env;

/// `config.toml` settings
pub mod settings;

pub use settings::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_LOG_FILTER, load_config};

use crate::errors::Result;
use tracing::{debug, info};

/// Loads `config.toml` (or the file named by `BUDGET_BUDDY_CONFIG`) and applies
/// environment overrides.
///
/// A missing file is not an error; every setting has a default.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = env::config_path(|name| std::env::var(name).ok());
    debug!("Loading configuration from {:?}", path);
    let config = load_config(&path)?;
    let config = env::apply_overrides(config, |name| std::env::var(name).ok());
    info!("Using API at {}", config.api_base_url);
    Ok(config)
}
