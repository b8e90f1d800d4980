//! Configuration loading and credential resolution.

use std::fs;
use std::path::Path;

use crate::domain::{AppConfig, AppError};

/// Config file looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "trekplan.toml";

/// Environment variables checked for an API key, in priority order.
const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Load configuration.
///
/// An explicit path must exist. Without one, `trekplan.toml` in the working
/// directory is used when present and defaults apply otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (Path::new(CONFIG_FILE).to_path_buf(), false),
    };

    if !path.exists() {
        if required {
            return Err(AppError::InvalidConfig(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        log::debug!("No {} found, using defaults", CONFIG_FILE);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Resolve the API key: environment first, then the config file fallback.
pub fn resolve_api_key(config: &AppConfig) -> Option<String> {
    for var in API_KEY_VARS {
        if let Ok(value) = std::env::var(var)
            && !value.trim().is_empty()
        {
            return Some(value.trim().to_string());
        }
    }
    config.gemini.usable_api_key().map(ToOwned::to_owned)
}
