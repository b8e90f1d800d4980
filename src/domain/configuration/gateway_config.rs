//! Generative AI gateway configuration models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Placeholder shipped in sample config files; never treated as a real key.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Configuration loaded from `trekplan.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Gemini API configuration.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.gemini.validate()
    }
}

/// Gemini API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Base URL of the REST API, up to and excluding `/models`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Model used for text and structured generation.
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Model used for image generation.
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Local fallback key, used only when no environment key is set.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

impl GeminiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.text_model.trim().is_empty() {
            return Err(AppError::InvalidConfig("text_model must not be empty".to_string()));
        }
        if self.image_model.trim().is_empty() {
            return Err(AppError::InvalidConfig("image_model must not be empty".to_string()));
        }
        Ok(())
    }

    /// The configured key, unless blank or still the placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != API_KEY_PLACEHOLDER)
    }
}

fn default_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("Default API URL must be valid")
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "imagen-4.0-generate-001".to_string()
}

fn default_timeout() -> u64 {
    60
}
