pub mod gateway_config;
pub mod loader;

pub use gateway_config::{AppConfig, GeminiConfig};
pub use loader::{CONFIG_FILE, load_config, parse_config_content, resolve_api_key};
