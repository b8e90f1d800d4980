use std::io;

use thiserror::Error;

/// Message surfaced when no usable AI credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API key not found. Please select a key or configure one.";

/// Library-wide error type for trekplan operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// No API key is available for the AI gateway.
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    /// The AI gateway rejected or failed a request.
    #[error("{message}")]
    GatewayError { message: String, status: Option<u16> },

    /// A structured gateway response did not match the expected shape.
    #[error("Could not read the {stage} response: {details}")]
    StructuredDecode { stage: String, details: String },

    /// Configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// User input rejected before any generation starts.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Trip identifier does not exist in the catalog.
    #[error("Trip '{0}' not found in the catalog")]
    UnknownTrip(String),

    /// Difficulty label is not one of the known levels.
    #[error("Invalid difficulty '{0}': must be one of Beginner, Intermediate, Advanced, Expert")]
    InvalidDifficulty(String),

    /// Sort key label is not recognized.
    #[error(
        "Invalid sort '{0}': must be one of default, duration-asc, duration-desc, difficulty-asc, difficulty-desc"
    )]
    InvalidSortKey(String),

    /// Embedded catalog asset is missing or inconsistent.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Prompt template could not be rendered.
    #[error(transparent)]
    Prompt(#[from] crate::domain::prompt::PromptError),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn gateway<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::GatewayError { message: message.into(), status }
    }

    pub fn decode(stage: &str, err: impl std::fmt::Display) -> Self {
        AppError::StructuredDecode { stage: stage.to_string(), details: err.to_string() }
    }
}
