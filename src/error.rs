//! Error types for the Achilles lab

use std::time::Duration;
use thiserror::Error;

/// Main error type for lab operations
#[derive(Debug, Error)]
pub enum AchillesError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Request timed out after {0:?}")]
    FetchTimeout(Duration),

    #[error("Unsafe YAML construct rejected: {0}")]
    UnsafeYaml(String),
}

/// Result type alias for lab operations
pub type Result<T> = std::result::Result<T, AchillesError>;
