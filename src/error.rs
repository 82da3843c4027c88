//! Structured error types for configuration aggregation.

use serde::Serialize;
use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Contract errors
    InvalidKey,
    MissingField,
    InvalidPattern,

    // Provider errors
    ProviderFailed,
    ParseFailed,
    IoFailed,

    // Internal errors
    InternalError,
}

/// Structured error carrying a machine-readable code alongside the message.
///
/// `field` names the offending key, field, or pattern when one exists;
/// `details` carries the underlying cause for diagnostics.
#[derive(Debug, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ConfigError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
            details: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn invalid_key(key: &str) -> Self {
        Self::new(
            ErrorCode::InvalidKey,
            format!("Unrecognized sitemap config key: {}", key),
        )
        .with_field(key)
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(ErrorCode::MissingField, format!("{} is required", field)).with_field(field)
    }

    pub fn invalid_pattern(pattern: &str, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidPattern,
            format!("Invalid exclusion pattern: {}", pattern),
        )
        .with_field(pattern)
        .with_details(err.to_string())
    }

    pub fn provider(name: &str, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ProviderFailed,
            format!("Provider {} failed: {}", name, err),
        )
        .with_field(name)
    }

    pub fn parse(path: impl fmt::Display, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ParseFailed, format!("Failed to parse {}", path))
            .with_details(err.to_string())
    }

    pub fn io(path: impl fmt::Display, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::IoFailed, format!("Failed to read {}", path))
            .with_details(err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

/// Result type for aggregation operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
