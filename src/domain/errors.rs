//! Domain error types
//!
//! This module defines the error hierarchy for gee-batch.
//! Errors carry plain strings so callers never see third-party types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main gee-batch error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors (date ranges, identifiers)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failed to create an output directory
    #[error("Failed to create directory {}: {message}", path.display())]
    Directory { path: PathBuf, message: String },

    /// Exporter invocation errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BatchError {
    /// Builds a [`BatchError::Directory`] for the given path
    pub fn directory(path: impl AsRef<Path>, err: impl std::fmt::Display) -> Self {
        BatchError::Directory {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BatchError {
    fn from(err: toml::de::Error) -> Self {
        BatchError::Configuration(format!("Failed to parse TOML: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_error_display() {
        let err = BatchError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_directory_error_display() {
        let err = BatchError::directory("data/NIR/20230101_20230201", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to create directory data/NIR/20230101_20230201: permission denied"
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: BatchError = toml_err.into();
        assert!(matches!(err, BatchError::Configuration(_)));
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_batch_error_implements_std_error() {
        let err = BatchError::Export("exporter missing".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
