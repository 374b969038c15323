//! Error types for configuration, batch quoting and the quote endpoint
//!
//! The calculator itself never errors: out-of-domain input degrades to a
//! zero quote. Only the surfaces around it can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating calculator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {field} {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while reading or writing batch quote files
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {row}: invalid {field} '{value}'")]
    InvalidOverride {
        row: usize,
        field: &'static str,
        value: String,
    },
}

/// Errors returned by the quote endpoint, each mapped to an HTTP status
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid loan terms: {0}")]
    InvalidTerms(#[from] ConfigError),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidJson(_) => 400,
            ApiError::InvalidTerms(_) => 400,
        }
    }
}
