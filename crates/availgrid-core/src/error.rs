//! Core error types for availgrid-core.
//!
//! This module defines the error hierarchy using thiserror. Engine
//! operations (aggregation, coloring, painting) are total and never
//! return these; they surface from configuration, boundary parsing and
//! the submission client.

use std::path::PathBuf;
use thiserror::Error;

use crate::submission::SubmitError;

/// Core error type for availgrid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Time key parse errors
    #[error("Time key error: {0}")]
    TimeKey(#[from] TimeKeyError),

    /// Vote submission errors
    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors raised at the host boundary.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Required parameter missing or empty
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors produced while parsing a time key from its canonical string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeKeyError {
    /// Not a `YYYY-MM-DD` calendar date
    #[error("invalid day key '{0}': expected YYYY-MM-DD")]
    InvalidDay(String),

    /// Not an `HH:mm` half-hour slot
    #[error("invalid slot key '{0}': expected HH:mm with minutes 00 or 30")]
    InvalidSlot(String),

    /// Slot index outside `0..48`
    #[error("slot index {0} out of range (0..48)")]
    SlotIndexOutOfRange(usize),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
