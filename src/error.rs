//! Error types for footprint-gen.
//!
//! Configuration, part specification and template errors live here.
//! File and cache errors raised while writing a library are in
//! [`crate::library::error`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// A part specification with physically inconsistent dimensions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    /// A dimension is zero, negative or not finite.
    #[error("part {part}: {field} must be a positive number, got {value}")]
    NonPositive {
        /// Imperial size label of the offending part.
        part: String,
        /// Name of the offending dimension.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The pad gap does not fit inside the body.
    #[error("part {part}: gap {gap} must be smaller than length {length}")]
    GapTooLarge {
        /// Imperial size label of the offending part.
        part: String,
        /// Inter-pad gap (mm).
        gap: f64,
        /// Body length (mm).
        length: f64,
    },

    /// The pad gap leaves no room for silkscreen lines after clearance.
    #[error("part {part}: gap {gap} leaves no room for silkscreen (half length {half_length})")]
    SilkscreenClearance {
        /// Imperial size label of the offending part.
        part: String,
        /// Inter-pad gap (mm).
        gap: f64,
        /// Resulting silkscreen half length (mm), zero or negative.
        half_length: f64,
    },
}

/// Errors raised while substituting template parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template references a parameter that was not supplied.
    #[error("unknown template parameter '{name}' in \"{template}\"")]
    UnknownParameter {
        /// Parameter name.
        name: String,
        /// The template being applied.
        template: String,
    },

    /// A `{` without a matching `}`, or a stray `}`.
    #[error("unbalanced brace at offset {offset} in \"{template}\"")]
    UnbalancedBrace {
        /// Byte offset of the offending brace.
        offset: usize,
        /// The template being applied.
        template: String,
    },
}
