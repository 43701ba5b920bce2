//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::ChipFamily;
use crate::error::ConfigError;
use crate::footprint::Style;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
/// Every section is optional; an empty object generates the standard
/// chip resistor library into `out/chip/pkg`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Directory receiving one sub-directory per package.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Path to the UUID cache CSV file.
    #[serde(default = "default_uuid_cache")]
    pub uuid_cache: PathBuf,

    /// Parts to generate and their shared metadata.
    #[serde(default)]
    pub chip: ChipFamily,

    /// Line widths, text sizes and clearances.
    #[serde(default)]
    pub style: Style,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            _schema: None,
            _comment: None,
            output_dir: default_output_dir(),
            uuid_cache: default_uuid_cache(),
            chip: ChipFamily::default(),
            style: Style::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            });
        }

        if let Some(ref created) = self.chip.created {
            if chrono::DateTime::parse_from_rfc3339(created).is_err() {
                return Err(ConfigError::ValidationError {
                    message: format!("Invalid creation timestamp '{created}'. Expected RFC 3339"),
                });
            }
        }

        let style = &self.style;
        for (name, value) in [
            ("line_width", style.line_width),
            ("line_width_thin", style.line_width_thin),
            ("line_width_thinnest", style.line_width_thinnest),
            ("text_height", style.text_height),
            ("text_stroke_width", style.text_stroke_width),
            ("label_offset", style.label_offset),
            ("label_offset_thin", style.label_offset_thin),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("style.{name} must be positive, got {value}"),
                });
            }
        }
        if !style.silkscreen_clearance.is_finite() || style.silkscreen_clearance < 0.0 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "style.silkscreen_clearance must not be negative, got {}",
                    style.silkscreen_clearance
                ),
            });
        }
        if style.line_width_thinnest > style.line_width_thin
            || style.line_width_thin > style.line_width
        {
            return Err(ConfigError::ValidationError {
                message: "style line widths must satisfy thinnest <= thin <= thick".to_string(),
            });
        }

        if self.chip.parts.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "chip.parts must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out/chip/pkg")
}

fn default_uuid_cache() -> PathBuf {
    PathBuf::from("uuid_cache_chip.csv")
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
