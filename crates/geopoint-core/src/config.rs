use crate::error::{GeopointError, Result};
use crate::ingest::IngestOptions;
use crate::models::POI_TAG;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "geopoint.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for GeoPoint
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub delimiter: ConfigValue<char>,
    pub plot_width: ConfigValue<u32>,
    pub plot_height: ConfigValue<u32>,
    pub font_path: ConfigValue<Option<PathBuf>>,
    pub pretty_json: ConfigValue<bool>,
    pub poi_tag: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            delimiter: ConfigValue::new(',', ConfigSource::Default),
            plot_width: ConfigValue::new(1200, ConfigSource::Default),
            plot_height: ConfigValue::new(900, ConfigSource::Default),
            font_path: ConfigValue::new(None, ConfigSource::Default),
            pretty_json: ConfigValue::new(true, ConfigSource::Default),
            poi_tag: ConfigValue::new(POI_TAG.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeopointError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeopointError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(delimiter) = file_config.delimiter {
            self.delimiter.update(validate_delimiter(delimiter)?, ConfigSource::File);
        }

        if let Some(width) = file_config.plot_width {
            self.plot_width.update(validate_dimension("plot_width", width)?, ConfigSource::File);
        }

        if let Some(height) = file_config.plot_height {
            self.plot_height.update(validate_dimension("plot_height", height)?, ConfigSource::File);
        }

        if let Some(font_path) = file_config.font_path {
            self.font_path.update(Some(font_path), ConfigSource::File);
        }

        if let Some(pretty_json) = file_config.pretty_json {
            self.pretty_json.update(pretty_json, ConfigSource::File);
        }

        if let Some(poi_tag) = file_config.poi_tag {
            self.poi_tag.update(poi_tag, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the file at `explicit`, or `geopoint.toml` in the working directory when it exists
    pub fn load_file_if_present(self, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => self.load_from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    self.load_from_file(default_path)
                } else {
                    Ok(self)
                }
            }
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(self) -> Self {
        self.load_from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from `GEOPOINT_*` variables provided by `lookup`.
    /// Invalid values are logged and ignored.
    pub fn load_from_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // GEOPOINT_DELIMITER
        if let Some(raw) = lookup("GEOPOINT_DELIMITER") {
            match parse_delimiter(&raw) {
                Ok(delimiter) => self.delimiter.update(delimiter, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPOINT_DELIMITER value '{}': expected a single ASCII character",
                    raw
                ),
            }
        }

        // GEOPOINT_PLOT_WIDTH / GEOPOINT_PLOT_HEIGHT
        let dimensions = [("GEOPOINT_PLOT_WIDTH", "plot_width"), ("GEOPOINT_PLOT_HEIGHT", "plot_height")];
        for (var, key) in dimensions {
            if let Some(raw) = lookup(var) {
                match parse_dimension(key, &raw) {
                    Ok(value) if key == "plot_width" => {
                        self.plot_width.update(value, ConfigSource::Environment)
                    }
                    Ok(value) => self.plot_height.update(value, ConfigSource::Environment),
                    Err(_) => tracing::warn!(
                        "Invalid {} value '{}': expected a positive integer",
                        var,
                        raw
                    ),
                }
            }
        }

        // GEOPOINT_FONT_PATH
        if let Some(raw) = lookup("GEOPOINT_FONT_PATH") {
            if !raw.trim().is_empty() {
                self.font_path.update(Some(PathBuf::from(raw)), ConfigSource::Environment);
            }
        }

        // GEOPOINT_PRETTY_JSON
        if let Some(raw) = lookup("GEOPOINT_PRETTY_JSON") {
            match parse_bool(&raw) {
                Some(pretty) => self.pretty_json.update(pretty, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid GEOPOINT_PRETTY_JSON value '{}': expected true or false",
                    raw
                ),
            }
        }

        // GEOPOINT_POI_TAG
        if let Some(raw) = lookup("GEOPOINT_POI_TAG") {
            self.poi_tag.update(raw, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) -> Result<()> {
        if let Some(delimiter) = overrides.delimiter {
            self.delimiter.update(validate_delimiter(delimiter)?, ConfigSource::Cli);
        }

        if let Some(width) = overrides.plot_width {
            self.plot_width.update(validate_dimension("plot_width", width)?, ConfigSource::Cli);
        }

        if let Some(height) = overrides.plot_height {
            self.plot_height.update(validate_dimension("plot_height", height)?, ConfigSource::Cli);
        }

        if let Some(font_path) = overrides.font_path {
            self.font_path.update(Some(font_path), ConfigSource::Cli);
        }

        Ok(())
    }

    /// Reader options derived from the configured delimiter
    pub fn ingest_options(&self) -> IngestOptions {
        // validated as ASCII on every path that sets it
        IngestOptions::with_delimiter(self.delimiter.value as u8)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "delimiter".to_string(),
            (format!("{:?}", self.delimiter.value), self.delimiter.source),
        );

        map.insert(
            "plot_width".to_string(),
            (self.plot_width.value.to_string(), self.plot_width.source),
        );

        map.insert(
            "plot_height".to_string(),
            (self.plot_height.value.to_string(), self.plot_height.source),
        );

        map.insert(
            "font_path".to_string(),
            (
                self.font_path
                    .value
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
                self.font_path.source,
            ),
        );

        map.insert(
            "pretty_json".to_string(),
            (self.pretty_json.value.to_string(), self.pretty_json.source),
        );

        map.insert("poi_tag".to_string(), (self.poi_tag.value.clone(), self.poi_tag.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    delimiter: Option<char>,
    plot_width: Option<u32>,
    plot_height: Option<u32>,
    font_path: Option<PathBuf>,
    pretty_json: Option<bool>,
    poi_tag: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub delimiter: Option<char>,
    pub plot_width: Option<u32>,
    pub plot_height: Option<u32>,
    pub font_path: Option<PathBuf>,
}

/// Parse a delimiter given as a single character or the word "tab"
pub fn parse_delimiter(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        _ if s.eq_ignore_ascii_case("tab") || s == "\\t" => Ok('\t'),
        (Some(c), None) => validate_delimiter(c),
        _ => Err(GeopointError::ConfigInvalid {
            key: "delimiter".to_string(),
            reason: format!("Invalid delimiter: '{}'. Use a single ASCII character", s),
        }),
    }
}

fn validate_delimiter(c: char) -> Result<char> {
    if c.is_ascii() && c != '"' && c != '\n' && c != '\r' {
        Ok(c)
    } else {
        Err(GeopointError::ConfigInvalid {
            key: "delimiter".to_string(),
            reason: format!("Invalid delimiter: {:?}. Use a single ASCII character", c),
        })
    }
}

/// Parse a positive pixel dimension
pub fn parse_dimension(key: &str, s: &str) -> Result<u32> {
    let value = s.trim().parse::<u32>().map_err(|_| GeopointError::ConfigInvalid {
        key: key.to_string(),
        reason: format!("Invalid size: {}. Use a positive integer", s),
    })?;
    validate_dimension(key, value)
}

fn validate_dimension(key: &str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(GeopointError::ConfigInvalid {
            key: key.to_string(),
            reason: "Size must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
