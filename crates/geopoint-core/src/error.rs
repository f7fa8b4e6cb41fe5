//! Error types for GeoPoint

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Coordinate axis, used to report which range check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    /// Inclusive domain `(min, max)` in degrees
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Axis::Longitude => (-180.0, 180.0),
            Axis::Latitude => (-90.0, 90.0),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Longitude => write!(f, "Longitude"),
            Axis::Latitude => write!(f, "Latitude"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeopointError {
    // Validation errors
    #[error("{axis} must be between {min} and {max}, got {value}")]
    CoordinateOutOfRange { axis: Axis, min: f64, max: f64, value: f64 },

    // Row parsing errors
    #[error("Invalid number in column '{field}': '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Missing required column '{field}'")]
    MissingField { field: String },

    // Data source errors
    #[error("Data source not found at {path}")]
    DataSourceNotFound { path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Rendering errors
    #[error("Failed to render {path}: {reason}")]
    Render { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeopointError {
    /// Range violation for `value` on `axis`
    pub fn out_of_range(axis: Axis, value: f64) -> Self {
        let (min, max) = axis.bounds();
        GeopointError::CoordinateOutOfRange { axis, min, max, value }
    }

    /// Whether this error describes a single bad record rather than a broken source
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            GeopointError::CoordinateOutOfRange { .. }
                | GeopointError::InvalidNumber { .. }
                | GeopointError::MissingField { .. }
        )
    }
}

impl From<serde_json::Error> for GeopointError {
    fn from(err: serde_json::Error) -> Self {
        GeopointError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeopointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = GeopointError::out_of_range(Axis::Latitude, 95.0);
        assert_eq!(err.to_string(), "Latitude must be between -90 and 90, got 95");
    }

    #[test]
    fn test_row_level_classification() {
        assert!(GeopointError::MissingField { field: "lat".into() }.is_row_level());
        assert!(!GeopointError::DataSourceNotFound { path: PathBuf::from("x.csv") }.is_row_level());
    }
}
