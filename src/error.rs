//! Error types
//!
//! Only configuration can fail. Frame-time problems (negative deltas, triggers
//! in the wrong mode) are clamped or ignored by the simulation instead.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected tuning or entity construction parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("gravity must be negative, got {0}")]
    NonNegativeGravity(f32),

    #[error("basketball power range is empty (min {min} > max {max})")]
    EmptyPowerRange { min: f32, max: f32 },

    #[error("bounding volume subdivisions must be at most {max}, got {got}")]
    TooManySubdivisions { got: u32, max: u32 },

    #[error("key binding for {0} is empty")]
    EmptyKey(&'static str),

    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Check that a value is strictly positive and finite
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

/// Check that a value is finite
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}
