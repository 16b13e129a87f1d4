//! # Navigation Error Types
//!
//! Construction-time failures. Per-tick paths never return these: a
//! failed projection or an unknown marker id is a skip, not an error.

use thiserror::Error;

/// Errors raised while building layers and marker configs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    /// Bounds have (near) zero extent on X or Y.
    #[error("layer '{layer}' has degenerate bounds: extent {extent_x} x {extent_y}")]
    DegenerateBounds {
        /// Layer name.
        layer: String,
        /// Extent along world X.
        extent_x: f32,
        /// Extent along world Y.
        extent_y: f32,
    },

    /// A named marker config is not in the library.
    #[error("unknown marker config: {0}")]
    UnknownConfig(String),

    /// Indicator pivot lies outside the unit square.
    #[error("indicator pivot ({x}, {y}) is outside [0, 1]")]
    InvalidPivot {
        /// Pivot X.
        x: f32,
        /// Pivot Y.
        y: f32,
    },

    /// Marker size is not strictly positive.
    #[error("marker size ({width} x {height}) must be positive")]
    InvalidSize {
        /// Width.
        width: f32,
        /// Height.
        height: f32,
    },

    /// Lifetime is negative or not finite.
    #[error("marker lifetime {0} must be finite and >= 0")]
    InvalidLifetime(f32),

    /// TOML text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for navigation core operations.
pub type NavResult<T> = Result<T, NavError>;

impl From<toml::de::Error> for NavError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
