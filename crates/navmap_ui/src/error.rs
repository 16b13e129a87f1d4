//! # Layout Error Types
//!
//! Raised when a minimap config is parsed or validated. Frame layout itself
//! never fails; it skips.

use navmap_core::NavError;
use thiserror::Error;

/// Errors in minimap configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// Zoom must be finite and strictly positive.
    #[error("invalid zoom: {0}")]
    InvalidZoom(f32),

    /// Compass radius must be finite and non-negative.
    #[error("invalid compass radius: {0}")]
    InvalidCompassRadius(f32),

    /// The player marker config failed validation.
    #[error("invalid player marker config: {0}")]
    InvalidMarkerConfig(#[from] NavError),

    /// TOML text could not be parsed.
    #[error("invalid minimap configuration: {0}")]
    ConfigParse(String),
}

/// Result type for layout configuration.
pub type UiResult<T> = Result<T, UiError>;

impl From<toml::de::Error> for UiError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
