//! # Navigation Service Errors
//!
//! Only initialization returns these. Once a widget is running, every
//! per-frame problem is a skipped frame.

use navmap_core::NavError;
use navmap_ui::UiError;
use thiserror::Error;

/// Errors raised while wiring the navigation service together.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// The widget was initialized without a subsystem to track.
    #[error("navigation subsystem is not available")]
    SubsystemUnavailable,

    /// The minimap config is invalid.
    #[error(transparent)]
    Ui(#[from] UiError),

    /// A layer catalog or marker library is invalid.
    #[error(transparent)]
    Core(#[from] NavError),
}

/// Result type for navigation service setup.
pub type NavigationResult<T> = Result<T, NavigationError>;
