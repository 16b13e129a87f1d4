//! # Navigation Constants
//!
//! Defaults baked into the navigation core. Config blocks start from these.

// =============================================================================
// GEOMETRY
// =============================================================================

/// Absolute tolerance below which a bounds extent counts as zero.
pub const BOUNDS_TOLERANCE: f32 = 1.0e-4;

// =============================================================================
// MINIMAP DEFAULTS
// =============================================================================

/// Default minimap zoom factor.
pub const DEFAULT_ZOOM: f32 = 5.0;

/// Default radius of the compass marker ring, in canvas pixels.
pub const DEFAULT_COMPASS_RADIUS: f32 = 200.0;

/// Default marker widget size, in canvas pixels.
pub const DEFAULT_MARKER_SIZE: f32 = 32.0;

// =============================================================================
// MARKERS
// =============================================================================

/// Grouping tag used for character markers when none is configured.
pub const PLAYERS_LAYER: &str = "Players";
