//! # Minimap Configuration
//!
//! One block per minimap widget. Defaults match the stock minimap asset:
//! zoom 5, static north-up map, circular clip, compass on at radius 200.
//!
//! ```toml
//! zoom = 3.0
//! rotate_map = true
//! rotation_source = "control_rotation"
//! alignment = "right"
//! shape = "square"
//!
//! [player_marker_config]
//! indicator_pivot = { x = 0.5, y = 0.25 }
//! visibility = { show_on_minimap = true }
//! ```

use navmap_core::MarkerVisualConfig;
use navmap_shared::{TextureHandle, DEFAULT_COMPASS_RADIUS, DEFAULT_ZOOM};
use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};

/// Which of the viewer's two yaws drives a rotating map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationSource {
    /// Camera / aim direction. First and third person games.
    ControlRotation,
    /// Character facing. Top-down and twin-stick games.
    #[default]
    ActorRotation,
}

/// Which world axis points "up" on a non-rotating map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapAlignment {
    /// World forward (+X) is up.
    #[default]
    #[serde(alias = "forward")]
    ForwardPlusX,
    /// World right (+Y) is up.
    #[serde(alias = "right")]
    RightPlusY,
    /// World backward (-X) is up.
    #[serde(alias = "backward")]
    BackwardMinusX,
    /// World left (-Y) is up.
    #[serde(alias = "left")]
    LeftMinusY,
}

impl MapAlignment {
    /// Base map rotation in degrees for this alignment.
    #[must_use]
    pub const fn angle(self) -> f32 {
        match self {
            Self::ForwardPlusX => 0.0,
            Self::RightPlusY => 90.0,
            Self::BackwardMinusX => 180.0,
            Self::LeftMinusY => -90.0,
        }
    }
}

/// Clip shape of the minimap panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimapShape {
    /// Rectangular panel; markers clamp to its half extents.
    Square,
    /// Round panel; markers clamp to half the smaller side.
    #[default]
    Circle,
}

/// Configuration block for a minimap widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MinimapConfig {
    /// Appearance of the player's own marker.
    pub player_marker_config: Option<MarkerVisualConfig>,
    /// Compass ring art.
    pub compass_ring_texture: Option<TextureHandle>,

    // --- MINIMAP SETTINGS ---
    /// Map magnification.
    pub zoom: f32,
    /// Yaw source for a rotating map.
    pub rotation_source: RotationSource,
    /// Rotate the map with the viewer instead of keeping it fixed.
    pub rotate_map: bool,
    /// Extra fixed rotation in degrees.
    pub map_rotation_offset: f32,
    /// World axis shown as up.
    pub alignment: MapAlignment,
    /// Panel clip shape.
    pub shape: MinimapShape,
    /// Pin off-panel markers to the panel edge, pointing outward.
    pub clamp_markers_to_edge: bool,

    // --- COMPASS SETTINGS ---
    /// Lay out the compass ring.
    pub compass_enabled: bool,
    /// Ring radius in compass canvas pixels.
    pub compass_marker_radius: f32,

    // --- DEBUG SETTINGS ---
    /// Log per-frame projection details at debug level.
    pub show_debug_messages: bool,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            player_marker_config: None,
            compass_ring_texture: None,
            zoom: DEFAULT_ZOOM,
            rotation_source: RotationSource::ActorRotation,
            rotate_map: false,
            map_rotation_offset: 0.0,
            alignment: MapAlignment::ForwardPlusX,
            shape: MinimapShape::Circle,
            clamp_markers_to_edge: true,
            compass_enabled: true,
            compass_marker_radius: DEFAULT_COMPASS_RADIUS,
            show_debug_messages: false,
        }
    }
}

impl MinimapConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// [`UiError::ConfigParse`] for malformed text, otherwise whatever
    /// [`validate`](Self::validate) reports.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks zoom, compass radius and the player marker config.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting.
    pub fn validate(&self) -> UiResult<()> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(UiError::InvalidZoom(self.zoom));
        }
        if !self.compass_marker_radius.is_finite() || self.compass_marker_radius < 0.0 {
            return Err(UiError::InvalidCompassRadius(self.compass_marker_radius));
        }
        if let Some(player) = &self.player_marker_config {
            player.validate()?;
        }
        Ok(())
    }

    /// Fixed part of the map rotation: offset plus alignment, in degrees.
    #[must_use]
    pub fn static_rotation(&self) -> f32 {
        self.map_rotation_offset + self.alignment.angle()
    }
}
