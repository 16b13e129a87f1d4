//! Map rotation frame for one layout pass.
//!
//! Two parts:
//! - static: configured offset plus the alignment angle, fixed per config
//! - dynamic: the viewer's live yaw, only applied when the map rotates
//!
//! Marker offsets counter-rotate opposite to the map texture so icons stay
//! registered with the map art.

use navmap_shared::normalize_degrees;

use crate::config::{MinimapConfig, RotationSource};
use crate::engine::ViewerState;

/// Resolved rotation state for one frame, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapRotation {
    /// Offset plus alignment.
    pub static_rotation: f32,
    /// Yaw from the configured rotation source.
    pub viewer_yaw: f32,
    /// Whether the map follows the viewer.
    pub rotate_map: bool,
}

impl MapRotation {
    /// Resolves the rotation frame for `viewer` under `config`.
    #[must_use]
    pub fn resolve(config: &MinimapConfig, viewer: &ViewerState) -> Self {
        let viewer_yaw = match config.rotation_source {
            RotationSource::ControlRotation => viewer.control_yaw,
            RotationSource::ActorRotation => viewer.actor_yaw,
        };
        Self {
            static_rotation: config.static_rotation(),
            viewer_yaw,
            rotate_map: config.rotate_map,
        }
    }

    /// Dynamic map rotation: the viewer yaw when rotating, else zero.
    #[must_use]
    pub fn dynamic_rotation(&self) -> f32 {
        if self.rotate_map {
            self.viewer_yaw
        } else {
            0.0
        }
    }

    /// Angle applied to raw minimap offsets.
    #[must_use]
    pub fn offset_rotation(&self) -> f32 {
        -(self.static_rotation + self.dynamic_rotation())
    }

    /// Frame that marker facings are measured against.
    #[must_use]
    pub fn indicator_frame(&self) -> f32 {
        if self.rotate_map {
            self.viewer_yaw
        } else {
            self.static_rotation
        }
    }

    /// Indicator angle for a marker facing `yaw`.
    #[must_use]
    pub fn indicator_angle(&self, yaw: f32) -> f32 {
        normalize_degrees(yaw - self.indicator_frame())
    }

    /// Indicator angle of the player's own icon.
    ///
    /// A rotating map always shows the player pointing up.
    #[must_use]
    pub fn player_indicator_angle(&self) -> f32 {
        if self.rotate_map {
            0.0
        } else {
            self.indicator_angle(self.viewer_yaw)
        }
    }

    /// Rotation of the compass ring image.
    #[must_use]
    pub fn compass_ring_angle(&self) -> f32 {
        -self.static_rotation
    }
}
