//! # Compass Pass
//!
//! Places markers on a ring by world bearing from the player. Independent
//! of the minimap: no layer, no UV, no zoom.
//!
//! ```text
//! bearing  = atan2(dy, dx) + static_rotation
//! position = center + radius * (cos bearing, sin bearing)
//! ```
//!
//! Compass icons never rotate on their own. The ring image turns once, by
//! `-static_rotation`.

use navmap_core::Marker;
use navmap_shared::{Vec2, Vec3};

use crate::placement::PlacedMarker;
use crate::rotation::MapRotation;

/// Per-frame constants of the compass pass.
#[derive(Clone, Copy, Debug)]
pub struct CompassPass {
    /// Player world position.
    pub player: Vec3,
    /// Compass canvas size in pixels.
    pub canvas: Vec2,
    /// Ring radius in pixels.
    pub radius: f32,
    /// Rotation frame (only the static part is used).
    pub rotation: MapRotation,
}

impl CompassPass {
    /// Ring center in pixels.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.canvas * 0.5
    }

    /// Bearing from the player to `point` in degrees, including the static
    /// rotation.
    #[must_use]
    pub fn bearing_to(&self, point: Vec3) -> f32 {
        let direction = point - self.player;
        direction.y.atan2(direction.x).to_degrees() + self.rotation.static_rotation
    }

    /// Places one marker on the ring.
    #[must_use]
    pub fn place(&self, marker: &Marker) -> PlacedMarker {
        let (sin, cos) = self.bearing_to(marker.world_location).to_radians().sin_cos();
        let target = self.center() + Vec2::new(cos, sin) * self.radius;
        PlacedMarker::new(marker.id, marker.config.clone(), target, 0.0, false)
    }
}
