//! # Minimap Pass
//!
//! Places markers on the minimap panel relative to the player.
//!
//! ```text
//! marker UV - player UV ──> * canvas * zoom ──> counter-rotate ──> clamp ──> pivot
//! ```
//!
//! The player sits at the canvas center. Offsets rotate opposite to the map
//! texture so markers stay registered with the map art.

use navmap_core::{world_to_map_uv, MapLayer, Marker};
use navmap_shared::Vec2;

use crate::config::MinimapShape;
use crate::placement::PlacedMarker;
use crate::rotation::MapRotation;

/// Per-frame constants of the minimap pass.
#[derive(Clone, Copy, Debug)]
pub struct MinimapPass<'a> {
    /// Active layer.
    pub layer: &'a MapLayer,
    /// Player position in map UV.
    pub player_uv: Vec2,
    /// Panel size in pixels.
    pub canvas: Vec2,
    /// Map magnification.
    pub zoom: f32,
    /// Rotation frame.
    pub rotation: MapRotation,
    /// Panel clip shape.
    pub shape: MinimapShape,
    /// Pin off-panel markers to the edge.
    pub clamp_to_edge: bool,
}

impl MinimapPass<'_> {
    /// Panel center in pixels.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.canvas * 0.5
    }

    /// Rotated pixel offset of `marker` from the player, or `None` if the
    /// marker does not project onto the active layer.
    #[must_use]
    pub fn offset_of(&self, marker: &Marker) -> Option<Vec2> {
        let uv = world_to_map_uv(Some(self.layer), marker.world_location)?;
        let raw = (uv - self.player_uv).mul_elem(self.canvas) * self.zoom;
        Some(raw.rotated(self.rotation.offset_rotation()))
    }

    /// Places one marker. Markers off the layer are skipped.
    #[must_use]
    pub fn place(&self, marker: &Marker) -> Option<PlacedMarker> {
        let offset = self.offset_of(marker)?;

        let (offset, clamped) = if self.clamp_to_edge {
            clamp_offset(offset, self.canvas, self.shape)
        } else {
            (offset, false)
        };

        let angle = if clamped {
            // Edge markers point away from the player.
            offset.heading_degrees()
        } else {
            marker
                .facing_yaw
                .map_or(0.0, |yaw| self.rotation.indicator_angle(yaw))
        };

        Some(PlacedMarker::new(
            marker.id,
            marker.config.clone(),
            self.center() + offset,
            angle,
            clamped,
        ))
    }
}

/// Pins `offset` inside the drawable area of a panel of `canvas` pixels.
///
/// Returns the possibly shortened offset and whether it was shortened.
/// Direction is always preserved.
#[must_use]
pub fn clamp_offset(offset: Vec2, canvas: Vec2, shape: MinimapShape) -> (Vec2, bool) {
    match shape {
        MinimapShape::Circle => {
            let radius = canvas.min_element() * 0.5;
            let length = offset.length();
            if length > radius && length > 0.0 {
                (offset * (radius / length), true)
            } else {
                (offset, false)
            }
        }
        MinimapShape::Square => {
            let half = canvas * 0.5;
            let mut scale = 1.0_f32;
            if offset.x.abs() > half.x {
                scale = scale.min(half.x / offset.x.abs());
            }
            if offset.y.abs() > half.y {
                scale = scale.min(half.y / offset.y.abs());
            }
            if scale < 1.0 {
                (offset * scale, true)
            } else {
                (offset, false)
            }
        }
    }
}
