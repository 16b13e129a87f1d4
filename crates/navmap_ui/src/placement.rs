//! Screen-space placement of one marker.

use std::sync::Arc;

use navmap_core::{MarkerId, MarkerVisualConfig, ViewCone};
use navmap_shared::Vec2;

/// Where and how to draw one marker widget on a canvas.
///
/// `position` is the widget center, compensated so that the widget appears
/// to spin about its indicator pivot rather than its geometric center.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedMarker {
    /// Marker this placement belongs to.
    pub id: MarkerId,
    /// Pivot-compensated widget center in canvas pixels.
    pub position: Vec2,
    /// Layout point in canvas pixels, where an unrotated widget would be
    /// centered. The pivot sits at [`pivot_point`](Self::pivot_point).
    pub target: Vec2,
    /// Indicator rotation in degrees, clockwise.
    pub angle: f32,
    /// Widget size in canvas pixels.
    pub size: Vec2,
    /// True if the marker was pinned to the panel edge.
    pub clamped: bool,
    /// Appearance.
    pub config: Arc<MarkerVisualConfig>,
}

impl PlacedMarker {
    /// Builds a placement for a widget laid out at `target` and turned by
    /// `angle` about its indicator pivot.
    #[must_use]
    pub fn new(
        id: MarkerId,
        config: Arc<MarkerVisualConfig>,
        target: Vec2,
        angle: f32,
        clamped: bool,
    ) -> Self {
        let size = config.size;
        let position = pivot_compensated(target, config.indicator_pivot, size, angle);
        Self {
            id,
            position,
            target,
            angle,
            size,
            clamped,
            config,
        }
    }

    /// Canvas point the indicator pivot stays on for every angle.
    #[must_use]
    pub fn pivot_point(&self) -> Vec2 {
        self.target + (self.config.indicator_pivot - Vec2::HALF).mul_elem(self.size)
    }

    /// Top-left corner of the widget rectangle.
    #[must_use]
    pub fn top_left(&self) -> Vec2 {
        self.position - self.size * 0.5
    }

    /// View cone to draw under the indicator, if configured.
    #[must_use]
    pub fn view_cone(&self) -> Option<ViewCone> {
        self.config.view_cone
    }
}

/// Widget center for a widget rotated by `angle` degrees about its center.
///
/// ```text
/// pivot_off = (pivot - 0.5) * size
/// center    = target - (rotate(pivot_off, angle) - pivot_off)
/// ```
///
/// The pivot point ends up at `target + pivot_off` for every angle, so the
/// icon turns in place around its pivot. A centered pivot (0.5, 0.5)
/// leaves the target unchanged.
#[must_use]
pub fn pivot_compensated(target: Vec2, pivot: Vec2, size: Vec2, angle: f32) -> Vec2 {
    let pivot_offset = (pivot - Vec2::HALF).mul_elem(size);
    let rotated = pivot_offset.rotated(angle);
    target - (rotated - pivot_offset)
}
