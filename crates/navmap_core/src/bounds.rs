//! # Coordinate Projection
//!
//! Maps world positions onto a layer's texture space.
//!
//! ```text
//!        u = 0                u = 1
//! v = 0  ┌────────────────────┐   world +X ("north") is up
//!        │                    │   world +Y is right
//!        │         ·          │
//!        │                    │
//! v = 1  └────────────────────┘
//! ```
//!
//! Pure functions, no state: safe to call from anywhere.

use navmap_shared::{Vec2, Vec3, BOUNDS_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::layer::MapLayer;

/// Axis-aligned world-space box. Z is carried but ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl WorldBounds {
    /// Creates bounds from two corners.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Square bounds `[min, max]` on both X and Y.
    #[must_use]
    pub const fn square(min: f32, max: f32) -> Self {
        Self::new(Vec3::new(min, min, 0.0), Vec3::new(max, max, 0.0))
    }

    /// Extent along world X and Y.
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }

    /// True if either planar extent is within [`BOUNDS_TOLERANCE`] of zero.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let extent = self.extent();
        extent.x.abs() <= BOUNDS_TOLERANCE || extent.y.abs() <= BOUNDS_TOLERANCE
    }

    /// True if the point lies strictly inside the box on X and Y.
    #[must_use]
    pub fn contains_xy(&self, point: Vec3) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    /// Projects a world point to normalized map UV.
    ///
    /// Returns `None` if the point is outside the box or the box is
    /// degenerate.
    #[must_use]
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        if !self.contains_xy(point) || self.is_degenerate() {
            return None;
        }

        let extent = self.extent();
        let u = (point.y - self.min.y) / extent.y;
        // Flipped so north (+X) sits at the top (v = 0).
        let v = 1.0 - (point.x - self.min.x) / extent.x;
        Some(Vec2::new(u, v))
    }

    /// Inverse of [`project`](Self::project). Z comes back as zero.
    #[must_use]
    pub fn unproject(&self, uv: Vec2) -> Vec3 {
        let extent = self.extent();
        Vec3::new(
            self.min.x + (1.0 - uv.y) * extent.x,
            self.min.y + uv.x * extent.y,
            0.0,
        )
    }
}

/// Projects `point` onto `layer`'s texture space.
///
/// Fails when there is no layer, the point is outside the layer, or the
/// layer's bounds are degenerate.
#[must_use]
pub fn world_to_map_uv(layer: Option<&MapLayer>, point: Vec3) -> Option<Vec2> {
    let layer = layer?;
    let uv = layer.bounds.project(point);
    if uv.is_none() && layer.bounds.is_degenerate() {
        tracing::debug!("layer '{}' has zero size on X or Y", layer.name);
    }
    uv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_convention() {
        let bounds = WorldBounds::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(200.0, 100.0, 0.0));

        // North-west corner region: high X, low Y -> top-left.
        let uv = bounds.project(Vec3::new(199.0, 1.0, 0.0)).unwrap();
        assert!(uv.abs_diff_eq(Vec2::new(0.01, 0.005), 1e-4));

        // Center.
        let uv = bounds.project(Vec3::new(100.0, 50.0, 7.0)).unwrap();
        assert!(uv.abs_diff_eq(Vec2::HALF, 1e-6));
    }

    #[test]
    fn test_round_trip_inside() {
        let bounds = WorldBounds::new(Vec3::new(-500.0, 20.0, 0.0), Vec3::new(1500.0, 820.0, 0.0));
        for &(x, y) in &[(-499.0, 21.0), (0.0, 400.0), (1234.5, 777.7), (1499.0, 819.0)] {
            let point = Vec3::new(x, y, 0.0);
            let uv = bounds.project(point).unwrap();
            assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y));
            let back = bounds.unproject(uv);
            assert!((back.x - x).abs() < 1e-2, "x: {} vs {}", back.x, x);
            assert!((back.y - y).abs() < 1e-2, "y: {} vs {}", back.y, y);
        }
    }

    #[test]
    fn test_outside_and_edges_fail() {
        let bounds = WorldBounds::square(0.0, 100.0);
        assert!(bounds.project(Vec3::new(-1.0, 50.0, 0.0)).is_none());
        assert!(bounds.project(Vec3::new(50.0, 101.0, 0.0)).is_none());
        assert!(bounds.project(Vec3::new(0.0, 50.0, 0.0)).is_none());
        assert!(bounds.project(Vec3::new(100.0, 50.0, 0.0)).is_none());
    }

    #[test]
    fn test_degenerate_bounds_fail() {
        let flat = WorldBounds::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.00005, 100.0, 0.0));
        assert!(flat.is_degenerate());
        assert!(flat.project(Vec3::new(0.00002, 50.0, 0.0)).is_none());
    }

    #[test]
    fn test_missing_layer_fails() {
        assert!(world_to_map_uv(None, Vec3::ZERO).is_none());
    }
}
