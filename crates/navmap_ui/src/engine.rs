//! # Projection Engine
//!
//! Turns one frame of navigation state into screen-space layout.
//!
//! ```text
//! FrameInput ──┬──> player UV ── fails ──> map hidden, nothing placed
//!              │
//!              └──> MapRotation ──┬──> material params
//!                                 ├──> player icon (canvas center)
//!                                 ├──> minimap pass (per visible marker)
//!                                 └──> compass pass (per visible marker)
//! ```
//!
//! Layout is pure: the same input always yields the same [`FrameLayout`].

use navmap_core::{world_to_map_uv, EntityState, MapLayer, Marker, MarkerId};
use navmap_shared::{Vec2, Vec3};

use crate::compass::CompassPass;
use crate::config::{MinimapConfig, MinimapShape};
use crate::error::UiResult;
use crate::material::MapMaterialParams;
use crate::minimap::MinimapPass;
use crate::placement::PlacedMarker;
use crate::rotation::MapRotation;

/// Position and both yaw candidates of the tracked viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewerState {
    /// World position.
    pub position: Vec3,
    /// Aim / camera yaw in degrees.
    pub control_yaw: f32,
    /// Body facing yaw in degrees.
    pub actor_yaw: f32,
}

impl From<EntityState> for ViewerState {
    fn from(state: EntityState) -> Self {
        Self {
            position: state.position,
            control_yaw: state.control_yaw,
            actor_yaw: state.actor_yaw,
        }
    }
}

/// Canvas sizes in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSizes {
    /// Minimap panel.
    pub minimap: Vec2,
    /// Compass ring canvas.
    pub compass: Vec2,
}

impl Default for CanvasSizes {
    fn default() -> Self {
        Self {
            minimap: Vec2::splat(256.0),
            compass: Vec2::splat(512.0),
        }
    }
}

/// Everything one layout pass reads.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    /// Canvas sizes.
    pub canvas: CanvasSizes,
    /// Tracked viewer.
    pub viewer: ViewerState,
    /// Active layer, if any.
    pub layer: Option<&'a MapLayer>,
    /// Id of the viewer's own marker. [`MarkerId::INVALID`] if none.
    pub player_marker: MarkerId,
}

/// Output of one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameLayout {
    /// False when the viewer is not on any layer. Nothing is placed then.
    pub map_active: bool,
    /// Map shader inputs.
    pub material: MapMaterialParams,
    /// The viewer's own icon, always at the minimap center.
    pub player: Option<PlacedMarker>,
    /// Minimap placements, sorted by marker id.
    pub minimap: Vec<PlacedMarker>,
    /// Compass placements, sorted by marker id.
    pub compass: Vec<PlacedMarker>,
    /// Rotation of the compass ring image in degrees.
    pub compass_ring_angle: f32,
}

impl FrameLayout {
    /// Minimap placement of `id`, if placed this frame.
    #[must_use]
    pub fn minimap_marker(&self, id: MarkerId) -> Option<&PlacedMarker> {
        self.minimap.iter().find(|placed| placed.id == id)
    }

    /// Compass placement of `id`, if placed this frame.
    #[must_use]
    pub fn compass_marker(&self, id: MarkerId) -> Option<&PlacedMarker> {
        self.compass.iter().find(|placed| placed.id == id)
    }
}

/// Per-frame minimap and compass layout.
#[derive(Clone, Debug, Default)]
pub struct ProjectionEngine {
    config: MinimapConfig,
}

impl ProjectionEngine {
    /// Creates an engine from a validated copy of `config`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting in `config`.
    pub fn new(config: MinimapConfig) -> UiResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &MinimapConfig {
        &self.config
    }

    /// Changes the extra map rotation, in degrees.
    pub fn set_map_rotation_offset(&mut self, degrees: f32) {
        self.config.map_rotation_offset = degrees;
    }

    /// Changes the panel clip shape.
    pub fn set_shape(&mut self, shape: MinimapShape) {
        self.config.shape = shape;
    }

    /// Lays out one frame.
    ///
    /// `markers` is the registry snapshot; order does not matter. If the
    /// viewer does not project onto the active layer the map is hidden and
    /// no marker is placed on either canvas.
    pub fn layout<'m>(
        &self,
        input: &FrameInput<'_>,
        markers: impl IntoIterator<Item = &'m Marker>,
    ) -> FrameLayout {
        let config = &self.config;
        let rotation = MapRotation::resolve(config, &input.viewer);

        let (Some(layer), Some(player_uv)) = (
            input.layer,
            world_to_map_uv(input.layer, input.viewer.position),
        ) else {
            if config.show_debug_messages {
                tracing::debug!(
                    "viewer at ({:.1}, {:.1}) is off the active layer, skipping layout",
                    input.viewer.position.x,
                    input.viewer.position.y
                );
            }
            return FrameLayout {
                map_active: false,
                material: MapMaterialParams::hidden(config.zoom, config.shape),
                compass_ring_angle: rotation.compass_ring_angle(),
                ..FrameLayout::default()
            };
        };

        let minimap = MinimapPass {
            layer,
            player_uv,
            canvas: input.canvas.minimap,
            zoom: config.zoom,
            rotation,
            shape: config.shape,
            clamp_to_edge: config.clamp_markers_to_edge,
        };
        let compass = CompassPass {
            player: input.viewer.position,
            canvas: input.canvas.compass,
            radius: config.compass_marker_radius,
            rotation,
        };

        let mut layout = FrameLayout {
            map_active: true,
            material: MapMaterialParams::active(
                layer.texture,
                player_uv,
                &rotation,
                config.zoom,
                config.shape,
            ),
            compass_ring_angle: rotation.compass_ring_angle(),
            ..FrameLayout::default()
        };

        for marker in markers {
            if input.player_marker.is_valid() && marker.id == input.player_marker {
                layout.player = Some(PlacedMarker::new(
                    marker.id,
                    marker.config.clone(),
                    minimap.center(),
                    rotation.player_indicator_angle(),
                    false,
                ));
                continue;
            }

            let visibility = marker.config.visibility;
            if visibility.show_on_minimap {
                if let Some(placed) = minimap.place(marker) {
                    layout.minimap.push(placed);
                }
            }
            if config.compass_enabled && visibility.show_on_compass {
                layout.compass.push(compass.place(marker));
            }
        }

        layout.minimap.sort_by_key(|placed| placed.id);
        layout.compass.sort_by_key(|placed| placed.id);

        if config.show_debug_messages {
            tracing::debug!(
                "layout on '{}': player uv ({:.3}, {:.3}), {} minimap, {} compass",
                layer.name,
                player_uv.x,
                player_uv.y,
                layout.minimap.len(),
                layout.compass.len()
            );
        }

        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use navmap_core::{LayerId, MarkerVisualConfig, VisibilityOptions, WorldBounds};
    use navmap_shared::TextureHandle;

    use crate::config::MapAlignment;

    fn layer() -> MapLayer {
        MapLayer {
            id: LayerId(0),
            name: "overworld".to_string(),
            texture: TextureHandle::new(9),
            bounds: WorldBounds::square(-1000.0, 1000.0),
            priority: 0,
        }
    }

    fn marker(id: u64, x: f32, y: f32, visibility: VisibilityOptions) -> Marker {
        Marker {
            id: MarkerId(id),
            tracked_entity: None,
            world_location: Vec3::new(x, y, 0.0),
            facing_yaw: None,
            config: Arc::new(MarkerVisualConfig {
                visibility,
                ..Default::default()
            }),
            layer_name: "Quests".to_string(),
            remaining_lifetime: 0.0,
        }
    }

    fn input(layer: Option<&MapLayer>, viewer: ViewerState) -> FrameInput<'_> {
        FrameInput {
            canvas: CanvasSizes {
                minimap: Vec2::splat(200.0),
                compass: Vec2::splat(400.0),
            },
            viewer,
            layer,
            player_marker: MarkerId(1),
        }
    }

    #[test]
    fn test_player_marker_always_centered() {
        let layer = layer();
        let engine = ProjectionEngine::default();
        let viewer = ViewerState {
            position: Vec3::new(300.0, -200.0, 0.0),
            control_yaw: 0.0,
            actor_yaw: 30.0,
        };
        // The player marker's stored location is stale on purpose.
        let markers = [marker(1, -900.0, 900.0, VisibilityOptions::ALL)];

        let layout = engine.layout(&input(Some(&layer), viewer), &markers);
        let player = layout.player.unwrap();
        assert_eq!(player.target, Vec2::new(100.0, 100.0));
        assert_eq!(player.angle, 30.0);
        assert!(layout.minimap.is_empty());
        assert!(layout.compass.is_empty());
    }

    #[test]
    fn test_player_icon_points_up_on_rotating_map() {
        let layer = layer();
        let engine = ProjectionEngine::new(MinimapConfig {
            rotate_map: true,
            ..Default::default()
        })
        .unwrap();
        let viewer = ViewerState {
            actor_yaw: 135.0,
            ..Default::default()
        };
        let markers = [marker(1, 0.0, 0.0, VisibilityOptions::ALL)];

        let layout = engine.layout(&input(Some(&layer), viewer), &markers);
        assert_eq!(layout.player.unwrap().angle, 0.0);
        assert_eq!(layout.material.dynamic_rotation, 135.0);
    }

    #[test]
    fn test_static_north_up_needs_no_rotation() {
        let layer = layer();
        let engine = ProjectionEngine::new(MinimapConfig {
            rotate_map: false,
            alignment: MapAlignment::ForwardPlusX,
            map_rotation_offset: 0.0,
            zoom: 1.0,
            ..Default::default()
        })
        .unwrap();
        let viewer = ViewerState::default();
        let south = marker(2, -200.0, 0.0, VisibilityOptions::MINIMAP);

        let layout = engine.layout(&input(Some(&layer), viewer), [&south]);
        let placed = layout.minimap_marker(MarkerId(2)).unwrap();

        // Raw UV delta is (0, +0.1); scaled by the canvas it is (0, 20).
        let offset = placed.target - Vec2::splat(100.0);
        assert!(offset.abs_diff_eq(Vec2::new(0.0, 20.0), 1e-3));
    }

    #[test]
    fn test_visibility_filters_each_pass() {
        let layer = layer();
        let engine = ProjectionEngine::default();
        let markers = [
            marker(4, 10.0, 10.0, VisibilityOptions::COMPASS),
            marker(3, 10.0, 10.0, VisibilityOptions::MINIMAP),
            marker(2, 10.0, 10.0, VisibilityOptions::ALL),
            marker(5, 10.0, 10.0, VisibilityOptions::default()),
        ];

        let layout = engine.layout(&input(Some(&layer), ViewerState::default()), &markers);
        let minimap: Vec<_> = layout.minimap.iter().map(|p| p.id.0).collect();
        let compass: Vec<_> = layout.compass.iter().map(|p| p.id.0).collect();
        assert_eq!(minimap, [2, 3]);
        assert_eq!(compass, [2, 4]);
        assert!(layout.player.is_none());
    }

    #[test]
    fn test_compass_disabled() {
        let layer = layer();
        let engine = ProjectionEngine::new(MinimapConfig {
            compass_enabled: false,
            ..Default::default()
        })
        .unwrap();
        let markers = [marker(2, 10.0, 10.0, VisibilityOptions::ALL)];
        let layout = engine.layout(&input(Some(&layer), ViewerState::default()), &markers);
        assert_eq!(layout.minimap.len(), 1);
        assert!(layout.compass.is_empty());
    }

    #[test]
    fn test_off_layer_viewer_skips_everything() {
        let layer = layer();
        let engine = ProjectionEngine::default();
        let viewer = ViewerState {
            position: Vec3::new(5000.0, 0.0, 0.0),
            ..Default::default()
        };
        let markers = [
            marker(1, 0.0, 0.0, VisibilityOptions::ALL),
            marker(2, 10.0, 10.0, VisibilityOptions::ALL),
        ];

        for layer in [Some(&layer), None] {
            let layout = engine.layout(&input(layer, viewer), &markers);
            assert!(!layout.map_active);
            assert!(!layout.material.visible);
            assert!(layout.player.is_none());
            assert!(layout.minimap.is_empty());
            assert!(layout.compass.is_empty());
        }
    }

    #[test]
    fn test_runtime_overrides() {
        let mut engine = ProjectionEngine::default();
        engine.set_map_rotation_offset(45.0);
        engine.set_shape(MinimapShape::Square);
        assert_eq!(engine.config().static_rotation(), 45.0);
        assert_eq!(engine.config().shape, MinimapShape::Square);

        let layer = layer();
        let layout = engine.layout(&input(Some(&layer), ViewerState::default()), std::iter::empty());
        assert_eq!(layout.compass_ring_angle, -45.0);
        assert_eq!(layout.material.shape, MinimapShape::Square);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MinimapConfig {
            zoom: -1.0,
            ..Default::default()
        };
        assert!(ProjectionEngine::new(config).is_err());
    }
}
