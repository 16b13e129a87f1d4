//! Map material parameters.
//!
//! The host's map shader samples the layer texture around the player UV,
//! scaled by zoom and rotated by static + dynamic rotation. This module
//! produces those inputs; it does not own a shader.

use bytemuck::{Pod, Zeroable};
use navmap_shared::{TextureHandle, Vec2};

use crate::config::MinimapShape;
use crate::rotation::MapRotation;

/// Parameters for the minimap material, one set per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapMaterialParams {
    /// Active layer texture. `None` hides the map.
    pub texture: Option<TextureHandle>,
    /// Whether the map image should be drawn at all.
    pub visible: bool,
    /// Player position in layer UV.
    pub player_uv: Vec2,
    /// Viewer yaw in radians (rotation source applied).
    pub player_yaw_radians: f32,
    /// Static rotation in degrees.
    pub static_rotation: f32,
    /// Dynamic rotation in degrees, zero on a fixed map.
    pub dynamic_rotation: f32,
    /// Whether the map follows the viewer.
    pub rotate_map: bool,
    /// Magnification.
    pub zoom: f32,
    /// Clip shape.
    pub shape: MinimapShape,
}

impl MapMaterialParams {
    /// Parameters with the map hidden.
    #[must_use]
    pub fn hidden(zoom: f32, shape: MinimapShape) -> Self {
        Self {
            zoom,
            shape,
            ..Self::default()
        }
    }

    /// Parameters for a frame where the player projects onto `texture`.
    #[must_use]
    pub fn active(
        texture: TextureHandle,
        player_uv: Vec2,
        rotation: &MapRotation,
        zoom: f32,
        shape: MinimapShape,
    ) -> Self {
        Self {
            texture: Some(texture),
            visible: true,
            player_uv,
            player_yaw_radians: rotation.viewer_yaw.to_radians(),
            static_rotation: rotation.static_rotation,
            dynamic_rotation: rotation.dynamic_rotation(),
            rotate_map: rotation.rotate_map,
            zoom,
            shape,
        }
    }

    /// Total texture rotation in degrees.
    #[must_use]
    pub fn total_rotation(&self) -> f32 {
        self.static_rotation + self.dynamic_rotation
    }

    /// Packs the scalar parameters for a uniform buffer.
    #[must_use]
    pub fn to_uniform(&self) -> MapMaterialUniform {
        MapMaterialUniform {
            player_uv: self.player_uv.to_array(),
            player_yaw: self.player_yaw_radians,
            static_rotation: self.static_rotation.to_radians(),
            dynamic_rotation: self.dynamic_rotation.to_radians(),
            zoom: self.zoom,
            rotate_map: if self.rotate_map { 1.0 } else { 0.0 },
            circle: match self.shape {
                MinimapShape::Circle => 1.0,
                MinimapShape::Square => 0.0,
            },
        }
    }
}

/// GPU layout of [`MapMaterialParams`]. Angles in radians.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MapMaterialUniform {
    /// Player UV.
    pub player_uv: [f32; 2],
    /// Viewer yaw.
    pub player_yaw: f32,
    /// Static rotation.
    pub static_rotation: f32,
    /// Dynamic rotation.
    pub dynamic_rotation: f32,
    /// Magnification.
    pub zoom: f32,
    /// 1.0 when the map rotates.
    pub rotate_map: f32,
    /// 1.0 for a circular clip.
    pub circle: f32,
}

impl MapMaterialUniform {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Returns as bytes for GPU upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
