//! # Markers
//!
//! A marker is a positioned icon for an entity or a fixed point of
//! interest. Its appearance lives in a [`MarkerVisualConfig`] shared by
//! every marker of the same kind.

use std::collections::HashMap;
use std::sync::Arc;

use navmap_shared::{Color, TextureHandle, Vec2, Vec3, DEFAULT_MARKER_SIZE};
use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EntityState};
use crate::error::{NavError, NavResult};

/// Unique marker identifier, stable for the marker's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl MarkerId {
    /// The id returned by rejected registrations.
    pub const INVALID: Self = Self(0);

    /// Returns true unless this is [`MarkerId::INVALID`].
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Where a marker may be drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct VisibilityOptions {
    /// Drawn on the minimap panel.
    pub show_on_minimap: bool,
    /// Drawn on the full-screen map.
    pub show_on_full_map: bool,
    /// Drawn on the compass ring.
    pub show_on_compass: bool,
}

impl VisibilityOptions {
    /// Visible everywhere.
    pub const ALL: Self = Self {
        show_on_minimap: true,
        show_on_full_map: true,
        show_on_compass: true,
    };

    /// Minimap only.
    pub const MINIMAP: Self = Self {
        show_on_minimap: true,
        show_on_full_map: false,
        show_on_compass: false,
    };

    /// Compass only.
    pub const COMPASS: Self = Self {
        show_on_minimap: false,
        show_on_full_map: false,
        show_on_compass: true,
    };
}

/// Field-of-view cone drawn by the directional indicator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewCone {
    /// Cone aperture in degrees.
    pub angle: f32,
    /// Normalized cone length (0-1).
    pub distance: f32,
}

/// Shared appearance and behavior of a kind of marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerVisualConfig {
    /// Non-rotating identifier icon.
    pub identifier_icon: Option<TextureHandle>,
    /// Rotating direction icon. `None` hides the indicator.
    pub directional_indicator_icon: Option<TextureHandle>,
    /// Rotation pivot of the indicator in normalized widget space.
    pub indicator_pivot: Vec2,
    /// Widget size in canvas pixels.
    pub size: Vec2,
    /// Tint.
    pub color: Color,
    /// Where the marker may be drawn.
    pub visibility: VisibilityOptions,
    /// Seconds before the marker expires. 0 means it never does.
    pub lifetime: f32,
    /// Optional view cone parameters for the indicator.
    pub view_cone: Option<ViewCone>,
}

impl Default for MarkerVisualConfig {
    fn default() -> Self {
        Self {
            identifier_icon: None,
            directional_indicator_icon: None,
            indicator_pivot: Vec2::HALF,
            size: Vec2::splat(DEFAULT_MARKER_SIZE),
            color: Color::WHITE,
            visibility: VisibilityOptions::default(),
            lifetime: 0.0,
            view_cone: None,
        }
    }
}

impl MarkerVisualConfig {
    /// Checks pivot, size and lifetime.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> NavResult<()> {
        let pivot = self.indicator_pivot;
        if !(0.0..=1.0).contains(&pivot.x) || !(0.0..=1.0).contains(&pivot.y) {
            return Err(NavError::InvalidPivot {
                x: pivot.x,
                y: pivot.y,
            });
        }
        if !(self.size.x > 0.0 && self.size.y > 0.0) {
            return Err(NavError::InvalidSize {
                width: self.size.x,
                height: self.size.y,
            });
        }
        if !self.lifetime.is_finite() || self.lifetime < 0.0 {
            return Err(NavError::InvalidLifetime(self.lifetime));
        }
        Ok(())
    }

    /// True if markers of this kind expire on their own.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.lifetime > 0.0
    }
}

/// A live marker, owned by the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Unique id.
    pub id: MarkerId,
    /// Entity this marker follows, if any. Never owned.
    pub tracked_entity: Option<EntityId>,
    /// World position. Refreshed every tick while tracking.
    pub world_location: Vec3,
    /// Actor yaw of the tracked entity as of the last refresh.
    pub facing_yaw: Option<f32>,
    /// Shared appearance.
    pub config: Arc<MarkerVisualConfig>,
    /// Logical grouping tag ("Quests", "Players", "Pings", ...).
    pub layer_name: String,
    /// Seconds left for temporary markers.
    pub remaining_lifetime: f32,
}

impl Marker {
    /// True if the marker follows an entity.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracked_entity.is_some()
    }

    /// Copies position and facing from a live entity.
    pub fn refresh_from(&mut self, state: &EntityState) {
        self.world_location = state.position;
        self.facing_yaw = Some(state.actor_yaw);
    }
}

#[derive(Deserialize)]
struct LibraryFile {
    #[serde(default)]
    markers: HashMap<String, MarkerVisualConfig>,
}

/// Name-keyed table of marker configs.
///
/// ```toml
/// [markers.ping]
/// lifetime = 5.0
/// visibility = { show_on_minimap = true, show_on_compass = true }
///
/// [markers.party]
/// size = { x = 24.0, y = 24.0 }
/// indicator_pivot = { x = 0.5, y = 0.0 }
/// ```
#[derive(Clone, Debug, Default)]
pub struct MarkerConfigLibrary {
    configs: HashMap<String, Arc<MarkerVisualConfig>>,
}

impl MarkerConfigLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a library from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or on the first invalid config.
    pub fn from_toml_str(text: &str) -> NavResult<Self> {
        let file: LibraryFile = toml::from_str(text)?;
        let mut library = Self::new();
        for (name, config) in file.markers {
            library.insert(name, config)?;
        }
        Ok(library)
    }

    /// Validates and stores a config, returning the shared handle.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the library is left unchanged.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        config: MarkerVisualConfig,
    ) -> NavResult<Arc<MarkerVisualConfig>> {
        config.validate()?;
        let shared = Arc::new(config);
        self.configs.insert(name.into(), Arc::clone(&shared));
        Ok(shared)
    }

    /// Looks a config up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<MarkerVisualConfig>> {
        self.configs.get(name).cloned()
    }

    /// Looks a config up by name, failing on unknown names.
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownConfig`] if `name` is not in the library.
    pub fn require(&self, name: &str) -> NavResult<Arc<MarkerVisualConfig>> {
        self.get(name)
            .ok_or_else(|| NavError::UnknownConfig(name.to_owned()))
    }

    /// Number of configs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// True if the library holds no configs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
