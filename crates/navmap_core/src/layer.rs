//! # Map Layers
//!
//! A layer is a map texture plus the world rectangle it depicts. The
//! selector keeps every layer sorted by descending priority (stable, so
//! ties keep catalog order) and picks the first one containing the player.
//!
//! ## Example
//!
//! ```text
//! priority 100  Dungeon_Floor1   [small box inside the overworld]
//! priority   0  Overworld        [whole world]
//!
//! player inside the dungeon box   -> Dungeon_Floor1
//! player anywhere else            -> Overworld
//! player outside both             -> none (minimap idles)
//! ```

use navmap_shared::{TextureHandle, Vec3};
use serde::{Deserialize, Serialize};

use crate::bounds::WorldBounds;
use crate::error::{NavError, NavResult};
use crate::events::{EventSender, NavEvent};

/// Identity of a loaded layer (its slot in priority order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// Host-provided layer definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerDefinition {
    /// Display / log name.
    pub name: String,
    /// Map texture for this layer.
    pub texture: TextureHandle,
    /// Minimum world corner.
    pub bounds_min: Vec3,
    /// Maximum world corner.
    pub bounds_max: Vec3,
    /// Selection priority. Higher wins.
    #[serde(default)]
    pub priority: i32,
}

impl LayerDefinition {
    /// Creates a definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        texture: TextureHandle,
        bounds_min: Vec3,
        bounds_max: Vec3,
        priority: i32,
    ) -> Self {
        Self {
            name: name.into(),
            texture,
            bounds_min,
            bounds_max,
            priority,
        }
    }

    /// World rectangle of this definition.
    #[must_use]
    pub const fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.bounds_min, self.bounds_max)
    }

    /// Rejects bounds with (near) zero planar extent.
    ///
    /// # Errors
    ///
    /// [`NavError::DegenerateBounds`] naming the layer.
    pub fn validate(&self) -> NavResult<()> {
        let bounds = self.bounds();
        if bounds.is_degenerate() {
            let extent = bounds.extent();
            return Err(NavError::DegenerateBounds {
                layer: self.name.clone(),
                extent_x: extent.x,
                extent_y: extent.y,
            });
        }
        Ok(())
    }
}

/// A list of layer definitions, as parsed from TOML.
///
/// ```toml
/// [[layers]]
/// name = "overworld"
/// texture = 1
/// bounds_min = { x = -50000.0, y = -50000.0 }
/// bounds_max = { x = 50000.0, y = 50000.0 }
/// priority = 0
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerCatalog {
    /// All definitions, in catalog order.
    #[serde(default)]
    pub layers: Vec<LayerDefinition>,
}

impl LayerCatalog {
    /// Parses a catalog from TOML text.
    ///
    /// Unlike [`LayerSelector::load_layers`], which only warns, a catalog
    /// file with degenerate bounds is rejected.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidConfig`] if the text is not a valid catalog, or
    /// [`NavError::DegenerateBounds`] for the first unusable layer.
    pub fn from_toml_str(text: &str) -> NavResult<Self> {
        let catalog: Self = toml::from_str(text)?;
        for definition in &catalog.layers {
            definition.validate()?;
        }
        Ok(catalog)
    }
}

/// A loaded, immutable map layer.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayer {
    /// Identity within the selector.
    pub id: LayerId,
    /// Display / log name.
    pub name: String,
    /// Map texture.
    pub texture: TextureHandle,
    /// World rectangle the texture depicts.
    pub bounds: WorldBounds,
    /// Selection priority.
    pub priority: i32,
}

/// Result of a reselect that changed the active layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerChange {
    /// Layer active before the change.
    pub previous: Option<LayerId>,
    /// Layer active after the change.
    pub current: Option<LayerId>,
}

/// Picks the active minimap layer for the tracked position.
pub struct LayerSelector {
    /// Layers sorted by descending priority.
    layers: Vec<MapLayer>,
    /// Active layer.
    current: Option<LayerId>,
    /// Position passed to the last reselect.
    last_position: Option<Vec3>,
    events: EventSender,
}

impl LayerSelector {
    /// Creates an empty selector publishing changes on `events`.
    #[must_use]
    pub fn new(events: EventSender) -> Self {
        Self {
            layers: Vec::new(),
            current: None,
            last_position: None,
            events,
        }
    }

    /// Replaces the layer list.
    ///
    /// Layers are stable-sorted by descending priority once, here. The
    /// active layer is reselected at the last known position and
    /// [`NavEvent::LayerChanged`] is published at most once, only if the
    /// active layer differs from before the reload. Returns the number of
    /// layers loaded.
    pub fn load_layers(&mut self, definitions: impl IntoIterator<Item = LayerDefinition>) -> usize {
        let previous = self.current_layer().cloned();

        let mut sorted: Vec<LayerDefinition> = definitions.into_iter().collect();
        sorted.sort_by_key(|def| std::cmp::Reverse(def.priority));

        self.layers = sorted
            .into_iter()
            .zip(0u32..)
            .map(|(def, slot)| {
                if let Err(err) = def.validate() {
                    tracing::warn!("{}, it will never project", err);
                }
                let bounds = def.bounds();
                MapLayer {
                    id: LayerId(slot),
                    name: def.name,
                    texture: def.texture,
                    bounds,
                    priority: def.priority,
                }
            })
            .collect();

        tracing::info!("loaded {} map layers", self.layers.len());

        // Old ids point into the previous list.
        self.current = self.last_position.and_then(|position| self.best_for(position));
        if self.current_layer() != previous.as_ref() {
            self.announce();
        }

        self.layers.len()
    }

    /// Recomputes the active layer for `position`.
    ///
    /// Returns the transition when the active layer changed, after
    /// publishing [`NavEvent::LayerChanged`].
    pub fn reselect(&mut self, position: Vec3) -> Option<LayerChange> {
        self.last_position = Some(position);

        let best = self.best_for(position);
        if best == self.current {
            return None;
        }
        let change = LayerChange {
            previous: self.current,
            current: best,
        };
        self.current = best;
        self.announce();
        Some(change)
    }

    fn best_for(&self, position: Vec3) -> Option<LayerId> {
        // Sorted by priority: the first hit is the best one.
        self.layers
            .iter()
            .find(|layer| layer.bounds.contains_xy(position))
            .map(|layer| layer.id)
    }

    fn announce(&self) {
        let name = self.current_layer().map(|layer| layer.name.clone());
        tracing::info!(
            "minimap layer changed to: {}",
            name.as_deref().unwrap_or("None")
        );
        self.events.send(NavEvent::LayerChanged {
            layer: self.current,
            name,
        });
    }

    /// The active layer, if any.
    #[must_use]
    pub fn current_layer(&self) -> Option<&MapLayer> {
        self.current.and_then(|id| self.layer(id))
    }

    /// Id of the active layer, if any.
    #[must_use]
    pub const fn current_id(&self) -> Option<LayerId> {
        self.current
    }

    /// Looks a layer up by id.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&MapLayer> {
        self.layers.get(id.0 as usize)
    }

    /// All layers in priority order.
    #[must_use]
    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    /// Position passed to the last reselect.
    #[must_use]
    pub const fn last_position(&self) -> Option<Vec3> {
        self.last_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;

    fn def(name: &str, priority: i32, min: f32, max: f32) -> LayerDefinition {
        LayerDefinition::new(
            name,
            TextureHandle::new(priority.unsigned_abs()),
            Vec3::new(min, min, 0.0),
            Vec3::new(max, max, 0.0),
            priority,
        )
    }

    #[test]
    fn test_priority_selection() {
        let bus = EventBus::new();
        let mut selector = LayerSelector::new(bus.sender());
        selector.load_layers(vec![def("B", 5, 0.0, 100.0), def("A", 10, 0.0, 50.0)]);

        selector.reselect(Vec3::new(25.0, 25.0, 0.0));
        assert_eq!(selector.current_layer().map(|l| l.name.as_str()), Some("A"));

        selector.reselect(Vec3::new(75.0, 75.0, 0.0));
        assert_eq!(selector.current_layer().map(|l| l.name.as_str()), Some("B"));

        selector.reselect(Vec3::new(200.0, 200.0, 0.0));
        assert!(selector.current_layer().is_none());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let bus = EventBus::new();
        let mut selector = LayerSelector::new(bus.sender());
        selector.load_layers(vec![
            def("first", 1, 0.0, 100.0),
            def("second", 1, 0.0, 100.0),
            def("low", 0, 0.0, 100.0),
        ]);
        let names: Vec<_> = selector.layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "low"]);

        selector.reselect(Vec3::new(10.0, 10.0, 0.0));
        assert_eq!(selector.current_layer().map(|l| l.name.as_str()), Some("first"));
    }

    #[test]
    fn test_change_emitted_only_on_transition() {
        let bus = EventBus::new();
        let receiver = bus.receiver();
        let mut selector = LayerSelector::new(bus.sender());
        selector.load_layers(vec![def("only", 0, 0.0, 100.0)]);

        let change = selector.reselect(Vec3::new(10.0, 10.0, 0.0)).unwrap();
        assert_eq!(change.previous, None);
        assert_eq!(change.current, Some(LayerId(0)));
        assert!(selector.reselect(Vec3::new(20.0, 20.0, 0.0)).is_none());

        let change = selector.reselect(Vec3::new(-5.0, 10.0, 0.0)).unwrap();
        assert_eq!(change.current, None);

        let events = receiver.drain();
        assert_eq!(
            events,
            vec![
                NavEvent::LayerChanged {
                    layer: Some(LayerId(0)),
                    name: Some("only".to_string()),
                },
                NavEvent::LayerChanged {
                    layer: None,
                    name: None,
                },
            ]
        );
    }

    #[test]
    fn test_reload_announces_at_most_once() {
        let bus = EventBus::new();
        let receiver = bus.receiver();
        let mut selector = LayerSelector::new(bus.sender());
        selector.load_layers(vec![def("world", 0, 0.0, 100.0)]);
        selector.reselect(Vec3::new(10.0, 10.0, 0.0));
        receiver.drain();

        // Same catalog: the active layer is unchanged, nothing to announce.
        selector.load_layers(vec![def("world", 0, 0.0, 100.0)]);
        assert_eq!(selector.current_layer().map(|l| l.name.as_str()), Some("world"));
        assert!(!receiver.has_events());

        // A higher priority layer now covers the player: one event, no
        // intermediate `None`.
        selector.load_layers(vec![def("world", 0, 0.0, 100.0), def("town", 5, 0.0, 50.0)]);
        assert_eq!(
            receiver.drain(),
            vec![NavEvent::LayerChanged {
                layer: Some(LayerId(0)),
                name: Some("town".to_string()),
            }]
        );

        // Nothing covers the player any more.
        selector.load_layers(vec![def("far", 0, 500.0, 600.0)]);
        assert!(selector.current_layer().is_none());
        assert_eq!(
            receiver.drain(),
            vec![NavEvent::LayerChanged {
                layer: None,
                name: None,
            }]
        );
    }

    #[test]
    fn test_no_layers_is_valid() {
        let bus = EventBus::new();
        let mut selector = LayerSelector::new(bus.sender());
        assert!(selector.reselect(Vec3::ZERO).is_none());
        assert!(selector.current_layer().is_none());
        assert!(!bus.receiver().has_events());
    }

    #[test]
    fn test_catalog_from_toml() {
        let catalog = LayerCatalog::from_toml_str(
            r#"
            [[layers]]
            name = "overworld"
            texture = 1
            bounds_min = { x = -100.0, y = -100.0 }
            bounds_max = { x = 100.0, y = 100.0 }

            [[layers]]
            name = "cave"
            texture = 2
            bounds_min = { x = 0.0, y = 0.0, z = -50.0 }
            bounds_max = { x = 10.0, y = 10.0, z = 0.0 }
            priority = 100
            "#,
        )
        .unwrap();
        assert_eq!(catalog.layers.len(), 2);
        assert_eq!(catalog.layers[0].priority, 0);
        assert_eq!(catalog.layers[1].texture, TextureHandle::new(2));

        assert!(matches!(
            LayerCatalog::from_toml_str("[[layers]]\nname = 3"),
            Err(NavError::InvalidConfig(_))
        ));

        let flat = LayerCatalog::from_toml_str(
            r#"
            [[layers]]
            name = "flat"
            texture = 1
            bounds_min = { x = 0.0, y = 5.0 }
            bounds_max = { x = 10.0, y = 5.0 }
            "#,
        );
        assert!(matches!(flat, Err(NavError::DegenerateBounds { .. })));
    }
}
