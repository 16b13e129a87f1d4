//! # Navigation Subsystem
//!
//! One explicitly constructed service per game instance. Owns the layer
//! selector, the marker registry, the marker config library and the id of
//! the tracked player entity. Every consumer receives it by reference.
//!
//! ```text
//! tick(dt):
//!   1. tracked player valid?  -> reselect layer from its position
//!   2. registry.advance(dt)   -> refresh, expire, evict stale (one event)
//! ```

use std::sync::Arc;

use navmap_core::{
    EntityId, EntitySource, EntityState, EventBus, EventReceiver, LayerCatalog, LayerDefinition,
    LayerId, LayerSelector, MapLayer, Marker, MarkerConfigLibrary, MarkerId, MarkerRegistry,
    MarkerSnapshot, MarkerVisualConfig,
};
use navmap_shared::Vec3;

use crate::error::NavigationResult;

/// The navigation service.
pub struct NavigationSubsystem {
    events: EventBus,
    layers: LayerSelector,
    markers: MarkerRegistry,
    library: MarkerConfigLibrary,
    tracked_player: Option<EntityId>,
}

impl Default for NavigationSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationSubsystem {
    /// Creates an empty subsystem.
    #[must_use]
    pub fn new() -> Self {
        let events = EventBus::new();
        let layers = LayerSelector::new(events.sender());
        let markers = MarkerRegistry::new(events.sender());
        Self {
            events,
            layers,
            markers,
            library: MarkerConfigLibrary::new(),
            tracked_player: None,
        }
    }

    /// Builds a subsystem from a TOML layer catalog and a TOML marker
    /// config library.
    ///
    /// # Errors
    ///
    /// Fails if either document does not parse or a marker config is
    /// invalid.
    pub fn from_toml_str(layers: &str, markers: &str) -> NavigationResult<Self> {
        let catalog = LayerCatalog::from_toml_str(layers)?;
        let library = MarkerConfigLibrary::from_toml_str(markers)?;

        let mut subsystem = Self::new();
        subsystem.load_layers(catalog.layers);
        subsystem.set_marker_library(library);
        Ok(subsystem)
    }

    // =========================================================================
    // Layers
    // =========================================================================

    /// Replaces the map layers. Returns the number loaded.
    pub fn load_layers(&mut self, definitions: impl IntoIterator<Item = LayerDefinition>) -> usize {
        self.layers.load_layers(definitions)
    }

    /// The active layer, if any.
    #[must_use]
    pub fn current_layer(&self) -> Option<&MapLayer> {
        self.layers.current_layer()
    }

    /// Id of the active layer, if any.
    #[must_use]
    pub fn current_layer_id(&self) -> Option<LayerId> {
        self.layers.current_id()
    }

    /// The layer selector.
    #[must_use]
    pub const fn layers(&self) -> &LayerSelector {
        &self.layers
    }

    // =========================================================================
    // Tracked player
    // =========================================================================

    /// Sets or clears the entity the minimap follows.
    ///
    /// A valid entity triggers an immediate layer reselect from its
    /// position.
    pub fn set_tracked_player(&mut self, entity: Option<EntityId>, entities: &impl EntitySource) {
        self.tracked_player = entity;
        match entity {
            Some(id) => {
                tracing::info!("tracking player entity {:?}", id);
                if let Some(position) = entities.position(id) {
                    self.layers.reselect(position);
                }
            }
            None => tracing::warn!("stopped tracking player entity"),
        }
    }

    /// Id of the tracked player, valid or not.
    #[must_use]
    pub const fn tracked_player(&self) -> Option<EntityId> {
        self.tracked_player
    }

    /// Current state of the tracked player, if it is still valid.
    #[must_use]
    pub fn tracked_player_state(&self, entities: &impl EntitySource) -> Option<EntityState> {
        self.tracked_player.and_then(|id| entities.entity(id))
    }

    // =========================================================================
    // Markers
    // =========================================================================

    /// Replaces the named marker configs.
    pub fn set_marker_library(&mut self, library: MarkerConfigLibrary) {
        tracing::info!("loaded {} marker configs", library.len());
        self.library = library;
    }

    /// Named marker configs.
    #[must_use]
    pub const fn marker_library(&self) -> &MarkerConfigLibrary {
        &self.library
    }

    /// Registers a marker. See [`MarkerRegistry::register`].
    pub fn register_marker(
        &mut self,
        entity: Option<EntityId>,
        config: Option<Arc<MarkerVisualConfig>>,
        layer_name: &str,
        static_location: Option<Vec3>,
        entities: &impl EntitySource,
    ) -> MarkerId {
        self.markers
            .register(entity, config, layer_name, static_location, entities)
    }

    /// Registers a marker with a config from the library by name.
    pub fn register_named_marker(
        &mut self,
        config_name: &str,
        entity: Option<EntityId>,
        layer_name: &str,
        static_location: Option<Vec3>,
        entities: &impl EntitySource,
    ) -> MarkerId {
        self.markers.register_named(
            &self.library,
            config_name,
            entity,
            layer_name,
            static_location,
            entities,
        )
    }

    /// Removes a marker. Unknown ids are ignored.
    pub fn unregister_marker(&mut self, id: MarkerId) -> bool {
        self.markers.unregister(id)
    }

    /// Removes every marker tagged `layer_name`.
    pub fn unregister_marker_layer(&mut self, layer_name: &str) -> usize {
        self.markers.unregister_layer(layer_name)
    }

    /// Marker tracking `entity`, if any.
    #[must_use]
    pub fn lookup_id_for_entity(&self, entity: EntityId) -> Option<MarkerId> {
        self.markers.lookup_id_for_entity(entity)
    }

    /// A marker by id.
    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id)
    }

    /// Owned copy of the active markers.
    #[must_use]
    pub fn snapshot(&self) -> MarkerSnapshot {
        self.markers.snapshot()
    }

    /// The marker registry.
    #[must_use]
    pub const fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advances one host tick. Returns the number of markers removed.
    pub fn tick(&mut self, delta_time: f32, entities: &impl EntitySource) -> usize {
        if let Some(state) = self.tracked_player_state(entities) {
            self.layers.reselect(state.position);
        }
        self.markers.advance(delta_time, entities)
    }

    /// A receiver for layer and marker change notifications.
    #[must_use]
    pub fn events(&self) -> EventReceiver {
        self.events.receiver()
    }
}
