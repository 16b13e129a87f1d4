//! # Navigation Component
//!
//! Per-character glue: on spawn it claims the minimap for the local player
//! and registers the character's marker; on despawn it undoes both.
//!
//! ```text
//! begin_play ──> locally controlled? ──> set_tracked_player
//!            └─> not a dedicated server? ──> register marker (once)
//! end_play   ──> unregister marker ──> owned tracking? ──> clear it
//! ```

use std::sync::Arc;

use navmap_core::{EntityId, EntitySource, MarkerId, MarkerVisualConfig};
use navmap_shared::PLAYERS_LAYER;

use crate::subsystem::NavigationSubsystem;

/// How the current process takes part in the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NetMode {
    /// Single player.
    #[default]
    Standalone,
    /// Client.
    Client,
    /// Server with a local player.
    ListenServer,
    /// Server without any local player. Draws no maps.
    DedicatedServer,
}

/// Marker lifecycle for one character.
#[derive(Clone, Debug)]
pub struct NavigationComponent {
    marker_config: Option<Arc<MarkerVisualConfig>>,
    layer_name: String,
    owner: Option<EntityId>,
    marker_id: MarkerId,
}

impl NavigationComponent {
    /// Creates a component with the default "Players" layer tag.
    #[must_use]
    pub fn new(marker_config: Option<Arc<MarkerVisualConfig>>) -> Self {
        Self {
            marker_config,
            layer_name: PLAYERS_LAYER.to_owned(),
            owner: None,
            marker_id: MarkerId::INVALID,
        }
    }

    /// Overrides the layer tag.
    #[must_use]
    pub fn with_layer_name(mut self, layer_name: impl Into<String>) -> Self {
        self.layer_name = layer_name.into();
        self
    }

    /// Layer tag used for the character marker.
    #[must_use]
    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    /// The character marker, or [`MarkerId::INVALID`] if not registered.
    #[must_use]
    pub const fn marker_id(&self) -> MarkerId {
        self.marker_id
    }

    /// Whether this process shows character markers at all.
    #[must_use]
    pub fn should_register_marker(net_mode: NetMode) -> bool {
        net_mode != NetMode::DedicatedServer
    }

    /// Spawn hook for the owning character.
    pub fn begin_play(
        &mut self,
        subsystem: &mut NavigationSubsystem,
        owner: EntityId,
        locally_controlled: bool,
        net_mode: NetMode,
        entities: &impl EntitySource,
    ) {
        self.owner = Some(owner);

        if locally_controlled {
            subsystem.set_tracked_player(Some(owner), entities);
            tracing::info!("local player {:?} assigned to navigation", owner);
        }

        if Self::should_register_marker(net_mode) {
            self.register_marker(subsystem, entities);
        }
    }

    /// Despawn hook for the owning character.
    pub fn end_play(&mut self, subsystem: &mut NavigationSubsystem, entities: &impl EntitySource) {
        self.unregister_marker(subsystem);

        if self.owner.is_some() && subsystem.tracked_player() == self.owner {
            subsystem.set_tracked_player(None, entities);
        }
        self.owner = None;
    }

    /// Registers the character marker unless it already is.
    pub fn register_marker(
        &mut self,
        subsystem: &mut NavigationSubsystem,
        entities: &impl EntitySource,
    ) {
        if self.marker_id.is_valid() {
            return;
        }
        let (Some(owner), Some(config)) = (self.owner, self.marker_config.clone()) else {
            tracing::warn!("cannot register character marker: owner or config is missing");
            return;
        };

        self.marker_id =
            subsystem.register_marker(Some(owner), Some(config), &self.layer_name, None, entities);
        if self.marker_id.is_valid() {
            tracing::info!("registered character marker for {:?} ({})", owner, self.marker_id);
        } else {
            tracing::warn!("subsystem rejected character marker for {:?}", owner);
        }
    }

    /// Removes the character marker, if registered.
    pub fn unregister_marker(&mut self, subsystem: &mut NavigationSubsystem) {
        if !self.marker_id.is_valid() {
            return;
        }
        subsystem.unregister_marker(self.marker_id);
        tracing::info!("unregistered character marker {}", self.marker_id);
        self.marker_id = MarkerId::INVALID;
    }
}
