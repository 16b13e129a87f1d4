//! # Minimap Widget
//!
//! The initialization gate in front of the projection engine.
//!
//! ```text
//!                 initialize ok
//! Uninitialized ─────────────────> Active ──tick──> FrameLayout
//!       │                            │
//!       │ initialize failed          │ initialize failed
//!       v                            v
//!    Disabled <──────────────────────┘   (ticks do nothing, no retry)
//! ```
//!
//! Only an explicit call to
//! [`initialize_and_start_tracking`](MinimapWidget::initialize_and_start_tracking)
//! leaves `Disabled`.

use std::sync::Arc;

use navmap_core::{EntitySource, LayerId, MapLayer, MarkerId};
use navmap_shared::{TextureHandle, PLAYERS_LAYER};
use navmap_ui::{
    CanvasSizes, FrameInput, FrameLayout, MinimapConfig, MinimapShape, ProjectionEngine,
    ViewerState,
};

use crate::error::{NavigationError, NavigationResult};
use crate::subsystem::NavigationSubsystem;

/// Lifecycle of the widget gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidgetState {
    /// Never initialized.
    #[default]
    Uninitialized,
    /// Laying out every tick.
    Active,
    /// Initialization failed. Ticks are no-ops until re-initialized.
    Disabled,
}

/// A minimap plus compass, gated on explicit initialization.
#[derive(Debug, Default)]
pub struct MinimapWidget {
    state: WidgetState,
    engine: Option<ProjectionEngine>,
    canvas: CanvasSizes,
    player_marker: MarkerId,
    current_layer: Option<LayerId>,
    map_texture: Option<TextureHandle>,
    map_visible: bool,
}

impl MinimapWidget {
    /// Creates an uninitialized widget with the given canvas sizes.
    #[must_use]
    pub fn new(canvas: CanvasSizes) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    /// Validates `config`, binds to `subsystem` and registers the player's
    /// own marker when the config provides one.
    ///
    /// # Errors
    ///
    /// [`NavigationError::SubsystemUnavailable`] without a subsystem, or
    /// the config validation error. Either failure disables the widget.
    pub fn initialize_and_start_tracking(
        &mut self,
        config: MinimapConfig,
        subsystem: Option<&mut NavigationSubsystem>,
        entities: &impl EntitySource,
    ) -> NavigationResult<()> {
        match self.try_initialize(config, subsystem, entities) {
            Ok(()) => {
                self.state = WidgetState::Active;
                tracing::info!("minimap widget initialized");
                Ok(())
            }
            Err(err) => {
                self.state = WidgetState::Disabled;
                self.engine = None;
                self.player_marker = MarkerId::INVALID;
                tracing::warn!("minimap widget disabled: {}", err);
                Err(err)
            }
        }
    }

    fn try_initialize(
        &mut self,
        config: MinimapConfig,
        subsystem: Option<&mut NavigationSubsystem>,
        entities: &impl EntitySource,
    ) -> NavigationResult<()> {
        let subsystem = subsystem.ok_or(NavigationError::SubsystemUnavailable)?;
        let player_config = config.player_marker_config.clone();
        let engine = ProjectionEngine::new(config)?;

        self.player_marker = MarkerId::INVALID;
        if let (Some(player), Some(player_config)) = (subsystem.tracked_player(), player_config) {
            // Idempotent: a component may already have registered it.
            self.player_marker = subsystem.register_marker(
                Some(player),
                Some(Arc::new(player_config)),
                PLAYERS_LAYER,
                None,
                entities,
            );
        }

        self.engine = Some(engine);
        self.current_layer = None;
        self.on_layer_changed(subsystem.current_layer());
        Ok(())
    }

    /// Gate state.
    #[must_use]
    pub const fn state(&self) -> WidgetState {
        self.state
    }

    /// True once initialized and not disabled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == WidgetState::Active
    }

    /// Active configuration, including runtime overrides.
    #[must_use]
    pub fn config(&self) -> Option<&MinimapConfig> {
        self.engine.as_ref().map(ProjectionEngine::config)
    }

    /// Marker drawn as the player icon, once known.
    #[must_use]
    pub const fn player_marker(&self) -> MarkerId {
        self.player_marker
    }

    /// Texture of the active layer, if the map is shown.
    #[must_use]
    pub const fn map_texture(&self) -> Option<TextureHandle> {
        self.map_texture
    }

    /// Whether the map image is shown.
    #[must_use]
    pub const fn is_map_visible(&self) -> bool {
        self.map_visible
    }

    /// Changes the canvas sizes.
    pub fn set_canvas(&mut self, canvas: CanvasSizes) {
        self.canvas = canvas;
    }

    /// Changes the extra map rotation of this widget only.
    pub fn set_map_rotation_offset(&mut self, degrees: f32) {
        if let Some(engine) = &mut self.engine {
            engine.set_map_rotation_offset(degrees);
        }
    }

    /// Changes the clip shape of this widget only.
    pub fn set_minimap_shape(&mut self, shape: MinimapShape) {
        if let Some(engine) = &mut self.engine {
            engine.set_shape(shape);
        }
    }

    /// Applies a new active layer: swaps the texture and shows or hides
    /// the map.
    pub fn on_layer_changed(&mut self, layer: Option<&MapLayer>) {
        self.current_layer = layer.map(|l| l.id);
        self.map_texture = layer.map(|l| l.texture);
        self.map_visible = layer.is_some();
    }

    /// Lays out one frame.
    ///
    /// Returns `None` while gated or while the tracked player is missing.
    pub fn tick(
        &mut self,
        subsystem: &NavigationSubsystem,
        entities: &impl EntitySource,
    ) -> Option<FrameLayout> {
        if self.state != WidgetState::Active {
            return None;
        }
        let Some(player) = subsystem.tracked_player_state(entities) else {
            tracing::debug!("skipping minimap update: no valid tracked player");
            return None;
        };

        if subsystem.current_layer_id() != self.current_layer {
            self.on_layer_changed(subsystem.current_layer());
        }

        // The player marker may have been registered after init, or
        // replaced since.
        if subsystem.marker(self.player_marker).is_none() {
            self.player_marker = subsystem
                .tracked_player()
                .and_then(|id| subsystem.lookup_id_for_entity(id))
                .unwrap_or(MarkerId::INVALID);
        }

        let engine = self.engine.as_ref()?;
        let input = FrameInput {
            canvas: self.canvas,
            viewer: ViewerState::from(player),
            layer: subsystem.current_layer(),
            player_marker: self.player_marker,
        };
        Some(engine.layout(&input, subsystem.markers().all_active()))
    }
}
