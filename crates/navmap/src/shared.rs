//! # Thread-Shared Navigation
//!
//! For hosts that touch navigation from more than one thread. Every
//! mutation goes through one mutex, so the registry's two indices never
//! disagree, and readers get owned copies that later mutations cannot
//! invalidate.
//!
//! ```text
//! game thread ──tick/register──┐
//!                              ├──> Mutex<NavigationSubsystem>
//! ui thread ────snapshot───────┘          │
//!                                         └──> MarkerSnapshot (copy-out)
//! ```

use std::sync::Arc;

use navmap_core::{EntityId, EntitySource, MapLayer, MarkerId, MarkerSnapshot, MarkerVisualConfig};
use navmap_shared::Vec3;
use parking_lot::{Mutex, MutexGuard};

use crate::subsystem::NavigationSubsystem;

/// A cloneable, lock-guarded handle to one [`NavigationSubsystem`].
#[derive(Clone)]
pub struct SharedNavigation {
    inner: Arc<Mutex<NavigationSubsystem>>,
}

impl SharedNavigation {
    /// Wraps `subsystem`.
    #[must_use]
    pub fn new(subsystem: NavigationSubsystem) -> Self {
        Self {
            inner: Arc::new(Mutex::new(subsystem)),
        }
    }

    /// Locks the subsystem for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, NavigationSubsystem> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut NavigationSubsystem) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Advances one host tick. Returns the number of markers removed.
    pub fn tick(&self, delta_time: f32, entities: &impl EntitySource) -> usize {
        self.inner.lock().tick(delta_time, entities)
    }

    /// Registers a marker.
    pub fn register_marker(
        &self,
        entity: Option<EntityId>,
        config: Option<Arc<MarkerVisualConfig>>,
        layer_name: &str,
        static_location: Option<Vec3>,
        entities: &impl EntitySource,
    ) -> MarkerId {
        self.inner
            .lock()
            .register_marker(entity, config, layer_name, static_location, entities)
    }

    /// Removes a marker.
    pub fn unregister_marker(&self, id: MarkerId) -> bool {
        self.inner.lock().unregister_marker(id)
    }

    /// Owned copy of the active markers.
    #[must_use]
    pub fn snapshot(&self) -> MarkerSnapshot {
        self.inner.lock().snapshot()
    }

    /// Owned copy of the active layer.
    #[must_use]
    pub fn current_layer(&self) -> Option<MapLayer> {
        self.inner.lock().current_layer().cloned()
    }
}
