//! # Marker Registry
//!
//! Sole owner of every live marker.
//!
//! ```text
//!               ┌──────────────────────────────┐
//! register ────>│ markers:   MarkerId -> Marker │<──── advance(dt)
//! unregister ──>│ by_entity: EntityId -> Id     │      1. refresh tracked positions
//!               └──────────────────────────────┘      2. tick lifetimes
//!                              │                      3. collect expired / stale
//!                              v                      4. remove in one batch
//!                     NavEvent::MarkersChanged        5. notify once
//! ```
//!
//! Both maps are mutated together, behind `&mut self`, so they cannot
//! disagree. Callers holding a [`MarkerId`] hold a lookup key only.

use std::collections::HashMap;
use std::sync::Arc;

use navmap_shared::Vec3;

use crate::entity::{EntityId, EntitySource};
use crate::events::{EventSender, NavEvent};
use crate::marker::{Marker, MarkerConfigLibrary, MarkerId, MarkerVisualConfig};

/// Owned copy of the active markers.
///
/// Safe to keep across registry mutations; compare `revision` to know
/// whether the set changed since.
#[derive(Clone, Debug, Default)]
pub struct MarkerSnapshot {
    /// Registry revision the copy was taken at.
    pub revision: u64,
    /// Active markers, in no particular order.
    pub markers: Vec<Marker>,
}

/// Owns the active markers and their lifecycle.
pub struct MarkerRegistry {
    markers: HashMap<MarkerId, Marker>,
    by_entity: HashMap<EntityId, MarkerId>,
    /// Next id to hand out. Ids are never reused within a session.
    next_id: u64,
    /// Bumped whenever the set of markers changes.
    revision: u64,
    events: EventSender,
}

impl MarkerRegistry {
    /// Creates an empty registry publishing changes on `events`.
    #[must_use]
    pub fn new(events: EventSender) -> Self {
        Self {
            markers: HashMap::with_capacity(64),
            by_entity: HashMap::with_capacity(64),
            next_id: 1,
            revision: 0,
            events,
        }
    }

    /// Registers a marker.
    ///
    /// * `entity` - entity to follow; its current position seeds the marker
    /// * `config` - shared appearance; `None` rejects the registration
    /// * `layer_name` - logical grouping tag
    /// * `static_location` - position when not following an entity
    ///
    /// Registering an entity that is already tracked returns the existing
    /// id and changes nothing. Rejected registrations return
    /// [`MarkerId::INVALID`].
    pub fn register(
        &mut self,
        entity: Option<EntityId>,
        config: Option<Arc<MarkerVisualConfig>>,
        layer_name: &str,
        static_location: Option<Vec3>,
        entities: &impl EntitySource,
    ) -> MarkerId {
        let Some(config) = config else {
            tracing::warn!("failed to register marker: config is missing");
            return MarkerId::INVALID;
        };

        let mut marker = Marker {
            id: MarkerId::INVALID,
            tracked_entity: entity,
            world_location: static_location.unwrap_or(Vec3::ZERO),
            facing_yaw: None,
            remaining_lifetime: config.lifetime,
            config,
            layer_name: layer_name.to_owned(),
        };

        if let Some(entity) = entity {
            if let Some(&existing) = self.by_entity.get(&entity) {
                tracing::debug!("entity {:?} already tracked by {}", entity, existing);
                return existing;
            }
            let Some(state) = entities.entity(entity) else {
                tracing::warn!("failed to register marker: entity {:?} is no longer valid", entity);
                return MarkerId::INVALID;
            };
            marker.refresh_from(&state);
        }

        let id = MarkerId(self.next_id);
        self.next_id += 1;
        marker.id = id;

        if let Some(entity) = entity {
            self.by_entity.insert(entity, id);
        }
        self.markers.insert(id, marker);
        self.notify_changed();

        tracing::info!("registered new marker with id: {}", id);
        id
    }

    /// Registers a marker using a named config from `library`.
    ///
    /// Unknown names are rejected like a missing config.
    pub fn register_named(
        &mut self,
        library: &MarkerConfigLibrary,
        config_name: &str,
        entity: Option<EntityId>,
        layer_name: &str,
        static_location: Option<Vec3>,
        entities: &impl EntitySource,
    ) -> MarkerId {
        let config = library
            .require(config_name)
            .map_err(|err| tracing::warn!("failed to register marker: {}", err))
            .ok();
        self.register(entity, config, layer_name, static_location, entities)
    }

    /// Removes a marker. Unknown or invalid ids are ignored.
    ///
    /// Returns true if a marker was removed.
    pub fn unregister(&mut self, id: MarkerId) -> bool {
        if !id.is_valid() {
            tracing::warn!("attempted to unregister an invalid marker id");
            return false;
        }
        if self.remove_one(id).is_none() {
            tracing::warn!("could not find marker to unregister: {}", id);
            return false;
        }
        self.notify_changed();
        tracing::info!("unregistered marker with id: {}", id);
        true
    }

    /// Removes every marker carrying grouping tag `layer_name`.
    ///
    /// One notification for the whole batch. Returns the number removed.
    pub fn unregister_layer(&mut self, layer_name: &str) -> usize {
        let doomed: Vec<MarkerId> = self.markers_in_layer(layer_name).map(|m| m.id).collect();
        self.remove_batch(&doomed)
    }

    /// Per-tick update.
    ///
    /// Refreshes tracked positions, ticks lifetimes down, and evicts
    /// expired markers and markers whose entity is gone. All evictions are
    /// removed together and announced with a single event. Returns the
    /// number of markers evicted.
    pub fn advance(&mut self, delta_time: f32, entities: &impl EntitySource) -> usize {
        let mut doomed = Vec::new();

        for marker in self.markers.values_mut() {
            if let Some(entity) = marker.tracked_entity {
                if let Some(state) = entities.entity(entity) {
                    marker.refresh_from(&state);
                } else {
                    doomed.push(marker.id);
                    continue;
                }
            }

            // Zero lifetime means infinite; only positive lifetimes tick.
            if marker.remaining_lifetime > 0.0 {
                marker.remaining_lifetime -= delta_time;
                if marker.remaining_lifetime <= 0.0 {
                    doomed.push(marker.id);
                }
            }
        }

        let evicted = self.remove_batch(&doomed);
        if evicted > 0 {
            tracing::info!("evicted {} expired or orphaned markers", evicted);
        }
        evicted
    }

    /// Marker id following `entity`, if any.
    #[must_use]
    pub fn lookup_id_for_entity(&self, entity: EntityId) -> Option<MarkerId> {
        self.by_entity.get(&entity).copied()
    }

    /// Looks a marker up by id.
    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    /// Iterates the active markers. Order is unspecified and may change
    /// between calls.
    pub fn all_active(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.markers.values()
    }

    /// Iterates markers with grouping tag `layer_name`.
    pub fn markers_in_layer<'a>(&'a self, layer_name: &'a str) -> impl Iterator<Item = &'a Marker> + 'a {
        self.markers
            .values()
            .filter(move |marker| marker.layer_name == layer_name)
    }

    /// Owned copy of the active markers.
    #[must_use]
    pub fn snapshot(&self) -> MarkerSnapshot {
        MarkerSnapshot {
            revision: self.revision,
            markers: self.markers.values().cloned().collect(),
        }
    }

    /// Current revision. Changes whenever markers are added or removed.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of active markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// True if no markers are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn remove_one(&mut self, id: MarkerId) -> Option<Marker> {
        let marker = self.markers.remove(&id)?;
        if let Some(entity) = marker.tracked_entity {
            // Only drop the reverse entry if it still points at this marker.
            if self.by_entity.get(&entity) == Some(&id) {
                self.by_entity.remove(&entity);
            }
        }
        Some(marker)
    }

    fn remove_batch(&mut self, ids: &[MarkerId]) -> usize {
        let removed = ids
            .iter()
            .filter(|&&id| self.remove_one(id).is_some())
            .count();
        if removed > 0 {
            self.notify_changed();
        }
        removed
    }

    fn notify_changed(&mut self) {
        self.revision += 1;
        self.events.send(NavEvent::MarkersChanged {
            active: self.markers.len(),
        });
    }
}
