//! # Tracked Entities
//!
//! Markers never own the objects they follow. They hold an [`EntityId`]
//! and ask an [`EntitySource`] for the entity's state each tick:
//! - Lower 32 bits: slot index
//! - Upper 32 bits: generation counter for detecting stale references
//!
//! A despawned slot bumps its generation, so every id handed out for the
//! old occupant reports invalid from then on.

use navmap_shared::Vec3;

/// Weak, generation-checked reference to a host entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new entity ID from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Null/invalid entity ID.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this entity ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

/// What the navigation core reads from a live entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EntityState {
    /// World position.
    pub position: Vec3,
    /// Control ("aim"/camera) yaw in degrees.
    pub control_yaw: f32,
    /// Actor ("facing") yaw in degrees.
    pub actor_yaw: f32,
}

impl EntityState {
    /// Creates an entity state.
    #[must_use]
    pub const fn new(position: Vec3, control_yaw: f32, actor_yaw: f32) -> Self {
        Self {
            position,
            control_yaw,
            actor_yaw,
        }
    }
}

/// Host-side view of the entities markers may track.
pub trait EntitySource {
    /// Returns the entity's current state, or `None` once it is destroyed.
    fn entity(&self, id: EntityId) -> Option<EntityState>;

    /// Returns true while the entity is alive.
    fn is_valid(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Current world position of a live entity.
    fn position(&self, id: EntityId) -> Option<Vec3> {
        self.entity(id).map(|e| e.position)
    }

    /// Current control yaw of a live entity.
    fn control_yaw(&self, id: EntityId) -> Option<f32> {
        self.entity(id).map(|e| e.control_yaw)
    }

    /// Current actor yaw of a live entity.
    fn actor_yaw(&self, id: EntityId) -> Option<f32> {
        self.entity(id).map(|e| e.actor_yaw)
    }
}

/// Slot in the liveness table.
#[derive(Clone, Copy, Debug)]
struct Slot {
    generation: u32,
    alive: bool,
    state: EntityState,
}

/// Generation-counted liveness table.
///
/// A minimal [`EntitySource`] for hosts without their own entity store, and
/// the fixture the tests drive.
///
/// # Example
///
/// ```rust
/// use navmap_core::{EntitySource, EntityTable};
/// use navmap_shared::Vec3;
///
/// let mut table = EntityTable::new();
/// let id = table.spawn(Vec3::new(1.0, 2.0, 0.0));
/// assert!(table.is_valid(id));
/// table.despawn(id);
/// assert!(!table.is_valid(id));
/// ```
#[derive(Debug, Default)]
pub struct EntityTable {
    slots: Vec<Slot>,
    free_indices: Vec<u32>,
    alive_count: usize,
}

impl EntityTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of currently alive entities.
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Spawns an entity at `position` facing +X.
    pub fn spawn(&mut self, position: Vec3) -> EntityId {
        let state = EntityState::new(position, 0.0, 0.0);

        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            slot.state = state;
            self.alive_count += 1;
            return EntityId::new(index, slot.generation);
        }

        let Ok(index) = u32::try_from(self.slots.len()) else {
            return EntityId::NULL;
        };
        self.slots.push(Slot {
            generation: 0,
            alive: true,
            state,
        });
        self.alive_count += 1;
        EntityId::new(index, 0)
    }

    /// Despawns an entity, invalidating every outstanding id for it.
    ///
    /// Returns `false` if the id was already stale.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.live_slot_mut(id) else {
            return false;
        };
        slot.alive = false;
        // Increment generation to invalidate old references
        slot.generation = slot.generation.wrapping_add(1);
        self.free_indices.push(id.index());
        self.alive_count -= 1;
        true
    }

    /// Moves a live entity. Stale ids are ignored.
    pub fn set_position(&mut self, id: EntityId, position: Vec3) {
        if let Some(slot) = self.live_slot_mut(id) {
            slot.state.position = position;
        }
    }

    /// Sets both yaws of a live entity. Stale ids are ignored.
    pub fn set_rotation(&mut self, id: EntityId, control_yaw: f32, actor_yaw: f32) {
        if let Some(slot) = self.live_slot_mut(id) {
            slot.state.control_yaw = control_yaw;
            slot.state.actor_yaw = actor_yaw;
        }
    }

    fn live_slot_mut(&mut self, id: EntityId) -> Option<&mut Slot> {
        if id.is_null() {
            return None;
        }
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.alive && slot.generation == id.generation())
    }
}

impl EntitySource for EntityTable {
    fn entity(&self, id: EntityId) -> Option<EntityState> {
        if id.is_null() {
            return None;
        }
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.alive && slot.generation == id.generation())
            .map(|slot| slot.state)
    }
}
