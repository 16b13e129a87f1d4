//! # NAVMAP Core
//!
//! Geometry and bookkeeping behind the minimap and compass:
//! - World position to map UV projection
//! - Priority-ordered map layer selection
//! - The marker registry (registration, lifetimes, stale-entity cleanup)
//! - The navigation event bus
//!
//! ## Architecture
//!
//! ```text
//! host tick ──> LayerSelector::reselect ──> MarkerRegistry::advance ──> layout
//!                     │                            │
//!                     └──── NavEvent channel <─────┘
//! ```
//!
//! All state here is single-writer. Nothing blocks and nothing panics on
//! absence: an empty registry or a position outside every layer is a valid
//! state, not an error.
//!
//! ## Example
//!
//! ```rust
//! use navmap_core::{EventBus, LayerDefinition, LayerSelector};
//! use navmap_shared::{TextureHandle, Vec3};
//!
//! let bus = EventBus::new();
//! let mut layers = LayerSelector::new(bus.sender());
//! layers.load_layers(vec![LayerDefinition::new(
//!     "overworld",
//!     TextureHandle::new(1),
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(1000.0, 1000.0, 0.0),
//!     0,
//! )]);
//! assert!(layers.reselect(Vec3::new(10.0, 10.0, 0.0)).is_some());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bounds;
pub mod entity;
pub mod error;
pub mod events;
pub mod layer;
pub mod marker;
pub mod registry;

pub use bounds::{world_to_map_uv, WorldBounds};
pub use entity::{EntityId, EntitySource, EntityState, EntityTable};
pub use error::{NavError, NavResult};
pub use events::{EventBus, EventReceiver, EventSender, NavEvent};
pub use layer::{LayerCatalog, LayerChange, LayerDefinition, LayerId, LayerSelector, MapLayer};
pub use marker::{
    Marker, MarkerConfigLibrary, MarkerId, MarkerVisualConfig, VisibilityOptions, ViewCone,
};
pub use registry::{MarkerRegistry, MarkerSnapshot};
