//! # NAVMAP UI Layout
//!
//! Per-frame screen-space layout for the minimap panel and the compass ring.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         LAYOUT PIPELINE                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ viewer + layer ──> player UV ──> map rotation ──> per marker:   │
//! │                                                  minimap pass   │
//! │                                                  compass pass   │
//! │                         │                              │        │
//! │                  MapMaterialParams              PlacedMarker    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here draws. The host receives positions, angles and material
//! parameters and applies them to its own widgets.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod compass;
pub mod config;
pub mod engine;
pub mod error;
pub mod material;
pub mod minimap;
pub mod placement;
pub mod rotation;

pub use compass::CompassPass;
pub use config::{MapAlignment, MinimapConfig, MinimapShape, RotationSource};
pub use engine::{CanvasSizes, FrameInput, FrameLayout, ProjectionEngine, ViewerState};
pub use error::{UiError, UiResult};
pub use material::{MapMaterialParams, MapMaterialUniform};
pub use minimap::{clamp_offset, MinimapPass};
pub use placement::{pivot_compensated, PlacedMarker};
pub use rotation::MapRotation;
