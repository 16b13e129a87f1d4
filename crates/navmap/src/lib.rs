//! # NAVMAP
//!
//! Minimap and compass navigation service.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          NAVMAP SERVICE                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │ NavigationComponent ──> NavigationSubsystem <── SharedNavigation │
//! │  (per character)          │  LayerSelector                       │
//! │                           │  MarkerRegistry                      │
//! │                           │  MarkerConfigLibrary                 │
//! │                           v                                      │
//! │                      MinimapWidget ──> ProjectionEngine          │
//! │                      (init gate)        (navmap_ui)              │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `subsystem`: The per-game-instance service
//! - `component`: Per-character marker lifecycle
//! - `widget`: Initialization-gated minimap
//! - `frame`: Host tick order
//! - `shared`: Mutex-guarded handle for multi-threaded hosts
//!
//! ## Example
//!
//! ```rust
//! use navmap::{MinimapWidget, NavigationFrame, NavigationSubsystem};
//! use navmap::model::{EntityTable, LayerDefinition};
//! use navmap::common::{TextureHandle, Vec3};
//! use navmap::ui::{CanvasSizes, MinimapConfig};
//!
//! let mut entities = EntityTable::new();
//! let hero = entities.spawn(Vec3::new(10.0, 10.0, 0.0));
//!
//! let mut nav = NavigationSubsystem::new();
//! nav.load_layers(vec![LayerDefinition::new(
//!     "world",
//!     TextureHandle::new(1),
//!     Vec3::new(-100.0, -100.0, 0.0),
//!     Vec3::new(100.0, 100.0, 0.0),
//!     0,
//! )]);
//! nav.set_tracked_player(Some(hero), &entities);
//!
//! let mut widget = MinimapWidget::new(CanvasSizes::default());
//! widget
//!     .initialize_and_start_tracking(MinimapConfig::default(), Some(&mut nav), &entities)
//!     .unwrap();
//!
//! let mut frame = NavigationFrame::new();
//! let layout = frame.run(&mut nav, &mut widget, &entities, 0.016, CanvasSizes::default());
//! assert!(layout.unwrap().map_active);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod component;
pub mod error;
pub mod frame;
pub mod shared;
pub mod subsystem;
pub mod widget;

// Re-export the layers
pub use navmap_core as model;
pub use navmap_shared as common;
pub use navmap_ui as ui;

pub use component::{NavigationComponent, NetMode};
pub use error::{NavigationError, NavigationResult};
pub use frame::{FrameStats, NavigationFrame};
pub use shared::SharedNavigation;
pub use subsystem::NavigationSubsystem;
pub use widget::{MinimapWidget, WidgetState};
