//! # NAVMAP Shared
//!
//! Value types used by every NAVMAP crate.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - the host engine
//! - widget or drawing code
//! - anything with interior state
//!
//! Everything here is `Copy` (or close to it) and free of side effects.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod assets;
pub mod color;
pub mod constants;
pub mod math;

pub use assets::TextureHandle;
pub use color::Color;
pub use constants::{
    BOUNDS_TOLERANCE, DEFAULT_COMPASS_RADIUS, DEFAULT_MARKER_SIZE, DEFAULT_ZOOM, PLAYERS_LAYER,
};
pub use math::{normalize_degrees, Vec2, Vec3};
