//! Opaque asset handles.
//!
//! The host owns textures and materials. The navigation core only carries
//! their handles around and hands them back in layout output.

use serde::{Deserialize, Serialize};

/// Opaque handle to a host texture (map art, marker icons, compass ring).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Creates a handle from the host's raw id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}
