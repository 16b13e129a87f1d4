//! # Navigation Frame Driver
//!
//! Host tick order for one frame:
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ 1. SUBSYSTEM TICK                                          │
//! │    ├─ Reselect layer from the tracked player               │
//! │    └─ Advance markers (refresh, expire, evict stale)       │
//! │                                                            │
//! │ 2. WIDGET TICK                                             │
//! │    └─ Layout minimap + compass (skipped while gated)       │
//! └───────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use navmap_core::EntitySource;
use navmap_ui::{CanvasSizes, FrameLayout};

use crate::subsystem::NavigationSubsystem;
use crate::widget::MinimapWidget;

/// Timing and counts for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Subsystem tick time in microseconds.
    pub tick_us: u64,
    /// Layout time in microseconds.
    pub layout_us: u64,
    /// Markers removed during the tick.
    pub evicted: usize,
    /// Markers placed on the minimap.
    pub minimap_markers: usize,
    /// Markers placed on the compass.
    pub compass_markers: usize,
}

/// Runs the per-frame navigation work in host order.
#[derive(Debug, Default)]
pub struct NavigationFrame {
    frame_count: u64,
    last_stats: FrameStats,
}

impl NavigationFrame {
    /// Creates a driver at frame zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks the subsystem, then lays out the widget.
    ///
    /// Returns `None` while the widget is gated or has no tracked player.
    pub fn run(
        &mut self,
        subsystem: &mut NavigationSubsystem,
        widget: &mut MinimapWidget,
        entities: &impl EntitySource,
        delta_time: f32,
        canvas: CanvasSizes,
    ) -> Option<FrameLayout> {
        let tick_start = Instant::now();
        let evicted = subsystem.tick(delta_time, entities);
        let tick_us = elapsed_us(tick_start);

        let layout_start = Instant::now();
        widget.set_canvas(canvas);
        let layout = widget.tick(subsystem, entities);
        let layout_us = elapsed_us(layout_start);

        self.last_stats = FrameStats {
            frame: self.frame_count,
            tick_us,
            layout_us,
            evicted,
            minimap_markers: layout.as_ref().map_or(0, |l| l.minimap.len()),
            compass_markers: layout.as_ref().map_or(0, |l| l.compass.len()),
        };
        self.frame_count += 1;

        layout
    }

    /// Number of frames run.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Statistics of the last frame.
    #[must_use]
    pub const fn last_stats(&self) -> &FrameStats {
        &self.last_stats
    }
}

fn elapsed_us(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}
