//! # Navigation Event Bus
//!
//! Change notifications from the layer selector and the marker registry to
//! whoever rebuilds UI state (the host polls the receiver once per frame).
//!
//! ```text
//! LayerSelector ──┐
//!                 ├──> EventSender ──> channel ──> EventReceiver ──> host
//! MarkerRegistry ─┘          │                          ^
//!                            └──> latest marker count ──┘
//! ```
//!
//! Every `LayerChanged` is delivered. `MarkersChanged` is coalesced: at most
//! one is queued at a time and it reports the active count as of the moment
//! it is received, so the queue only grows with layer transitions.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::layer::LayerId;

/// Notifications emitted by the navigation core.
#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent {
    /// The active minimap layer changed.
    LayerChanged {
        /// New active layer, or `None` when no layer contains the player.
        layer: Option<LayerId>,
        /// Name of the new layer, for logging and UI.
        name: Option<String>,
    },

    /// The set of active markers changed (added, removed, or expired).
    MarkersChanged {
        /// Number of active markers after the change.
        active: usize,
    },
}

/// Pending marker notification shared by senders and receivers.
#[derive(Default)]
struct MarkerSlot {
    /// A `MarkersChanged` sits in the channel, not yet received.
    queued: AtomicBool,
    /// Latest active count.
    active: AtomicUsize,
}

/// Event bus for navigation notifications.
pub struct EventBus {
    sender: Sender<NavEvent>,
    receiver: Receiver<NavEvent>,
    markers: Arc<MarkerSlot>,
}

impl EventBus {
    /// Creates a new event bus.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            markers: Arc::new(MarkerSlot::default()),
        }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
            markers: Arc::clone(&self.markers),
        }
    }

    /// Creates a receiver handle.
    ///
    /// Receivers share one queue: each event is delivered to exactly one of
    /// them.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
            markers: Arc::clone(&self.markers),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<NavEvent>,
    markers: Arc<MarkerSlot>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// A `MarkersChanged` sent while another is still queued only updates
    /// the queued count. Returns `false` if every receiver is gone.
    #[inline]
    pub fn send(&self, event: NavEvent) -> bool {
        if let NavEvent::MarkersChanged { active } = event {
            self.markers.active.store(active, Ordering::SeqCst);
            if self.markers.queued.swap(true, Ordering::SeqCst) {
                return true;
            }
        }
        match self.sender.send(event) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("navigation event channel closed, dropping {:?}", err.0);
                false
            }
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<NavEvent>,
    markers: Arc<MarkerSlot>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<NavEvent> {
        self.receiver
            .try_iter()
            .map(|event| self.resolve(event))
            .collect()
    }

    /// Receives one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<NavEvent> {
        self.receiver.try_recv().ok().map(|event| self.resolve(event))
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }

    fn resolve(&self, event: NavEvent) -> NavEvent {
        match event {
            NavEvent::MarkersChanged { .. } => {
                // Clear first: a send racing with us queues a fresh event.
                self.markers.queued.store(false, Ordering::SeqCst);
                NavEvent::MarkersChanged {
                    active: self.markers.active.load(Ordering::SeqCst),
                }
            }
            layer @ NavEvent::LayerChanged { .. } => layer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_changed(slot: u32) -> NavEvent {
        NavEvent::LayerChanged {
            layer: Some(LayerId(slot)),
            name: Some(format!("layer{slot}")),
        }
    }

    #[test]
    fn test_event_send_receive() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let receiver = bus.receiver();

        assert!(sender.send(NavEvent::MarkersChanged { active: 3 }));
        assert!(receiver.has_events());
        assert_eq!(
            receiver.try_recv(),
            Some(NavEvent::MarkersChanged { active: 3 })
        );
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn test_marker_changes_coalesce() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let receiver = bus.receiver();

        for active in 1..=1000 {
            assert!(sender.send(NavEvent::MarkersChanged { active }));
        }
        assert_eq!(receiver.pending_count(), 1);
        assert_eq!(receiver.drain(), vec![NavEvent::MarkersChanged { active: 1000 }]);

        // Once received, the next change queues again.
        sender.send(NavEvent::MarkersChanged { active: 999 });
        assert_eq!(receiver.drain(), vec![NavEvent::MarkersChanged { active: 999 }]);
    }

    #[test]
    fn test_layer_changes_are_never_dropped() {
        let bus = EventBus::new();
        let sender = bus.sender();

        sender.send(NavEvent::MarkersChanged { active: 1 });
        for slot in 0..500 {
            assert!(sender.send(layer_changed(slot)));
            sender.send(NavEvent::MarkersChanged { active: 2 });
        }

        let events = bus.receiver().drain();
        assert_eq!(events.len(), 501);
        assert_eq!(events[0], NavEvent::MarkersChanged { active: 2 });
        assert_eq!(events[1], layer_changed(0));
        assert_eq!(events[500], layer_changed(499));
    }
}
