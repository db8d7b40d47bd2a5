//! Trip route change notifications.

use rtd_core::TripRoute;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// A state change published to subscribers, carrying the full snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvent {
    /// Routes were computed or loaded.
    RoutesCreated(TripRoute),
    /// A selection, drag or reset changed the trip route.
    RouteSelected(TripRoute),
}

impl RouteEvent {
    /// The snapshot carried by the event.
    #[must_use]
    pub const fn trip_route(&self) -> &TripRoute {
        match self {
            Self::RoutesCreated(trip) | Self::RouteSelected(trip) => trip,
        }
    }
}

/// Fan-out of events to every live subscriber.
#[derive(Debug, Default)]
pub(crate) struct EventBus {
    subscribers: Vec<UnboundedSender<RouteEvent>>,
}

impl EventBus {
    pub(crate) const fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self) -> UnboundedReceiver<RouteEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `event`, dropping subscribers whose receiver has gone.
    pub(crate) fn publish(&mut self, event: &RouteEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
