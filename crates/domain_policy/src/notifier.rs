//! In-process event bus
//!
//! Subscribers register a handler and get a `SubscriptionId` back. Events
//! are delivered synchronously, in subscription order, on the publishing
//! thread.

use std::fmt;
use tracing::debug;

use core_kernel::SubscriptionId;
use crate::events::PolicyEvent;

type Handler = Box<dyn Fn(&PolicyEvent) + Send + Sync>;

/// Event bus for policy events
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every future event
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&PolicyEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new_v7();
        self.handlers.push((id, Box::new(handler)));
        debug!(subscription_id = %id, "Subscriber registered");
        id
    }

    /// Removes a handler; returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(subscription, _)| *subscription != id);
        self.handlers.len() != before
    }

    /// Delivers one event to every subscriber
    pub fn publish(&self, event: &PolicyEvent) {
        debug!(event = event.event_type(), subscribers = self.handlers.len(), "Publishing event");
        for (_, handler) in &self.handlers {
            handler(event);
        }
    }

    /// Delivers events in order; returns how many were published
    pub fn publish_all(&self, events: &[PolicyEvent]) -> usize {
        for event in events {
            self.publish(event);
        }
        events.len()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
