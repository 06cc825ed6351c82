//! Event Bus implementation.
//!
//! Points arrive at control-loop rate and are handled synchronously by the
//! preview adapter on the publishing thread. Tokio receivers get a broadcast
//! copy; frames travel behind an `Arc`, so a lagging receiver costs a slot,
//! not an image.

use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};
use crate::types::DataCallback;

/// Broadcast slots per receiver before it starts lagging
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Which events a subscription receives
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Where a published event ended up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Synchronous handlers whose filter matched
    pub handlers: usize,
    /// Tokio receivers the event was broadcast to
    pub receivers: usize,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// Nobody is listening, neither handlers nor receivers
    #[error("No active subscribers")]
    NoSubscribers,
}

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: DataCallback<AppEvent>,
}

/// Publish/subscribe hub between the cell controller and the preview
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
    subscriptions: RwLock<Vec<Subscription>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            subscriptions: RwLock::new(Vec::new()),
        }
    }

    /// Deliver `event` to matching handlers, then to tokio receivers.
    ///
    /// Handlers run on the calling thread without the subscription lock
    /// held, so a handler may subscribe or unsubscribe.
    pub fn publish(&self, event: AppEvent) -> Result<Delivery, EventBusError> {
        let handlers: Vec<DataCallback<AppEvent>> = self
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.filter.matches(&event))
            .map(|s| Arc::clone(&s.handler))
            .collect();
        let subscribed = self.subscriber_count() > 0;

        for handler in &handlers {
            handler(event.clone());
        }

        // Skip the broadcast copy when nobody polls the channel
        let receivers = if self.sender.receiver_count() > 0 {
            self.sender.send(event).unwrap_or(0)
        } else {
            0
        };

        if !subscribed && receivers == 0 {
            return Err(EventBusError::NoSubscribers);
        }
        Ok(Delivery {
            handlers: handlers.len(),
            receivers,
        })
    }

    /// Register a synchronous handler; it must return quickly
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.subscriptions.write().push(Subscription {
            id,
            filter,
            handler: Arc::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Receiver for polling events from a tokio task
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Returns true if the subscription existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        let removed = subscriptions.len() < before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Number of synchronous handlers
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriber_count())
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}

static EVENT_BUS: OnceLock<EventBus> = OnceLock::new();

/// Process-wide bus shared by the controller feed and the preview
pub fn event_bus() -> &'static EventBus {
    EVENT_BUS.get_or_init(EventBus::new)
}
