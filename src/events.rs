//! Topic-keyed change notifications.
//!
//! The resolvers never publish anything. [`SharedProject`](crate::SharedProject)
//! publishes one [`ChangeEvent`] per successful update, after its write lock
//! is released, so callbacks may take a fresh snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Topics for change routing.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Collections, modes and variables.
    Variables,
    /// Styles, properties and mode bindings.
    Styles,
}

/// Emitted after a successful update.
///
/// Events from concurrent writers may arrive out of revision order. Compare
/// `revision` with the current snapshot's revision to detect stale events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub topic: Topic,
    /// Project revision after the change.
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next: u64,
    subscribers: BTreeMap<SubscriptionId, (Topic, Callback)>,
}

/// Observer registry keyed by [`Topic`].
///
/// Cloning the bus shares the registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events on `topic`.
    pub fn subscribe<F>(&self, topic: Topic, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        registry.next += 1;
        let id = SubscriptionId(registry.next);
        registry.subscribers.insert(id, (topic, Arc::new(callback)));
        id
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().subscribers.remove(&id).is_some()
    }

    /// Calls every subscriber of the event's topic, in subscription order.
    ///
    /// Callbacks run on the caller's thread without the registry lock held,
    /// so they may subscribe or unsubscribe.
    pub fn publish(&self, event: ChangeEvent) {
        let callbacks: Vec<Callback> = self
            .lock()
            .subscribers
            .values()
            .filter(|(topic, _)| *topic == event.topic)
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        if callbacks.is_empty() {
            trace!(topic = ?event.topic, "no subscribers for topic");
        }
        for callback in callbacks {
            callback(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
