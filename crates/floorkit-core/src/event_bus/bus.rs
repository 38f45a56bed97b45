//! Per-editor notification bus.
//!
//! Callbacks run on the thread that publishes, in the order they were
//! registered. Async consumers hold a `broadcast` receiver instead and see
//! the same events after every callback has returned.

use parking_lot::RwLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EditorEvent, EventCategory};

/// Events buffered per async receiver before it starts lagging.
const CHANNEL_CAPACITY: usize = 256;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "sub-{}", &simple[..8])
    }
}

/// Which categories a callback wants to hear about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn only(category: EventCategory) -> Self {
        EventFilter::Categories(vec![category])
    }

    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// Neither a callback nor a receiver accepted the event.
    #[error("no listener for {0}")]
    NoSubscribers(EventCategory),
}

type Callback = Box<dyn Fn(&EditorEvent) + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    label: String,
    filter: EventFilter,
    callback: Callback,
}

/// Change notifications of one `EditorState`.
///
/// Callbacks must not subscribe or unsubscribe on the same bus while they
/// run; the subscriber list is read-locked for the whole delivery.
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Delivers `event` to matching callbacks, then to async receivers.
    ///
    /// Returns how many listeners saw it.
    pub fn publish(&self, event: EditorEvent) -> Result<usize, EventBusError> {
        tracing::trace!("{}", event.description());

        let called = self
            .subscribers
            .read()
            .iter()
            .filter(|s| s.filter.matches(&event))
            .inspect(|s| (s.callback)(&event))
            .count();

        let category = event.category();
        let received = self.sender.send(event).unwrap_or(0);
        match called + received {
            0 => Err(EventBusError::NoSubscribers(category)),
            n => Ok(n),
        }
    }

    /// Registers a callback. `label` only shows up in logs.
    pub fn subscribe<F>(&self, label: &str, filter: EventFilter, callback: F) -> SubscriptionId
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        tracing::debug!("{} subscribed as {} ({:?})", label, id, filter);
        self.subscribers.write().push(Subscriber {
            id,
            label: label.to_string(),
            filter,
            callback: Box::new(callback),
        });
        id
    }

    /// Async receiver; sees events published after this call.
    pub fn receiver(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        match subscribers.iter().position(|s| s.id == id) {
            Some(index) => {
                let removed = subscribers.remove(index);
                tracing::debug!("{} unsubscribed ({})", removed.label, id);
                true
            }
            None => false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Callbacks that would receive an event of `category`.
    pub fn listeners_for(&self, category: EventCategory) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|s| match &s.filter {
                EventFilter::All => true,
                EventFilter::Categories(c) => c.contains(&category),
            })
            .count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels = self
            .subscribers
            .read()
            .iter()
            .map(|s| s.label.clone())
            .collect::<Vec<_>>();
        f.debug_struct("EventBus")
            .field("subscribers", &labels)
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}
