//! Broadcast event channels for session notifications.
//!
//! A channel owns an explicit subscriber list. Emission fans out to every
//! current subscriber synchronously on the calling thread; the scheduling
//! discipline (all emission on the UI context) is the caller's concern.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Token returned by [`EventChannel::subscribe`]. Holding it is the only way
/// to unsubscribe; views unsubscribe on unmount so no callback outlives the
/// bridge that registered it.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: Uuid,
}

/// Multi-subscriber broadcast channel. One session channel may feed several
/// independently mounted views.
pub struct EventChannel<T> {
    subscribers: Mutex<Vec<(Uuid, Callback<T>)>>,
}

impl<T: Clone> EventChannel<T> {
    /// Create a new channel with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Uuid, Callback<T>)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a subscriber. The returned token identifies it for
    /// [`EventChannel::unsubscribe`].
    pub fn subscribe(&self, callback: impl Fn(T) + Send + Sync + 'static) -> Subscription {
        let id = Uuid::new_v4();
        self.lock().push((id, Arc::new(callback)));
        Subscription { id }
    }

    /// Remove a subscriber. Returns false if the token did not belong to
    /// this channel or was already removed.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != subscription.id);
        subscribers.len() != before
    }

    /// Notify all current subscribers. The subscriber list is snapshotted
    /// before invocation, so a callback may subscribe or unsubscribe on this
    /// same channel without deadlocking; mutations take effect from the next
    /// emission.
    pub fn emit(&self, value: T) {
        let snapshot: Vec<Callback<T>> = self
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(value.clone());
        }
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Remove all subscribers
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<T: Clone> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self
            .subscribers
            .lock()
            .map(|subscribers| subscribers.len())
            .unwrap_or(0);
        f.debug_struct("EventChannel")
            .field("subscribers", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_fans_out_to_all_subscribers() {
        let channel = EventChannel::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let first = Arc::clone(&hits);
        let _a = channel.subscribe(move |_: bool| {
            first.fetch_add(1, Ordering::SeqCst);
        });
        let second = Arc::clone(&hits);
        let _b = channel.subscribe(move |_: bool| {
            second.fetch_add(1, Ordering::SeqCst);
        });

        channel.emit(true);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let channel = EventChannel::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let sub = channel.subscribe(move |_: bool| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        channel.emit(true);
        assert!(channel.unsubscribe(&sub));
        channel.emit(true);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!channel.unsubscribe(&sub));
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_during_emit_does_not_deadlock() {
        let channel = Arc::new(EventChannel::new());
        let inner = Arc::clone(&channel);
        let _sub = channel.subscribe(move |_: bool| {
            inner.subscribe(|_: bool| {});
        });
        channel.emit(true);
        assert_eq!(channel.subscriber_count(), 2);
    }

    #[test]
    fn test_clear() {
        let channel: EventChannel<bool> = EventChannel::new();
        let _sub = channel.subscribe(|_| {});
        channel.clear();
        assert_eq!(channel.subscriber_count(), 0);
    }
}
