//! One-shot and persistent observer callbacks.
//!
//! Every lifecycle event kind carries two independent notification paths:
//! an optional one-shot action that is cleared atomically after its single
//! invocation, and a list of persistent subscribers that fire on every
//! occurrence. Both paths run on every event; the one-shot fires first.

use adlift_core::RevenueRecord;

// ============================================================================
// Subscription Id
// ============================================================================

/// Opaque key for a persistent subscription, returned by
/// [`CallbackSet::subscribe`] and consumed by [`CallbackSet::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// ============================================================================
// Callback Set
// ============================================================================

/// Per-event-kind callback storage.
///
/// Generic over the event payload so the same mechanism serves every
/// lifecycle event: `()` for loaded/displayed/clicked/closed, the failure
/// reason for failed-to-load, and the revenue record for paid.
pub struct CallbackSet<T> {
    once: Option<Box<dyn FnOnce(&T) + Send>>,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&T) + Send>)>,
    next_id: u64,
}

impl<T> CallbackSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            once: None,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Stores a one-shot action, replacing any previously set one that has
    /// not fired yet.
    pub fn set_once(&mut self, action: impl FnOnce(&T) + Send + 'static) {
        self.once = Some(Box::new(action));
    }

    /// Returns true if a one-shot action is pending.
    pub fn has_once(&self) -> bool {
        self.once.is_some()
    }

    /// Adds a persistent subscriber, fired on every occurrence until
    /// unsubscribed.
    pub fn subscribe(&mut self, handler: impl FnMut(&T) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Removes a persistent subscriber. Returns false if the id was
    /// already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Returns the number of persistent subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Fires the event: the one-shot action (if set) exactly once, then
    /// every persistent subscriber, all with the same payload.
    pub fn fire(&mut self, payload: &T) {
        if let Some(action) = self.once.take() {
            action(payload);
        }
        for (_, handler) in &mut self.subscribers {
            handler(payload);
        }
    }
}

impl<T> Default for CallbackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Callback Registry
// ============================================================================

/// All observer callbacks of one ad unit, one set per event kind.
///
/// The registry survives `destroy()`; tearing a creative down never clears
/// registered observers.
#[derive(Default)]
pub struct CallbackRegistry {
    /// Fired when a load request completes with a fill.
    pub loaded: CallbackSet<()>,
    /// Fired when a load request fails; payload is the failure reason.
    pub failed: CallbackSet<String>,
    /// Fired when the creative opens full-screen content.
    pub displayed: CallbackSet<()>,
    /// Fired when the creative is clicked.
    pub clicked: CallbackSet<()>,
    /// Fired when full-screen content closes.
    pub closed: CallbackSet<()>,
    /// Fired for every paid impression; payload is the normalized record.
    pub paid: CallbackSet<RevenueRecord>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_one_shot_fires_once_then_clears() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut set: CallbackSet<()> = CallbackSet::new();

        let c = Arc::clone(&count);
        set.set_once(move |()| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert!(set.has_once());

        set.fire(&());
        set.fire(&());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!set.has_once());
    }

    #[test]
    fn test_persistent_fires_every_time() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut set: CallbackSet<String> = CallbackSet::new();

        let c = Arc::clone(&count);
        set.subscribe(move |_reason| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        set.fire(&"no fill".to_string());
        set.fire(&"timeout".to_string());
        set.fire(&"no fill".to_string());

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_one_shot_fires_before_persistent() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut set: CallbackSet<()> = CallbackSet::new();

        let o = Arc::clone(&order);
        set.subscribe(move |()| o.lock().unwrap().push("persistent"));
        let o = Arc::clone(&order);
        set.set_once(move |()| o.lock().unwrap().push("once"));

        set.fire(&());

        assert_eq!(*order.lock().unwrap(), vec!["once", "persistent"]);
    }

    #[test]
    fn test_set_once_replaces_unfired_action() {
        let hits = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut set: CallbackSet<()> = CallbackSet::new();

        let h = Arc::clone(&hits);
        set.set_once(move |()| h.lock().unwrap().push("first"));
        let h = Arc::clone(&hits);
        set.set_once(move |()| h.lock().unwrap().push("second"));

        set.fire(&());
        assert_eq!(*hits.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut set: CallbackSet<()> = CallbackSet::new();

        let c = Arc::clone(&count);
        let id = set.subscribe(move |()| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        set.fire(&());
        assert!(set.unsubscribe(id));
        set.fire(&());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!set.unsubscribe(id));
    }

    #[test]
    fn test_independent_subscribers() {
        let mut set: CallbackSet<()> = CallbackSet::new();
        let a = set.subscribe(|()| {});
        let _b = set.subscribe(|()| {});
        assert_eq!(set.subscriber_count(), 2);
        set.unsubscribe(a);
        assert_eq!(set.subscriber_count(), 1);
    }
}
