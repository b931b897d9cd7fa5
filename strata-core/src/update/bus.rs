//! Update Bus
//!
//! The bus is the publish/subscribe hub of one collection. Producers hand it
//! an [`Update`] per mutation and it forwards that update to every registered
//! subscriber.
//!
//! # How It Works
//!
//! 1. `subscribe` stores the callback under a fresh [`SubscriberId`] and
//!    returns a [`Subscription`] that owns the registration.
//!
//! 2. `deliver` snapshots the registered callbacks, releases the registry
//!    lock, then invokes each one in subscription order with the same value.
//!
//! 3. Dropping the `Subscription` removes the callback. Holding it keeps the
//!    callback alive for as long as the bus exists.
//!
//! Delivery is synchronous and one-to-one: no batching, deduplication, or
//! deferral. Because the lock is released before callbacks run, a callback
//! may read its source, subscribe, or drop subscriptions. Registrations
//! changed during a delivery take effect on the next one.

use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::trace;

use super::delta::Update;
use super::subscriber::{Subscriber, SubscriberId};

type Registry = RwLock<IndexMap<SubscriberId, Subscriber>>;

/// Distributes updates of one collection to its subscribers.
pub struct UpdateBus {
    subscribers: Arc<Registry>,
}

impl UpdateBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Register a callback.
    ///
    /// The callback stays registered until the returned handle is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Update) + Send + Sync + 'static,
    {
        let subscriber = Subscriber::new(observer);
        let id = subscriber.id();

        self.subscribers.write().insert(id, subscriber);
        trace!(subscriber = id.raw(), "subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.subscribers),
        }
    }

    /// Invoke every registered subscriber with `update`.
    pub fn deliver(&self, update: &Update) {
        let snapshot: Vec<Subscriber> = self.subscribers.read().values().cloned().collect();

        if snapshot.is_empty() {
            return;
        }

        trace!(
            subscribers = snapshot.len(),
            full = update.is_full(),
            "delivering update"
        );

        for subscriber in &snapshot {
            subscriber.notify(update);
        }
    }

    /// Force a full reload on every subscriber.
    pub fn send_full(&self) {
        self.deliver(&Update::Full);
    }

    /// Get the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for UpdateBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UpdateBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

/// Handle to a registered subscriber.
///
/// Dropping this handle unregisters the subscriber from its bus.
#[must_use = "dropping a Subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    registry: Weak<Registry>,
}

impl Subscription {
    /// The ID this subscription is registered under.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// True while the subscriber is still registered with a live bus.
    pub fn is_active(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => {
                let registered = registry.read().contains_key(&self.id);
                registered
            }
            None => false,
        }
    }

    /// Unregister now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            // shift_remove keeps the remaining delivery order intact
            registry.write().shift_remove(&self.id);
            trace!(subscriber = self.id.raw(), "unsubscribed");
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::{Delta, IndexPath};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&Update) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        (count, move |_: &Update| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn forwards_full_updates() {
        let bus = UpdateBus::new();
        let (count, observer) = counter();
        let _subscription = bus.subscribe(observer);

        bus.send_full();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        bus.deliver(&Update::Full);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn forwards_delta_updates_unchanged() {
        let bus = UpdateBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        let _subscription = bus.subscribe(move |update| received_clone.lock().push(update.clone()));

        let sent = Update::Delta(Delta {
            inserted_sections: [1, 2].into(),
            updated_sections: [3, 4, 5].into(),
            deleted_sections: [6, 7].into(),
            inserted_rows: vec![IndexPath::new(20, 1)],
            updated_rows: vec![IndexPath::new(1, 0), IndexPath::new(11, 10)],
            deleted_rows: vec![IndexPath::new(100, 100)],
        });
        bus.deliver(&sent);

        assert_eq!(*received.lock(), vec![sent]);
    }

    #[test]
    fn two_subscribers_receive_identical_value() {
        let bus = UpdateBus::new();
        let first = Arc::new(Mutex::new(None));
        let second = Arc::new(Mutex::new(None));
        let (f, s) = (first.clone(), second.clone());
        let _a = bus.subscribe(move |u| *f.lock() = Some(u.clone()));
        let _b = bus.subscribe(move |u| *s.lock() = Some(u.clone()));

        let update = Update::Delta(Delta {
            deleted_rows: vec![IndexPath::new(0, 3)],
            ..Delta::default()
        });
        bus.deliver(&update);

        assert_eq!(first.lock().as_ref(), Some(&update));
        assert_eq!(*first.lock(), *second.lock());
    }

    #[test]
    fn stops_sending_to_dropped_subscriptions() {
        let bus = UpdateBus::new();
        let (count_a, observer_a) = counter();
        let (count_b, observer_b) = counter();

        let mut subscriptions = vec![bus.subscribe(observer_a)];
        bus.send_full();
        assert_eq!(count_a.load(Ordering::SeqCst), 1);
        assert_eq!(count_b.load(Ordering::SeqCst), 0);

        subscriptions.push(bus.subscribe(observer_b));
        bus.send_full();
        assert_eq!(count_a.load(Ordering::SeqCst), 2);
        assert_eq!(count_b.load(Ordering::SeqCst), 1);

        subscriptions.pop();
        bus.send_full();
        assert_eq!(count_a.load(Ordering::SeqCst), 3);
        assert_eq!(count_b.load(Ordering::SeqCst), 1);

        subscriptions.pop();
        bus.send_full();
        assert_eq!(count_a.load(Ordering::SeqCst), 3);
        assert_eq!(count_b.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn dropping_subscription_releases_callback() {
        let bus = UpdateBus::new();
        let captured = Arc::new(());
        let weak = Arc::downgrade(&captured);

        let subscription = bus.subscribe(move |_| {
            drop(captured.clone());
        });
        assert!(weak.upgrade().is_some());

        subscription.unsubscribe();
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn delivering_without_subscribers_is_a_no_op() {
        let bus = UpdateBus::new();
        bus.send_full();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn delivery_follows_subscription_order() {
        let bus = UpdateBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let subscriptions: Vec<_> = (0..4)
            .map(|n| {
                let order = order.clone();
                bus.subscribe(move |_| order.lock().push(n))
            })
            .collect();

        bus.send_full();
        assert_eq!(*order.lock(), vec![0, 1, 2, 3]);
        drop(subscriptions);
    }

    #[test]
    fn subscriber_may_subscribe_during_delivery() {
        let bus = Arc::new(UpdateBus::new());
        let late = Arc::new(Mutex::new(Vec::new()));
        let (count, observer) = counter();
        let observer = Arc::new(observer);

        let bus_clone = bus.clone();
        let late_clone = late.clone();
        let _subscription = bus.subscribe(move |_| {
            let observer = observer.clone();
            late_clone
                .lock()
                .push(bus_clone.subscribe(move |u| observer(u)));
        });

        bus.send_full();
        // the late subscriber joins after the current delivery
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(bus.subscriber_count(), 2);

        late.lock().clear();
    }

    #[test]
    fn subscription_outlives_bus() {
        let bus = UpdateBus::new();
        let subscription = bus.subscribe(|_| {});
        assert!(subscription.is_active());

        drop(bus);
        assert!(!subscription.is_active());
    }
}
