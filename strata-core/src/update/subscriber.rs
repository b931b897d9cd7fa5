//! Subscriber registrations.
//!
//! Every callback registered on an [`UpdateBus`](super::UpdateBus) is stored
//! as a [`Subscriber`]: the callback plus the key it is filed under.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::delta::Update;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Key of one registration.
///
/// Keys are process-wide unique and never reused, so a stale
/// [`Subscription`](super::Subscription) can never remove somebody else's
/// callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    fn next() -> Self {
        SubscriberId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

type Callback = Arc<dyn Fn(&Update) + Send + Sync>;

/// A registered callback.
///
/// Cloning is cheap; the bus clones its subscribers into a snapshot and
/// releases its lock before invoking them.
#[derive(Clone)]
pub struct Subscriber {
    id: SubscriberId,
    callback: Callback,
}

impl Subscriber {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Update) + Send + Sync + 'static,
    {
        Subscriber {
            id: SubscriberId::next(),
            callback: Arc::new(callback),
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn notify(&self, update: &Update) {
        (self.callback)(update);
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscriber").field(&self.id.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn every_subscriber_gets_a_fresh_id() {
        let ids: Vec<_> = (0..3).map(|_| Subscriber::new(|_| {}).id()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn clones_share_the_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let subscriber = Subscriber::new(move |update: &Update| sink.lock().push(update.clone()));

        let copy = subscriber.clone();
        assert_eq!(copy.id(), subscriber.id());

        subscriber.notify(&Update::Full);
        copy.notify(&Update::empty());
        assert_eq!(*seen.lock(), vec![Update::Full, Update::empty()]);
    }
}
