//! View Binding
//!
//! A binding subscribes a view to a source and turns each incoming update
//! into one call on the view.
//!
//! # Decision
//!
//! For every update the binding picks one [`ViewAction`]:
//!
//! 1. Empty deltas and updates arriving while suppressed are skipped.
//!
//! 2. `Full`, a detached view, or a reload-only configuration cause a
//!    reload.
//!
//! 3. Deltas that change sections and rows at once are reloaded as well,
//!    unless the configuration opts out.
//!
//! 4. Everything else is applied incrementally.
//!
//! # Locking
//!
//! The view is kept behind a mutex and locked for the duration of each call.
//! View callbacks must not call back into their own binding.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::config::BindingConfig;
use super::suppress::{SuppressGuard, Suppression};
use crate::source::{DataSource, ListSource, Result, Section};
use crate::update::{Delta, IndexPath, Subscription, Update};

/// A view that can display a sectioned collection.
pub trait ViewTarget: Send {
    /// Apply a delta incrementally.
    fn apply_delta(&mut self, delta: &Delta);

    /// Re-read everything from the source.
    fn reload(&mut self);

    /// Whether the view is currently on screen. Detached views are reloaded
    /// instead of animated.
    fn is_attached(&self) -> bool {
        true
    }
}

/// What a binding does with one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Skip,
    Apply,
    Reload,
}

/// Decide how to present `update`.
pub fn plan(update: &Update, config: &BindingConfig, attached: bool) -> ViewAction {
    match update {
        _ if update.is_empty() => ViewAction::Skip,
        Update::Full => ViewAction::Reload,
        Update::Delta(_) if !attached || !config.incremental => ViewAction::Reload,
        Update::Delta(delta) if config.reload_on_unsafe && delta.is_unsafe_for_incremental() => {
            ViewAction::Reload
        }
        Update::Delta(_) => ViewAction::Apply,
    }
}

/// Counts of what a binding did so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingStats {
    pub applied: usize,
    pub reloaded: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
struct Counters {
    applied: AtomicUsize,
    reloaded: AtomicUsize,
    skipped: AtomicUsize,
}

/// Keeps a [`ViewTarget`] in sync with a [`DataSource`].
///
/// Dropping the binding unsubscribes the view.
pub struct ViewBinding<T> {
    target: Arc<Mutex<T>>,
    suppression: Suppression,
    counters: Arc<Counters>,
    _subscription: Subscription,
}

impl<T> ViewBinding<T>
where
    T: ViewTarget + 'static,
{
    /// Subscribe `target` to `source`.
    pub fn new<D: DataSource>(source: &D, target: T, config: BindingConfig) -> Self {
        let target = Arc::new(Mutex::new(target));
        let suppression = Suppression::new();
        let counters = Arc::new(Counters::default());

        let subscription = {
            let target = Arc::clone(&target);
            let suppression = suppression.clone();
            let counters = Arc::clone(&counters);

            source.subscribe(move |update| {
                if suppression.is_active() {
                    trace!("update suppressed");
                    counters.skipped.fetch_add(1, Ordering::Relaxed);
                    return;
                }

                let mut target = target.lock();
                match (plan(update, &config, target.is_attached()), update) {
                    (ViewAction::Apply, Update::Delta(delta)) => {
                        target.apply_delta(delta);
                        counters.applied.fetch_add(1, Ordering::Relaxed);
                    }
                    (ViewAction::Reload, _) => {
                        debug!(full = update.is_full(), "reloading view");
                        target.reload();
                        counters.reloaded.fetch_add(1, Ordering::Relaxed);
                    }
                    _ => {
                        counters.skipped.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        };

        Self {
            target,
            suppression,
            counters,
            _subscription: subscription,
        }
    }

    /// Run `f` with exclusive access to the view.
    pub fn with_target<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.target.lock())
    }

    /// Ignore incoming updates until the returned guard is dropped.
    pub fn suppress(&self) -> SuppressGuard {
        self.suppression.suppress()
    }

    /// Move an item in `source` after the view already moved the row.
    ///
    /// The resulting update is suppressed so the move is not applied twice.
    pub fn reorder<S>(&self, source: &ListSource<S>, from: IndexPath, to: IndexPath) -> Result<()>
    where
        S: Section + Clone,
    {
        let _guard = self.suppress();
        source.move_item(from, to)
    }

    pub fn stats(&self) -> BindingStats {
        BindingStats {
            applied: self.counters.applied.load(Ordering::Relaxed),
            reloaded: self.counters.reloaded.load(Ordering::Relaxed),
            skipped: self.counters.skipped.load(Ordering::Relaxed),
        }
    }
}

impl<T> std::fmt::Debug for ViewBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewBinding")
            .field("suppression", &self.suppression)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
