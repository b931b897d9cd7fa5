//! Update Suppression
//!
//! A view that performs a structural change itself (a drag-to-reorder
//! gesture, for instance) must not receive the same change a second time
//! from its source. While the view updates the source to match, it holds a
//! [`SuppressGuard`], and the binding ignores whatever the source delivers.
//!
//! The mutation must complete synchronously while the guard is alive.
//! Anything the source delivers after the guard is dropped is applied
//! normally.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared suppression state of one binding.
///
/// Guards nest: updates stay suppressed until the last guard is dropped.
#[derive(Debug, Clone, Default)]
pub struct Suppression {
    depth: Arc<AtomicUsize>,
}

impl Suppression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress updates until the returned guard is dropped.
    pub fn suppress(&self) -> SuppressGuard {
        self.depth.fetch_add(1, Ordering::SeqCst);
        SuppressGuard {
            depth: Arc::clone(&self.depth),
        }
    }

    /// True while at least one guard is alive.
    pub fn is_active(&self) -> bool {
        self.depth.load(Ordering::SeqCst) > 0
    }
}

/// Guard that lifts the suppression when dropped.
#[must_use = "updates are only suppressed while the guard is alive"]
#[derive(Debug)]
pub struct SuppressGuard {
    depth: Arc<AtomicUsize>,
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        let previous = self.depth.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "SuppressGuard dropped more often than created");
    }
}
