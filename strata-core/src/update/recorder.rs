//! Change Recorder
//!
//! Some collections cannot be diffed because the producer never holds two
//! versions side by side. A store-backed provider, for example, reports
//! changes one at a time as it applies them. The recorder collects those raw
//! notifications and turns them into a single [`Delta`] when the provider
//! signals that its batch is complete.
//!
//! Moves are recorded as an insertion at the destination plus a deletion at
//! the source, matching the rest of the crate.

use std::collections::{BTreeSet, HashSet};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::bus::UpdateBus;
use super::delta::{Delta, IndexPath, Update};

/// A raw change notification from an external provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    SectionInserted(usize),
    SectionDeleted(usize),
    RowInserted(IndexPath),
    RowDeleted(IndexPath),
    RowUpdated(IndexPath),
    RowMoved { from: IndexPath, to: IndexPath },
}

#[derive(Debug, Default)]
struct Pending {
    inserted_sections: BTreeSet<usize>,
    deleted_sections: BTreeSet<usize>,
    inserted_rows: HashSet<IndexPath>,
    updated_rows: HashSet<IndexPath>,
    deleted_rows: HashSet<IndexPath>,
}

impl Pending {
    fn apply(&mut self, change: Change) {
        match change {
            Change::SectionInserted(section) => {
                self.inserted_sections.insert(section);
            }
            Change::SectionDeleted(section) => {
                self.deleted_sections.insert(section);
            }
            Change::RowInserted(at) => {
                self.inserted_rows.insert(at);
            }
            Change::RowDeleted(at) => {
                self.deleted_rows.insert(at);
            }
            Change::RowUpdated(at) => {
                self.updated_rows.insert(at);
            }
            Change::RowMoved { from, to } => {
                self.inserted_rows.insert(to);
                self.deleted_rows.insert(from);
            }
        }
    }

    fn into_delta(self) -> Delta {
        fn sorted(rows: HashSet<IndexPath>) -> Vec<IndexPath> {
            let mut rows: Vec<_> = rows.into_iter().collect();
            rows.sort_unstable();
            rows
        }

        Delta {
            inserted_sections: self.inserted_sections,
            updated_sections: BTreeSet::new(),
            deleted_sections: self.deleted_sections,
            inserted_rows: sorted(self.inserted_rows),
            updated_rows: sorted(self.updated_rows),
            deleted_rows: sorted(self.deleted_rows),
        }
    }
}

/// Accumulates raw change notifications into one update per batch.
#[derive(Debug, Default)]
pub struct ChangeRecorder {
    pending: Mutex<Pending>,
}

impl ChangeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one change of the current batch.
    pub fn record(&self, change: Change) {
        trace!(?change, "recorded change");
        self.pending.lock().apply(change);
    }

    /// Drop every change recorded since the last commit.
    pub fn discard(&self) {
        *self.pending.lock() = Pending::default();
    }

    /// Finish the batch, returning the accumulated delta and resetting.
    pub fn take(&self) -> Delta {
        std::mem::take(&mut *self.pending.lock()).into_delta()
    }

    /// Finish the batch and deliver it on `bus` unless it is empty.
    ///
    /// Returns the delivered update, if any.
    pub fn commit(&self, bus: &UpdateBus) -> Option<Update> {
        let delta = self.take();
        if delta.is_empty() {
            debug!("empty batch, nothing delivered");
            return None;
        }

        let update = Update::Delta(delta);
        bus.deliver(&update);
        Some(update)
    }
}
