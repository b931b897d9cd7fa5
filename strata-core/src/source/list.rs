//! List Source
//!
//! A `ListSource` holds a sectioned collection in memory and publishes an
//! update every time the collection is replaced.
//!
//! # How It Works
//!
//! 1. A mutation swaps in the new collection under the write lock.
//!
//! 2. The old and new collections are diffed by
//!    [`compute_update`](crate::diff::compute_update).
//!
//! 3. The lock is released and the update, unless empty, is delivered to
//!    every subscriber before the mutating call returns.
//!
//! # Writers
//!
//! There is one writer at a time. Concurrent mutations of the same source
//! would interleave their updates and are out of contract.

use parking_lot::RwLock;
use tracing::trace;

use super::error::{Result, SourceError};
use super::section::Section;
use super::DataSource;
use crate::diff::compute_update;
use crate::update::{IndexPath, UpdateBus};

/// An in-memory sectioned collection.
///
/// # Example
///
/// ```rust
/// use strata_core::source::{DataSource, IdentifiedSection, ListSource};
/// use strata_core::update::IndexPath;
///
/// let source = ListSource::new(vec![IdentifiedSection::new("fruit", vec!["apple"])]);
/// let _subscription = source.subscribe(|update| println!("{update:?}"));
///
/// // Delivers a delta with one inserted row.
/// source.update(|sections| sections[0].items.push("pear"));
/// assert_eq!(source.item(IndexPath::new(0, 1)), Some("pear"));
/// ```
pub struct ListSource<S> {
    /// The current collection.
    sections: RwLock<Vec<S>>,

    /// Subscribers to this collection's updates.
    bus: UpdateBus,
}

impl<S> ListSource<S>
where
    S: Section + Clone,
{
    /// Create a source with the given initial sections.
    ///
    /// Nothing is delivered for the initial value.
    pub fn new(sections: Vec<S>) -> Self {
        Self {
            sections: RwLock::new(sections),
            bus: UpdateBus::new(),
        }
    }

    /// A copy of the current sections.
    pub fn sections(&self) -> Vec<S> {
        self.sections.read().clone()
    }

    /// A copy of the section at `index`.
    pub fn section(&self, index: usize) -> Option<S> {
        self.sections.read().get(index).cloned()
    }

    /// Read the current sections without copying them.
    ///
    /// The read lock is held while `f` runs; do not mutate this source from
    /// inside it.
    pub fn with_sections<R>(&self, f: impl FnOnce(&[S]) -> R) -> R {
        f(&self.sections.read())
    }

    /// Replace the collection and notify subscribers.
    pub fn set_sections(&self, sections: Vec<S>) {
        let update = {
            let mut current = self.sections.write();
            let old = std::mem::replace(&mut *current, sections);
            compute_update(old.as_slice(), current.as_slice())
        };

        if update.is_empty() {
            trace!("collection unchanged, nothing delivered");
            return;
        }

        self.bus.deliver(&update);
    }

    /// Edit a copy of the collection, then replace the current value with it.
    pub fn update(&self, f: impl FnOnce(&mut Vec<S>)) {
        let mut sections = self.sections();
        f(&mut sections);
        self.set_sections(sections);
    }

    /// Move one item to another position, possibly in another section.
    ///
    /// The item is removed at `from`, then inserted at `to`, where `to` is
    /// interpreted after the removal. The change is published like any other
    /// replacement, so subscribers see a deletion plus an insertion.
    pub fn move_item(&self, from: IndexPath, to: IndexPath) -> Result<()> {
        let mut sections = self.sections();

        let item = sections
            .get_mut(from.section)
            .filter(|section| from.item < section.items().len())
            .map(|section| section.items_mut().remove(from.item))
            .ok_or(SourceError::SourceOutOfRange { at: from })?;

        sections
            .get_mut(to.section)
            .filter(|section| to.item <= section.items().len())
            .ok_or(SourceError::DestinationOutOfRange { at: to })?
            .items_mut()
            .insert(to.item, item);

        trace!(%from, %to, "moving item");
        self.set_sections(sections);
        Ok(())
    }
}

impl<S> DataSource for ListSource<S>
where
    S: Section + Clone,
    S::Item: Clone,
{
    type Item = S::Item;

    fn bus(&self) -> &UpdateBus {
        &self.bus
    }

    fn section_count(&self) -> usize {
        self.sections.read().len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections
            .read()
            .get(section)
            .map_or(0, |section| section.items().len())
    }

    fn item(&self, at: IndexPath) -> Option<S::Item> {
        self.sections
            .read()
            .get(at.section)
            .and_then(|section| section.items().get(at.item).cloned())
    }
}

impl<S> Default for ListSource<S>
where
    S: Section + Clone,
{
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<S> std::fmt::Debug for ListSource<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSource")
            .field("sections", &*self.sections.read())
            .field("subscriber_count", &self.bus.subscriber_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
