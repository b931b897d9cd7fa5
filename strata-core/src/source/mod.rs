//! Collection Sources
//!
//! A source owns a sectioned collection, answers lookups for view bindings,
//! and publishes an [`Update`] on its bus for every mutation.
//!
//! # Sources
//!
//! - [`ListSource`] holds an in-memory `Vec` of sections. Replacing the
//!   value diffs old against new and delivers the result.
//!
//! - [`CompositeSource`] presents two sources as one, with all sections of
//!   the first preceding those of the second. Updates of the second source
//!   are shifted by the section count of the first.
//!
//! # Lookups
//!
//! Lookups never fail. Coordinates outside the collection yield `None` or a
//! count of zero.

mod composite;
mod error;
mod list;
mod section;

pub use composite::{CompositeItem, CompositeSource};
pub use error::{Result, SourceError};
pub use list::ListSource;
pub use section::{BasicSection, IdentifiedSection, Identity, Keyed, Section};

use crate::update::{IndexPath, Subscription, Update, UpdateBus};

/// Read access and update subscription for a sectioned collection.
pub trait DataSource {
    type Item: Clone;

    /// The bus this source publishes its updates on.
    fn bus(&self) -> &UpdateBus;

    fn section_count(&self) -> usize;

    /// Number of items in `section`, or zero if there is no such section.
    fn item_count(&self, section: usize) -> usize;

    /// The item at `at`, or `None` if the coordinate is out of range.
    fn item(&self, at: IndexPath) -> Option<Self::Item>;

    /// Register an observer for this source's updates.
    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Update) + Send + Sync + 'static,
        Self: Sized,
    {
        self.bus().subscribe(observer)
    }

    /// True if `at` addresses an existing item.
    fn contains(&self, at: IndexPath) -> bool {
        at.section < self.section_count() && at.item < self.item_count(at.section)
    }

    /// Every valid coordinate, section by section.
    fn index_paths(&self) -> IndexPaths<'_, Self>
    where
        Self: Sized,
    {
        IndexPaths {
            source: self,
            section: 0,
            item: 0,
        }
    }

    /// Every item, in display order.
    fn all_items(&self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        self.index_paths().filter_map(|at| self.item(at)).collect()
    }

    /// Coordinate of the first item equal to `item`.
    fn index_path_of(&self, item: &Self::Item) -> Option<IndexPath>
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        self.index_paths()
            .find(|&at| self.item(at).as_ref() == Some(item))
    }
}

/// Iterator over every valid coordinate of a source.
///
/// Empty sections are skipped.
#[derive(Debug)]
pub struct IndexPaths<'a, D> {
    source: &'a D,
    section: usize,
    item: usize,
}

impl<D: DataSource> Iterator for IndexPaths<'_, D> {
    type Item = IndexPath;

    fn next(&mut self) -> Option<IndexPath> {
        while self.section < self.source.section_count() {
            if self.item < self.source.item_count(self.section) {
                let at = IndexPath::new(self.section, self.item);
                self.item += 1;
                return Some(at);
            }
            self.section += 1;
            self.item = 0;
        }
        None
    }
}
