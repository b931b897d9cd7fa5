//! Update values
//!
//! An [`Update`] describes how a sectioned collection changed between two
//! versions. It is either a [`Delta`] with coordinate-precise changes or
//! [`Update::Full`], which tells the consumer to start over.
//!
//! # Coordinate Spaces
//!
//! Inserted sections and rows are expressed in the coordinate space of the
//! new collection. Deleted sections and rows use the coordinate space of the
//! old collection. Updated rows refer to items that were matched by identity
//! and did not move, and carry the new section index.

use std::collections::BTreeSet;
use std::fmt;

/// A `(section, item)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Shift the section component by `offset`.
    pub const fn offset_section(self, offset: usize) -> Self {
        Self {
            section: self.section + offset,
            item: self.item,
        }
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

/// A coordinate-precise set of changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    /// Sections inserted, indexed in the new collection.
    pub inserted_sections: BTreeSet<usize>,

    /// Sections reloaded wholesale. Never produced by the update computer,
    /// but external producers may fill it.
    pub updated_sections: BTreeSet<usize>,

    /// Sections deleted, indexed in the old collection.
    pub deleted_sections: BTreeSet<usize>,

    /// Rows inserted, indexed in the new collection.
    pub inserted_rows: Vec<IndexPath>,

    /// Rows whose content changed in place.
    pub updated_rows: Vec<IndexPath>,

    /// Rows deleted, indexed in the old collection.
    pub deleted_rows: Vec<IndexPath>,
}

impl Delta {
    /// True if no change of any kind is recorded.
    pub fn is_empty(&self) -> bool {
        !self.has_section_changes() && !self.has_row_changes()
    }

    /// True if any section-level set is nonempty.
    pub fn has_section_changes(&self) -> bool {
        !(self.inserted_sections.is_empty()
            && self.updated_sections.is_empty()
            && self.deleted_sections.is_empty())
    }

    /// True if any row-level sequence is nonempty.
    pub fn has_row_changes(&self) -> bool {
        !(self.inserted_rows.is_empty()
            && self.updated_rows.is_empty()
            && self.deleted_rows.is_empty())
    }

    /// Whether a view should avoid applying this delta incrementally.
    ///
    /// Mixing section-level and row-level changes in one batch is ambiguous
    /// for many incremental view update APIs, so such deltas should be
    /// applied as a full reload instead.
    pub fn is_unsafe_for_incremental(&self) -> bool {
        self.has_section_changes() && self.has_row_changes()
    }

    /// Add `offset` to every section index and every row's section.
    pub fn offset_sections(&self, offset: usize) -> Delta {
        let shift_set =
            |set: &BTreeSet<usize>| -> BTreeSet<usize> { set.iter().map(|s| s + offset).collect() };
        let shift_rows = |rows: &[IndexPath]| -> Vec<IndexPath> {
            rows.iter()
                .map(|path| path.offset_section(offset))
                .collect()
        };

        Delta {
            inserted_sections: shift_set(&self.inserted_sections),
            updated_sections: shift_set(&self.updated_sections),
            deleted_sections: shift_set(&self.deleted_sections),
            inserted_rows: shift_rows(&self.inserted_rows),
            updated_rows: shift_rows(&self.updated_rows),
            deleted_rows: shift_rows(&self.deleted_rows),
        }
    }
}

/// A change notification for one mutation of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Coordinate-precise changes.
    Delta(Delta),

    /// Discard every incremental assumption and re-derive from scratch.
    Full,
}

impl Update {
    /// An update with no changes at all.
    pub fn empty() -> Self {
        Update::Delta(Delta::default())
    }

    /// True for a delta carrying no changes. `Full` is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Update::Delta(delta) => delta.is_empty(),
            Update::Full => false,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Update::Full)
    }

    pub fn as_delta(&self) -> Option<&Delta> {
        match self {
            Update::Delta(delta) => Some(delta),
            Update::Full => None,
        }
    }

    /// See [`Delta::is_unsafe_for_incremental`]. `Full` is never unsafe.
    pub fn is_unsafe_for_incremental(&self) -> bool {
        self.as_delta()
            .is_some_and(Delta::is_unsafe_for_incremental)
    }

    /// Shift section indices by `offset`; `Full` is returned unchanged.
    pub fn offset_sections(&self, offset: usize) -> Update {
        match self {
            Update::Delta(delta) => Update::Delta(delta.offset_sections(offset)),
            Update::Full => Update::Full,
        }
    }
}

impl From<Delta> for Update {
    fn from(delta: Delta) -> Self {
        Update::Delta(delta)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn with_sections() -> Delta {
        Delta {
            inserted_sections: [0].into(),
            ..Delta::default()
        }
    }

    fn with_rows() -> Delta {
        Delta {
            deleted_rows: vec![IndexPath::new(0, 1)],
            ..Delta::default()
        }
    }

    #[test]
    fn empty_delta_is_empty() {
        assert!(Delta::default().is_empty());
        assert!(Update::empty().is_empty());
        assert!(!Update::Full.is_empty());
        assert!(!with_rows().is_empty());
        assert!(!with_sections().is_empty());
    }

    #[test]
    fn unsafe_flag_truth_table() {
        // neither
        assert!(!Delta::default().is_unsafe_for_incremental());
        // sections only
        assert!(!with_sections().is_unsafe_for_incremental());
        // rows only
        assert!(!with_rows().is_unsafe_for_incremental());
        // both
        let both = Delta {
            updated_rows: vec![IndexPath::new(2, 0)],
            ..with_sections()
        };
        assert!(both.is_unsafe_for_incremental());

        assert!(!Update::Full.is_unsafe_for_incremental());
        assert!(Update::from(both).is_unsafe_for_incremental());
    }

    #[test]
    fn unsafe_flag_counts_updated_sections() {
        let delta = Delta {
            updated_sections: [3].into(),
            inserted_rows: vec![IndexPath::new(0, 0)],
            ..Delta::default()
        };
        assert!(delta.is_unsafe_for_incremental());
    }

    #[test]
    fn offset_shifts_every_section_coordinate() {
        let delta = Delta {
            inserted_sections: [0].into(),
            updated_sections: [1].into(),
            deleted_sections: [2].into(),
            inserted_rows: vec![IndexPath::new(1, 0)],
            updated_rows: vec![IndexPath::new(0, 4)],
            deleted_rows: vec![IndexPath::new(2, 3), IndexPath::new(2, 1)],
        };

        let shifted = delta.offset_sections(2);
        assert_eq!(shifted.inserted_sections, BTreeSet::from([2]));
        assert_eq!(shifted.updated_sections, BTreeSet::from([3]));
        assert_eq!(shifted.deleted_sections, BTreeSet::from([4]));
        assert_eq!(shifted.inserted_rows, vec![IndexPath::new(3, 0)]);
        assert_eq!(shifted.updated_rows, vec![IndexPath::new(2, 4)]);
        assert_eq!(
            shifted.deleted_rows,
            vec![IndexPath::new(4, 3), IndexPath::new(4, 1)]
        );
    }

    #[test]
    fn offset_leaves_full_alone() {
        assert_eq!(Update::Full.offset_sections(10), Update::Full);
    }

    #[test]
    fn index_path_ordering_and_display() {
        assert!(IndexPath::new(0, 9) < IndexPath::new(1, 0));
        assert_eq!(IndexPath::from((2, 5)), IndexPath::new(2, 5));
        assert_eq!(IndexPath::new(2, 5).to_string(), "[2, 5]");
    }
}
