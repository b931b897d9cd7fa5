//! Update Computer
//!
//! Turns two versions of a sectioned collection into one [`Update`].
//!
//! # Algorithm
//!
//! 1. Every section of both versions must expose an identity. If any does
//!    not, the result is [`Update::Full`]: partial identity coverage is not
//!    safe to reason about incrementally.
//!
//! 2. Diff the sequences of section identities. This yields the inserted
//!    and deleted sections, and pairs up the retained ones.
//!
//! 3. For each retained pair:
//!    - if every item on both sides has an identity and the identity
//!      sequences are equal, compare the items position by position and
//!      report each difference as an updated row;
//!    - otherwise diff the item values and report inserted rows (new
//!      section index) and deleted rows (old section index).
//!
//! Reordering is never reported as a move. A section or item that changed
//! position shows up as a deletion plus an insertion.

use tracing::{debug, trace};

use super::sequence::{diff, DiffStep};
use crate::source::{Identity, Section};
use crate::update::{Delta, IndexPath, Update};

/// Compute the update that transforms `old` into `new`.
///
/// An empty [`Delta`] means nothing changed; callers should not deliver it.
pub fn compute_update<S: Section>(old: &[S], new: &[S]) -> Update {
    let (Some(old_ids), Some(new_ids)) = (section_identities(old), section_identities(new)) else {
        debug!(
            old_sections = old.len(),
            new_sections = new.len(),
            "sections lack identity, falling back to full update"
        );
        return Update::Full;
    };

    let mut delta = Delta::default();

    let sections = diff(&old_ids, &new_ids);
    for step in sections.steps() {
        match *step {
            DiffStep::Insert(index) => {
                delta.inserted_sections.insert(index);
            }
            DiffStep::Delete(index) => {
                delta.deleted_sections.insert(index);
            }
        }
    }

    for &(old_index, new_index) in sections.matches() {
        diff_section(
            old[old_index].items(),
            new[new_index].items(),
            old_index,
            new_index,
            &mut delta,
        );
    }

    trace!(
        inserted_sections = delta.inserted_sections.len(),
        deleted_sections = delta.deleted_sections.len(),
        inserted_rows = delta.inserted_rows.len(),
        updated_rows = delta.updated_rows.len(),
        deleted_rows = delta.deleted_rows.len(),
        "computed delta"
    );

    Update::Delta(delta)
}

/// Section identities, or `None` if any section lacks one.
fn section_identities<S: Section>(sections: &[S]) -> Option<Vec<&str>> {
    sections.iter().map(Section::identity).collect()
}

/// Item identities, or `None` if any item lacks one.
fn item_identities<T: Identity>(items: &[T]) -> Option<Vec<&str>> {
    items.iter().map(Identity::identity).collect()
}

/// Compare one retained section and append its row changes to `delta`.
fn diff_section<T: PartialEq + Identity>(
    old: &[T],
    new: &[T],
    old_section: usize,
    new_section: usize,
    delta: &mut Delta,
) {
    let in_place = matches!(
        (item_identities(old), item_identities(new)),
        (Some(a), Some(b)) if a == b
    );

    if in_place {
        delta.updated_rows.extend(
            old.iter()
                .zip(new)
                .enumerate()
                .filter(|(_, (before, after))| before != after)
                .map(|(item, _)| IndexPath::new(new_section, item)),
        );
        return;
    }

    for step in diff(old, new).steps() {
        match *step {
            DiffStep::Insert(item) => delta.inserted_rows.push(IndexPath::new(new_section, item)),
            DiffStep::Delete(item) => delta.deleted_rows.push(IndexPath::new(old_section, item)),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BasicSection, IdentifiedSection, Keyed};
    use std::collections::BTreeSet;

    fn section<T>(id: &str, items: Vec<T>) -> IdentifiedSection<T> {
        IdentifiedSection::new(id, items)
    }

    fn expect_delta(update: Update) -> Delta {
        match update {
            Update::Delta(delta) => delta,
            Update::Full => panic!("expected a delta, got a full update"),
        }
    }

    #[test]
    fn identical_collections_produce_empty_delta() {
        let data = vec![section("S1", vec!["A1", "A2"]), section("S2", vec!["B1"])];
        let update = compute_update(&data, &data.clone());
        assert!(update.is_empty());
    }

    #[test]
    fn unidentified_items_are_diffed_by_value() {
        let old = vec![section("S1", vec!["A1", "A2"]), section("S2", vec!["B1"])];
        let new = vec![section("S1", vec!["A2"]), section("S2", vec!["B1", "B2"])];

        let delta = expect_delta(compute_update(&old, &new));
        assert_eq!(delta.deleted_rows, vec![IndexPath::new(0, 0)]);
        assert_eq!(delta.inserted_rows, vec![IndexPath::new(1, 1)]);
        assert!(delta.updated_rows.is_empty());
        assert!(!delta.has_section_changes());
    }

    #[test]
    fn sections_without_identity_force_full_update() {
        let old = vec![BasicSection::new(vec![1])];
        let new = vec![BasicSection::new(vec![1, 2])];
        assert_eq!(compute_update(&old, &new), Update::Full);
    }

    #[test]
    fn empty_collections_without_identity_are_not_full() {
        let empty: Vec<BasicSection<i32>> = Vec::new();
        assert!(compute_update(&empty, &empty).is_empty());
        assert_eq!(
            compute_update(&empty, &[BasicSection::new(vec![1])]),
            Update::Full
        );
    }

    #[test]
    fn empty_to_populated_inserts_every_section() {
        let new = vec![section("a", vec![1]), section("b", vec![])];
        let empty: Vec<IdentifiedSection<i32>> = Vec::new();
        let delta = expect_delta(compute_update(&empty, &new));
        assert_eq!(delta.inserted_sections, BTreeSet::from([0, 1]));
        assert!(!delta.has_row_changes());

        let delta = expect_delta(compute_update(&new, &empty));
        assert_eq!(delta.deleted_sections, BTreeSet::from([0, 1]));
        assert!(!delta.has_row_changes());
    }

    #[test]
    fn inserted_sections_use_new_positions() {
        let old = vec![section("a", vec![1]), section("c", vec![3])];
        let new = vec![
            section("x", vec![9]),
            section("a", vec![1]),
            section("b", vec![2]),
            section("c", vec![3]),
        ];

        let delta = expect_delta(compute_update(&old, &new));
        assert_eq!(delta.inserted_sections, BTreeSet::from([0, 2]));
        assert!(delta.deleted_sections.is_empty());
        assert!(!delta.has_row_changes());
    }

    #[test]
    fn identified_items_in_same_order_become_updates() {
        let old = vec![
            section("S", vec![Keyed::new("1", true), Keyed::new("2", true)]),
            section("T", vec![Keyed::new("3", true)]),
        ];
        let mut new = old.clone();
        new[0].items[1].value = false;
        new[1].items[0].value = false;

        let delta = expect_delta(compute_update(&old, &new));
        assert_eq!(
            delta.updated_rows,
            vec![IndexPath::new(0, 1), IndexPath::new(1, 0)]
        );
        assert!(delta.inserted_rows.is_empty());
        assert!(delta.deleted_rows.is_empty());
        assert!(!delta.is_unsafe_for_incremental());
    }

    #[test]
    fn identified_items_with_changed_order_fall_back_to_diff() {
        let old = vec![section("S", vec![Keyed::new("1", 1), Keyed::new("2", 2)])];
        let new = vec![section("S", vec![Keyed::new("2", 2), Keyed::new("1", 1)])];

        let delta = expect_delta(compute_update(&old, &new));
        assert!(delta.updated_rows.is_empty());
        assert_eq!(delta.deleted_rows, vec![IndexPath::new(0, 0)]);
        assert_eq!(delta.inserted_rows, vec![IndexPath::new(0, 1)]);
    }

    #[test]
    fn rows_use_old_and_new_section_indices() {
        let old = vec![
            section("gone", vec![0]),
            section("kept", vec![1, 2, 3]),
        ];
        let new = vec![section("kept", vec![1, 3, 4])];

        let delta = expect_delta(compute_update(&old, &new));
        assert_eq!(delta.deleted_sections, BTreeSet::from([0]));
        assert_eq!(delta.deleted_rows, vec![IndexPath::new(1, 1)]);
        assert_eq!(delta.inserted_rows, vec![IndexPath::new(0, 2)]);
        assert!(delta.is_unsafe_for_incremental());
    }

    #[test]
    fn moving_items_between_sections_and_deleting_one_is_unsafe() {
        let item = |id: &str| Keyed::new(id, true);
        let old = vec![
            section("0", vec![item("0")]),
            section("1", vec![item("1")]),
            section("2", vec![item("2")]),
        ];
        let mut new = vec![
            section("0", vec![item("0"), item("1")]),
            section("2", vec![item("2")]),
        ];
        new[1].items[0].value = false;

        let update = compute_update(&old, &new);
        assert!(update.is_unsafe_for_incremental());

        let delta = expect_delta(update);
        assert_eq!(delta.deleted_sections, BTreeSet::from([1]));
        assert_eq!(delta.inserted_rows, vec![IndexPath::new(0, 1)]);
        assert_eq!(delta.updated_rows, vec![IndexPath::new(1, 0)]);
    }

    #[test]
    fn replaced_section_items_delete_descending_then_insert_ascending() {
        let old = vec![section("s", vec!["a", "b", "c"])];
        let new = vec![section("s", vec!["x", "y"])];

        let delta = expect_delta(compute_update(&old, &new));
        assert_eq!(
            delta.deleted_rows,
            vec![IndexPath::new(0, 2), IndexPath::new(0, 1), IndexPath::new(0, 0)]
        );
        assert_eq!(
            delta.inserted_rows,
            vec![IndexPath::new(0, 0), IndexPath::new(0, 1)]
        );
    }

    #[test]
    fn updated_sections_are_never_produced() {
        let old = vec![section("a", vec![1, 2]), section("b", vec![3])];
        let new = vec![section("b", vec![4]), section("c", vec![])];
        let delta = expect_delta(compute_update(&old, &new));
        assert!(delta.updated_sections.is_empty());
    }
}
