//! Sequence Differ
//!
//! Computes an edit script that turns one ordered sequence into another.
//!
//! # Algorithm
//!
//! 1. Trim the common prefix and suffix. These elements always belong to a
//!    longest common subsequence, so they never need the quadratic table.
//!
//! 2. Fill a suffix table `lcs[i][j]` holding the length of the longest common
//!    subsequence of `old[i..]` and `new[j..]` for the untrimmed middle.
//!
//! 3. Walk the table from the top-left corner. Equal elements are matched,
//!    otherwise we step in the direction that keeps the longer subsequence,
//!    preferring a deletion on ties.
//!
//! The walk visits the sequences strictly left to right, so matching is
//! positional: duplicates pair up in order of appearance.
//!
//! # Step Order
//!
//! Deletions are emitted first, in descending old index, followed by
//! insertions in ascending new index. Applying the steps one by one in that
//! order against a mutable copy of `old` yields `new`.

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffStep {
    /// Insert the element found at this index of the new sequence.
    Insert(usize),

    /// Delete the element found at this index of the old sequence.
    Delete(usize),
}

impl DiffStep {
    /// The index this step refers to (new index for inserts, old for deletes).
    pub fn index(&self) -> usize {
        match *self {
            DiffStep::Insert(index) | DiffStep::Delete(index) => index,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, DiffStep::Insert(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, DiffStep::Delete(_))
    }
}

/// The result of diffing two sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceDiff {
    /// Deletions (descending) followed by insertions (ascending).
    steps: Vec<DiffStep>,

    /// Matched `(old_index, new_index)` pairs, ascending in both components.
    matches: Vec<(usize, usize)>,
}

impl SequenceDiff {
    /// The edit script.
    pub fn steps(&self) -> &[DiffStep] {
        &self.steps
    }

    /// Consume the diff, returning the edit script.
    pub fn into_steps(self) -> Vec<DiffStep> {
        self.steps
    }

    /// Elements kept by the script, as `(old_index, new_index)` pairs.
    pub fn matches(&self) -> &[(usize, usize)] {
        &self.matches
    }

    /// Old indices removed by the script, descending.
    pub fn deletions(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().filter(|s| s.is_delete()).map(DiffStep::index)
    }

    /// New indices added by the script, ascending.
    pub fn insertions(&self) -> impl Iterator<Item = usize> + '_ {
        self.steps.iter().filter(|s| s.is_insert()).map(DiffStep::index)
    }

    /// True if both sequences were equal.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Diff two sequences.
///
/// # Example
///
/// ```rust
/// use strata_core::diff::{diff, DiffStep};
///
/// let d = diff(&["a", "b", "c"], &["a", "c", "d"]);
/// assert_eq!(d.steps(), &[DiffStep::Delete(1), DiffStep::Insert(2)]);
/// ```
pub fn diff<T: PartialEq>(old: &[T], new: &[T]) -> SequenceDiff {
    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut matches: Vec<(usize, usize)> = (0..prefix).map(|i| (i, i)).collect();
    let mut deletions = Vec::new();
    let mut insertions = Vec::new();

    walk_middle(old_mid, new_mid, prefix, &mut matches, &mut deletions, &mut insertions);

    let old_tail = old.len() - suffix;
    let new_tail = new.len() - suffix;
    matches.extend((0..suffix).map(|k| (old_tail + k, new_tail + k)));

    let steps = deletions
        .into_iter()
        .rev()
        .map(DiffStep::Delete)
        .chain(insertions.into_iter().map(DiffStep::Insert))
        .collect();

    SequenceDiff { steps, matches }
}

/// Run the table walk over the untrimmed middle of both sequences.
///
/// `offset` is the length of the trimmed prefix, added back to every index.
fn walk_middle<T: PartialEq>(
    old: &[T],
    new: &[T],
    offset: usize,
    matches: &mut Vec<(usize, usize)>,
    deletions: &mut Vec<usize>,
    insertions: &mut Vec<usize>,
) {
    if old.is_empty() {
        insertions.extend((0..new.len()).map(|j| offset + j));
        return;
    }
    if new.is_empty() {
        deletions.extend((0..old.len()).map(|i| offset + i));
        return;
    }

    let table = LcsTable::build(old, new);

    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            matches.push((offset + i, offset + j));
            i += 1;
            j += 1;
        } else if table.get(i + 1, j) >= table.get(i, j + 1) {
            deletions.push(offset + i);
            i += 1;
        } else {
            insertions.push(offset + j);
            j += 1;
        }
    }
    deletions.extend((i..old.len()).map(|i| offset + i));
    insertions.extend((j..new.len()).map(|j| offset + j));
}

/// Suffix table of longest-common-subsequence lengths, stored row-major.
struct LcsTable {
    cells: Vec<usize>,
    width: usize,
}

impl LcsTable {
    fn build<T: PartialEq>(old: &[T], new: &[T]) -> Self {
        let width = new.len() + 1;
        let mut cells = vec![0; (old.len() + 1) * width];

        for i in (0..old.len()).rev() {
            for j in (0..new.len()).rev() {
                cells[i * width + j] = if old[i] == new[j] {
                    cells[(i + 1) * width + j + 1] + 1
                } else {
                    cells[(i + 1) * width + j].max(cells[i * width + j + 1])
                };
            }
        }

        Self { cells, width }
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
