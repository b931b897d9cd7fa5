//! Diffing
//!
//! This module turns two versions of a collection into an update.
//!
//! # Overview
//!
//! Diffing happens at two levels:
//!
//! - [`diff`] compares two flat sequences and produces an edit script of
//!   insertions and deletions. It never emits moves or in-place updates.
//!
//! - [`compute_update`] applies the sequence diff to section identities and,
//!   for each retained section, to its items. Identity information decides
//!   whether an item change is reported as an in-place update or as a
//!   deletion plus an insertion.
//!
//! # Cost
//!
//! The sequence diff is quadratic in the length of the sequences once their
//! common prefix and suffix are stripped. Operands are view-sized
//! collections, not bulk data.

mod compute;
mod sequence;

pub use compute::compute_update;
pub use sequence::{diff, DiffStep, SequenceDiff};
