//! Strata Core
//!
//! This crate keeps sectioned list and grid views in sync with the data they
//! display. It implements:
//!
//! - A longest-common-subsequence diff over flat sequences
//! - An update computer that turns two versions of a sectioned collection
//!   into section and row changes
//! - An update bus with subscription handles that unregister on drop
//! - Sources that publish updates, including a composite that presents two
//!   sources as one
//! - View bindings that decide between incremental updates and reloads
//!
//! # Architecture
//!
//! - `diff`: sequence diff and update computation
//! - `update`: update values, the bus, and change recording
//! - `source`: sections, identity, and data sources
//! - `view`: bindings between sources and views
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use parking_lot::Mutex;
//! use strata_core::source::{DataSource, IdentifiedSection, ListSource};
//! use strata_core::update::{IndexPath, Update};
//!
//! let source = ListSource::new(vec![
//!     IdentifiedSection::new("todo", vec!["write", "test"]),
//!     IdentifiedSection::new("done", vec!["plan"]),
//! ]);
//!
//! let received = Arc::new(Mutex::new(Vec::new()));
//! let sink = received.clone();
//! let _subscription = source.subscribe(move |update| sink.lock().push(update.clone()));
//!
//! source.move_item(IndexPath::new(0, 0), IndexPath::new(1, 0)).unwrap();
//!
//! let received = received.lock();
//! let delta = received[0].as_delta().unwrap();
//! assert_eq!(delta.deleted_rows, vec![IndexPath::new(0, 0)]);
//! assert_eq!(delta.inserted_rows, vec![IndexPath::new(1, 0)]);
//! ```

pub mod diff;
pub mod source;
pub mod update;
pub mod view;
