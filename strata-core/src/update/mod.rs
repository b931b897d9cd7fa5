//! Update Distribution
//!
//! This module holds the values that describe how a collection changed and
//! the machinery that hands them to interested parties.
//!
//! # Concepts
//!
//! ## Updates
//!
//! An [`Update`] is produced once per mutation of a collection. It is either
//! a [`Delta`], listing inserted, updated and deleted sections and rows, or
//! `Full`, which asks consumers to reload everything.
//!
//! ## Bus
//!
//! Every collection owns an [`UpdateBus`]. Consumers subscribe to it and get
//! back a [`Subscription`]; the registration lives exactly as long as that
//! handle. Delivery is synchronous, so consumers observe updates in the same
//! order the mutations happened.
//!
//! ## Recorder
//!
//! Producers that learn about changes piecemeal use a [`ChangeRecorder`] to
//! fold a batch of raw notifications into one delta.

mod bus;
mod delta;
mod recorder;
mod subscriber;

pub use bus::{Subscription, UpdateBus};
pub use delta::{Delta, IndexPath, Update};
pub use recorder::{Change, ChangeRecorder};
pub use subscriber::{Subscriber, SubscriberId};
