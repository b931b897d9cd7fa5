//! View Bindings
//!
//! A binding connects a [`DataSource`](crate::source::DataSource) to
//! something that displays it, a table or a grid, and translates every
//! delivered [`Update`](crate::update::Update) into either an incremental
//! apply or a full reload.
//!
//! The presentation layer itself stays outside this crate. It implements
//! [`ViewTarget`] and receives deltas whose coordinates are ready to be
//! handed to its batch-update API.

mod binding;
mod config;
mod suppress;

pub use binding::{plan, BindingStats, ViewAction, ViewBinding, ViewTarget};
pub use config::BindingConfig;
pub use suppress::{SuppressGuard, Suppression};
