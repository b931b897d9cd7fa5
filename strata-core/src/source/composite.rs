//! Composite Source
//!
//! Presents two sources as one collection. Every section of the first source
//! comes before every section of the second.
//!
//! # Index Mapping
//!
//! Section `s` of the composite maps to section `s` of the first source when
//! `s` is below the first source's section count `n`, and to section `s - n`
//! of the second source otherwise.
//!
//! Updates from the first source are forwarded unchanged. Deltas from the
//! second source have `n` added to every section index, with `n` read at the
//! moment the delta is delivered. That read is only meaningful if the first
//! source is not mid-mutation, so at most one structural update may be in
//! flight for the composite at a time.

use std::sync::Arc;

use tracing::debug;

use super::DataSource;
use crate::update::{IndexPath, Subscription, UpdateBus};

/// An item of a [`CompositeSource`], tagged with the source it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeItem<A, B> {
    First(A),
    Second(B),
}

/// Where a composite section lives.
enum Side {
    First(usize),
    Second(usize),
}

/// Two sources presented as one.
pub struct CompositeSource<A, B> {
    first: Arc<A>,
    second: Arc<B>,
    bus: Arc<UpdateBus>,
    _subscriptions: [Subscription; 2],
}

impl<A, B> CompositeSource<A, B>
where
    A: DataSource + Send + Sync + 'static,
    B: DataSource + Send + Sync + 'static,
{
    /// Compose `first` and `second`, subscribing to both.
    ///
    /// The subscriptions are released when the composite is dropped.
    pub fn new(first: Arc<A>, second: Arc<B>) -> Self {
        let bus = Arc::new(UpdateBus::new());

        let first_subscription = {
            let bus = Arc::downgrade(&bus);
            first.subscribe(move |update| {
                if let Some(bus) = bus.upgrade() {
                    debug!("forwarding update from first source");
                    bus.deliver(update);
                }
            })
        };

        let second_subscription = {
            let bus = Arc::downgrade(&bus);
            let first = Arc::downgrade(&first);
            second.subscribe(move |update| {
                let (Some(bus), Some(first)) = (bus.upgrade(), first.upgrade()) else {
                    return;
                };
                let offset = first.section_count();
                debug!(offset, "forwarding update from second source");
                bus.deliver(&update.offset_sections(offset));
            })
        };

        Self {
            first,
            second,
            bus,
            _subscriptions: [first_subscription, second_subscription],
        }
    }

    pub fn first(&self) -> &Arc<A> {
        &self.first
    }

    pub fn second(&self) -> &Arc<B> {
        &self.second
    }

    fn locate(&self, section: usize) -> Side {
        let leading = self.first.section_count();
        if section < leading {
            Side::First(section)
        } else {
            Side::Second(section - leading)
        }
    }
}

impl<A, B> DataSource for CompositeSource<A, B>
where
    A: DataSource + Send + Sync + 'static,
    B: DataSource + Send + Sync + 'static,
{
    type Item = CompositeItem<A::Item, B::Item>;

    fn bus(&self) -> &UpdateBus {
        &self.bus
    }

    fn section_count(&self) -> usize {
        self.first.section_count() + self.second.section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        match self.locate(section) {
            Side::First(section) => self.first.item_count(section),
            Side::Second(section) => self.second.item_count(section),
        }
    }

    fn item(&self, at: IndexPath) -> Option<Self::Item> {
        match self.locate(at.section) {
            Side::First(section) => self
                .first
                .item(IndexPath::new(section, at.item))
                .map(CompositeItem::First),
            Side::Second(section) => self
                .second
                .item(IndexPath::new(section, at.item))
                .map(CompositeItem::Second),
        }
    }
}

impl<A, B> std::fmt::Debug for CompositeSource<A, B>
where
    A: std::fmt::Debug,
    B: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeSource")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("bus", &self.bus)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
