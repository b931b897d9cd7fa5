//! Sections and Items
//!
//! A collection is a list of sections, each holding an ordered list of items.
//! Both sections and items may expose a stable identity, a string key that
//! recognizes "the same thing" across two versions of a collection even when
//! its content changed.
//!
//! Identity is an optional capability. Sections without one make the update
//! computer fall back to [`Update::Full`](crate::update::Update::Full); items
//! without one are diffed by value instead of being updated in place.

/// Optional stable identity of a section or item.
///
/// The default implementation reports no identity.
pub trait Identity {
    fn identity(&self) -> Option<&str> {
        None
    }
}

macro_rules! anonymous_identity {
    ($($ty:ty),* $(,)?) => {
        $(impl Identity for $ty {})*
    };
}

anonymous_identity!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &str,
);

impl<T: Identity + ?Sized> Identity for Box<T> {
    fn identity(&self) -> Option<&str> {
        (**self).identity()
    }
}

impl<T: Identity + ?Sized> Identity for std::sync::Arc<T> {
    fn identity(&self) -> Option<&str> {
        (**self).identity()
    }
}

/// A section of a collection.
pub trait Section {
    type Item: PartialEq + Identity;

    /// The items of this section, in display order.
    fn items(&self) -> &[Self::Item];

    /// Mutable access to the items, used by item moves.
    fn items_mut(&mut self) -> &mut Vec<Self::Item>;

    /// Stable identity of the section, if it has one.
    fn identity(&self) -> Option<&str> {
        None
    }
}

/// A section without identity.
///
/// Collections of these always produce full updates, except when both
/// versions are empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicSection<T> {
    pub items: Vec<T>,
}

impl<T> BasicSection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: PartialEq + Identity> Section for BasicSection<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

impl<T> From<Vec<T>> for BasicSection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for BasicSection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A section carrying a string identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedSection<T> {
    pub identity: String,
    pub items: Vec<T>,
}

impl<T> IdentifiedSection<T> {
    pub fn new(identity: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            identity: identity.into(),
            items,
        }
    }
}

impl<T: PartialEq + Identity> Section for IdentifiedSection<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    fn identity(&self) -> Option<&str> {
        Some(&self.identity)
    }
}

/// An item with a string key.
///
/// Two `Keyed` values are equal only if both key and value match; the key
/// alone decides whether they are "the same item" across versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyed<T> {
    pub key: String,
    pub value: T,
}

impl<T> Keyed<T> {
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl<T> Identity for Keyed<T> {
    fn identity(&self) -> Option<&str> {
        Some(&self.key)
    }
}
