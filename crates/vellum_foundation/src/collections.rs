//! Collection payloads for the variant kinds.
//!
//! All five are thin wrappers over `im` persistent structures: clones are
//! O(1) and copy-on-write, so mutating a collection reached through one
//! variant can never be observed through another.

use chrono::NaiveDateTime;
use im::{OrdMap, Vector};

use crate::error::{Error, Result};
use crate::value::Variant;

/// An ordered, growable sequence of variants.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct List {
    items: Vector<Variant>,
}

impl List {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Appends a value.
    pub fn push(&mut self, value: Variant) {
        self.items.push_back(value);
    }

    /// The element at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Variant> {
        self.items.get(index)
    }

    /// Replaces the element at `index`.
    pub fn set(&mut self, index: usize, value: Variant) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::index_out_of_range(index, self.items.len()));
        }
        self.items.set(index, value);
        Ok(())
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.items.iter()
    }
}

impl FromIterator<Variant> for List {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// A fixed-arity sequence of variants.
///
/// The arity is set at construction and never changes; `clear` resets every
/// slot to `Variant::None` instead of shrinking.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuple {
    slots: Vector<Variant>,
}

impl Tuple {
    /// Creates a tuple of `arity` slots, each initialized to `Variant::None`.
    #[must_use]
    pub fn new(arity: usize) -> Self {
        Self {
            slots: std::iter::repeat_n(Variant::None, arity).collect(),
        }
    }

    /// The fixed arity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the arity is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resets every slot to `Variant::None`; the arity is unchanged.
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            self.slots.set(index, Variant::None);
        }
    }

    /// The slot at `index`.
    pub fn get(&self, index: usize) -> Result<&Variant> {
        self.slots
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.slots.len()))
    }

    /// Replaces the slot at `index`.
    pub fn set(&mut self, index: usize, value: Variant) -> Result<()> {
        if index >= self.slots.len() {
            return Err(Error::index_out_of_range(index, self.slots.len()));
        }
        self.slots.set(index, value);
        Ok(())
    }

    /// Iterates the slots in order.
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.slots.iter()
    }
}

impl FromIterator<Variant> for Tuple {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

/// A unique-key mapping with canonical (key-sorted) enumeration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dictionary {
    entries: OrdMap<String, Variant>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Inserts a value, replacing any existing entry for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Variant) {
        self.entries.insert(key.into(), value);
    }

    /// Removes the entry for `key`.
    pub fn remove(&mut self, key: &str) -> Result<Variant> {
        self.entries
            .remove(key)
            .ok_or_else(|| Error::missing_key(key))
    }

    /// The value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.entries.get(key)
    }

    /// True if `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates entries in key-sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Variant)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, Variant)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (String, Variant)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A multimap preserving insertion order; duplicate keys are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bag {
    entries: Vector<(String, Variant)>,
}

impl Bag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Appends an entry; existing entries for `key` are kept.
    pub fn insert(&mut self, key: impl Into<String>, value: Variant) {
        self.entries.push_back((key.into(), value));
    }

    /// Removes every entry for `key`.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        if self.entries.len() == before {
            return Err(Error::missing_key(key));
        }
        Ok(())
    }

    /// The first value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// True if `key` has at least one entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// All values for `key`, in insertion order.
    pub fn range<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Variant> {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Variant)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(String, Variant)> for Bag {
    fn from_iter<I: IntoIterator<Item = (String, Variant)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// (time, value) observations preserving insertion order.
///
/// Times are not required to be distinct or sorted; the series is a log, not
/// an index.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSeries {
    entries: Vector<(NaiveDateTime, Variant)>,
}

impl TimeSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all observations.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Appends an observation.
    pub fn push_at(&mut self, time: NaiveDateTime, value: Variant) {
        self.entries.push_back((time, value));
    }

    /// Iterates observations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, &Variant)> {
        self.entries.iter().map(|(t, v)| (*t, v))
    }
}

impl FromIterator<(NaiveDateTime, Variant)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDateTime, Variant)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
