//! View data context threaded through partial render calls

use std::collections::BTreeMap;

use minijinja::Value;
use serde::Serialize;

/// An ordered key-value bag of view data.
///
/// One bag is ambient on a [`PartialRenderer`](crate::PartialRenderer); a
/// caller-supplied bag can replace it for the duration of a single render
/// call via [`ContextScope::Override`].
#[derive(Debug, Clone, Default)]
pub struct ViewData {
    entries: BTreeMap<String, Value>,
}

impl ViewData {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a serializable value under the given key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) {
        self.entries.insert(key.into(), Value::from_serialize(value));
    }

    /// Insert an already-constructed template value under the given key
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Check whether the bag contains a key
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries in the bag
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clone the entries into a render context map
    pub(crate) fn to_context(&self) -> BTreeMap<String, Value> {
        self.entries.clone()
    }
}

/// Which view data a render call sees.
///
/// `Ambient` uses the renderer's own bag; `Override` replaces it with the
/// given bag for exactly one call. The ambient bag is never mutated by an
/// override.
#[derive(Debug, Clone, Copy)]
pub enum ContextScope<'a> {
    /// Use the renderer's ambient view data
    Ambient,
    /// Replace the ambient view data for this call only
    Override(&'a ViewData),
}

impl<'a> ContextScope<'a> {
    /// Pick the effective bag for one render call
    pub(crate) fn select(&self, ambient: &'a ViewData) -> &'a ViewData {
        match self {
            ContextScope::Ambient => ambient,
            ContextScope::Override(data) => data,
        }
    }
}
