//! Secondary indexes.
//!
//! An [`Index`] maps a key computed from each element (the index key) to that element's
//! primary key: a string key in a Map, a position in a Sequence. Indexes are derived
//! caches; the owning collection keeps them consistent and rebuilds them whenever
//! primary keys can move.
//!
//! Index keys are not unique-checked. When two elements produce the same index key the
//! later one wins.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::{Result, collection::CollectionError, constants::MISSING_FIELD_KEY, value::Value};

/// Callback computing an element's index key.
pub type KeyFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Returns a key function reading field `name` of object elements.
///
/// Non-objects and objects without the field produce the empty key.
///
/// ```
/// use typed_collections::{Object, Value, collection::index::by_field};
///
/// let key_fn = by_field("id");
/// let element = Value::from(Object::new().with("id", "foo"));
/// assert_eq!(key_fn(&element), "foo");
/// assert_eq!(key_fn(&Value::from(3)), "");
/// ```
pub fn by_field(name: impl Into<String>) -> KeyFn {
    let name = name.into();
    Arc::new(move |element: &Value| {
        element
            .field(&name)
            .map_or_else(|| MISSING_FIELD_KEY.to_string(), Value::to_key_string)
    })
}

/// A single secondary index.
#[derive(Clone)]
pub struct Index<K> {
    key_fn: KeyFn,
    table: HashMap<String, K>,
}

impl<K: Clone + PartialEq> Index<K> {
    /// Create an empty index
    pub fn new(key_fn: KeyFn) -> Self {
        Self {
            key_fn,
            table: HashMap::new(),
        }
    }

    /// Computes the index key for an element
    pub fn key_for(&self, element: &Value) -> String {
        (self.key_fn)(element)
    }

    /// Records `element` under `primary`. Overwrites any previous entry for the same
    /// index key.
    pub fn add(&mut self, primary: K, element: &Value) -> &mut Self {
        let key = self.key_for(element);
        self.table.insert(key, primary);
        self
    }

    /// Looks up the primary key recorded for an index key
    pub fn get(&self, index_key: &str) -> Option<&K> {
        self.table.get(index_key)
    }

    /// Drops every entry pointing at `primary`
    pub fn remove(&mut self, primary: &K) -> &mut Self {
        self.table.retain(|_, recorded| recorded != primary);
        self
    }

    /// Empties the index
    pub fn clear(&mut self) -> &mut Self {
        self.table.clear();
        self
    }

    /// Number of index keys
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the index has no entries
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: fmt::Debug> fmt::Debug for Index<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

/// The indexes owned by one collection, keyed by caller-chosen id.
#[derive(Clone, Debug)]
pub(crate) struct Indexes<K> {
    by_id: BTreeMap<String, Index<K>>,
}

impl<K> Default for Indexes<K> {
    fn default() -> Self {
        Self {
            by_id: BTreeMap::new(),
        }
    }
}

impl<K: Clone + PartialEq> Indexes<K> {
    pub(crate) fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Index<K>> {
        self.by_id.get(id)
    }

    /// Builds an index over `entries` and registers it, replacing any index with the
    /// same id.
    pub(crate) fn insert<'a>(
        &mut self,
        id: String,
        key_fn: KeyFn,
        entries: impl Iterator<Item = (K, &'a Value)>,
    ) {
        let mut index = Index::new(key_fn);
        for (primary, element) in entries {
            index.add(primary, element);
        }
        tracing::trace!(index = %id, keys = index.len(), "Built index");
        self.by_id.insert(id, index);
    }

    pub(crate) fn remove(&mut self, id: &str) -> bool {
        let removed = self.by_id.remove(id).is_some();
        if removed {
            tracing::trace!(index = %id, "Removed index");
        }
        removed
    }

    /// Records one element in every index.
    pub(crate) fn add(&mut self, primary: &K, element: &Value) {
        for index in self.by_id.values_mut() {
            index.add(primary.clone(), element);
        }
    }

    /// Empties every index, keeping the registrations.
    pub(crate) fn clear(&mut self) {
        for index in self.by_id.values_mut() {
            index.clear();
        }
    }

    /// Clears every index and re-adds all `entries`.
    ///
    /// O(n * k) for n entries and k indexes. No-op when no index is registered.
    pub(crate) fn rebuild<'a>(&mut self, entries: impl Iterator<Item = (K, &'a Value)>) {
        if self.by_id.is_empty() {
            return;
        }

        self.clear();
        let mut count = 0usize;
        for (primary, element) in entries {
            self.add(&primary, element);
            count += 1;
        }
        tracing::trace!(indexes = self.by_id.len(), elements = count, "Reindexed");
    }

    /// Resolves an index key to a primary key.
    pub(crate) fn lookup(&self, id: &str, index_key: &str) -> Result<&K> {
        let index = self
            .by_id
            .get(id)
            .ok_or_else(|| CollectionError::UnknownIndex { id: id.to_string() })?;
        index.get(index_key).ok_or_else(|| {
            CollectionError::IndexKeyNotFound {
                index: id.to_string(),
                key: index_key.to_string(),
            }
            .into()
        })
    }
}
