//! Ordered, typed key-value collection.

use std::cmp::Ordering;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{
    Result,
    collection::{
        CollectionError, Sequence,
        index::{Index, Indexes, KeyFn},
        json::{self, Document},
        traversal,
    },
    types::{PrimitiveKind, TypeValidator},
    value::{
        Value,
        compare::{key_cmp, natural_cmp},
    },
};

/// An ordered mapping of string keys to validated elements.
///
/// Keys keep insertion order; overwriting a key keeps its position. Every element has
/// passed the collection's [`TypeValidator`], and every registered index is kept
/// consistent with the current contents.
///
/// ```
/// use typed_collections::{Map, Object, collection::index::by_field};
///
/// let mut users = Map::typed("object").unwrap();
/// users
///     .set("a", Object::new().with("id", "alice"))?
///     .set("b", Object::new().with("id", "bob"))?
///     .add_index_fn("id", by_field("id"));
///
/// assert_eq!(users.get_by("id", "bob")?, users.get("b")?);
/// assert!(users.set("c", 3).is_err());
/// # Ok::<(), typed_collections::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Map {
    elements: IndexMap<String, Value>,
    validator: TypeValidator,
    indexes: Indexes<String>,
}

impl Map {
    /// Create an empty, untyped map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map declared as a primitive type (`int`, `string`, ...).
    ///
    /// # Errors
    /// Returns [`crate::types::TypeError::InvalidDeclaredType`] for an unknown type name.
    pub fn typed(declared: &str) -> Result<Self> {
        Ok(Self::with_validator(TypeValidator::new(Some(declared))?))
    }

    /// Create an empty map checked by `validator`
    pub fn with_validator(validator: TypeValidator) -> Self {
        Self {
            elements: IndexMap::new(),
            validator,
            indexes: Indexes::default(),
        }
    }

    /// Build a map from key/element pairs, validating each in order.
    pub fn from_entries<K, V>(
        entries: impl IntoIterator<Item = (K, V)>,
        validator: TypeValidator,
    ) -> Result<Self>
    where
        K: ToString,
        V: Into<Value>,
    {
        let mut map = Self::with_validator(validator);
        map.add(entries)?;
        Ok(map)
    }

    /// Build a map from JSON text.
    ///
    /// A JSON object supplies keys and elements in document order. A JSON array is also
    /// accepted, with positions becoming keys (`"0"`, `"1"`, ...). When the declared
    /// type is a class, JSON objects are instantiated as that class before validation.
    ///
    /// JSON carries no class names, so `from_json(to_json())` reproduces a class-typed
    /// map only when every element is of exactly the declared class. Subclass
    /// instances reload as the declared class, and an interface-typed map cannot
    /// reload objects at all.
    ///
    /// # Errors
    /// [`crate::Error::Serialize`] for malformed JSON, [`CollectionError::UnexpectedJson`]
    /// for a scalar document, or a type error for a rejected element.
    pub fn from_json(json: &str, validator: TypeValidator) -> Result<Self> {
        let entries = match json::decode(json, "object")? {
            Document::Entries(entries) => entries,
            Document::Values(values) => values
                .into_iter()
                .enumerate()
                .map(|(position, element)| (position.to_string(), element))
                .collect(),
        };

        let mut map = Self::with_validator(validator);
        for (key, element) in entries {
            let element = json::hydrate(&map.validator, element);
            map.set(key, element)?;
        }
        Ok(map)
    }

    /// Build a map from already validated entries. Indexes are not carried over.
    fn from_trusted(validator: TypeValidator, elements: IndexMap<String, Value>) -> Self {
        Self {
            elements,
            validator,
            indexes: Indexes::default(),
        }
    }

    /// The validator guarding insertions
    pub fn validator(&self) -> &TypeValidator {
        &self.validator
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the map holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Stores `element` under `key`.
    ///
    /// Numeric keys are stored in their string form. Overwriting an existing key keeps
    /// its position and rebuilds every index, so the previous element's index key does
    /// not survive.
    ///
    /// # Errors
    /// Returns [`crate::types::TypeError::Mismatch`] if the element is rejected; the
    /// map is left unchanged.
    pub fn set(&mut self, key: impl ToString, element: impl Into<Value>) -> Result<&mut Self> {
        let element = element.into();
        self.validator.validate(&element)?;

        let key = key.to_string();
        if let Some(slot) = self.elements.get_mut(&key) {
            *slot = element;
            self.reindex();
        } else {
            self.indexes.add(&key, &element);
            self.elements.insert(key, element);
        }
        Ok(self)
    }

    /// Stores every pair in iteration order.
    ///
    /// Not atomic: pairs before a rejected element stay stored.
    pub fn add<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> Result<&mut Self>
    where
        K: ToString,
        V: Into<Value>,
    {
        for (key, element) in entries {
            self.set(key, element)?;
        }
        Ok(self)
    }

    /// Returns the element stored under `key`.
    ///
    /// # Errors
    /// Returns [`CollectionError::KeyNotFound`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.try_get(key).ok_or_else(|| {
            CollectionError::KeyNotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// Returns the element stored under `key`, if any
    pub fn try_get(&self, key: &str) -> Option<&Value> {
        self.elements.get(key)
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    /// Returns true if an element equal to `element` is present
    pub fn contains(&self, element: &Value) -> bool {
        self.elements.values().any(|stored| stored == element)
    }

    /// Removes and returns the element under `key`. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.elements.shift_remove(key)?;
        self.reindex();
        Some(removed)
    }

    /// Removes the first element equal to `element`. Returns whether one was found.
    pub fn remove_element(&mut self, element: &Value) -> bool {
        match self.key_of(element).map(str::to_string) {
            Some(key) => self.remove(&key).is_some(),
            None => false,
        }
    }

    /// The key of the first element equal to `element`
    pub fn key_of(&self, element: &Value) -> Option<&str> {
        self.iter()
            .find(|(_, stored)| *stored == element)
            .map(|(key, _)| key)
    }

    /// Removes every element. Registered indexes stay registered but empty.
    pub fn clear(&mut self) -> &mut Self {
        self.elements.clear();
        self.indexes.clear();
        self
    }

    /// The keys, in order, as a string-typed Sequence
    pub fn keys(&self) -> Sequence {
        Sequence::from_trusted(
            TypeValidator::from_descriptor(Some(PrimitiveKind::String.into())),
            self.elements.keys().map(Value::from).collect(),
        )
    }

    /// The elements, in order, as a Sequence with this map's declared type
    pub fn values(&self) -> Sequence {
        Sequence::from_trusted(
            self.validator.clone(),
            self.elements.values().cloned().collect(),
        )
    }

    /// The first element in iteration order
    pub fn first(&self) -> Option<&Value> {
        self.elements.first().map(|(_, element)| element)
    }

    /// The last element in iteration order
    pub fn last(&self) -> Option<&Value> {
        self.elements.last().map(|(_, element)| element)
    }

    /// The first key in iteration order
    pub fn first_key(&self) -> Option<&str> {
        self.elements.first().map(|(key, _)| key.as_str())
    }

    /// The last key in iteration order
    pub fn last_key(&self) -> Option<&str> {
        self.elements.last().map(|(key, _)| key.as_str())
    }

    /// Iterates over `(key, element)` pairs in order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.elements.iter(),
        }
    }

    /// The raw ordered storage
    pub fn as_indexmap(&self) -> &IndexMap<String, Value> {
        &self.elements
    }

    /// Consumes the map, returning its ordered storage
    pub fn into_indexmap(self) -> IndexMap<String, Value> {
        self.elements
    }

    /// Renders the map as a JSON object in iteration order
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    // === Indexes ===

    /// Registers an index under `id`, built from the current elements.
    ///
    /// Replaces any index already registered under the same id.
    pub fn add_index<F>(&mut self, id: impl Into<String>, key_fn: F) -> &mut Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.add_index_fn(id, Arc::new(key_fn))
    }

    /// Registers a shared key function under `id`; see [`Map::add_index`].
    pub fn add_index_fn(&mut self, id: impl Into<String>, key_fn: KeyFn) -> &mut Self {
        let entries = self.elements.iter().map(|(key, element)| (key.clone(), element));
        self.indexes.insert(id.into(), key_fn, entries);
        self
    }

    /// Drops the index registered under `id`, if any
    pub fn remove_index(&mut self, id: &str) -> &mut Self {
        self.indexes.remove(id);
        self
    }

    /// Returns true if an index is registered under `id`
    pub fn has_index(&self, id: &str) -> bool {
        self.indexes.contains(id)
    }

    /// Ids of the registered indexes, sorted
    pub fn index_ids(&self) -> impl Iterator<Item = &str> {
        self.indexes.ids()
    }

    /// The index registered under `id`
    pub fn get_index(&self, id: &str) -> Option<&Index<String>> {
        self.indexes.get(id)
    }

    /// Returns the element whose index key under index `id` is `index_key`.
    ///
    /// # Errors
    /// [`CollectionError::UnknownIndex`] if no index is registered under `id`,
    /// [`CollectionError::IndexKeyNotFound`] if the index has no such key.
    pub fn get_by(&self, id: &str, index_key: &str) -> Result<&Value> {
        let key = self.indexes.lookup(id, index_key)?;
        self.get(key)
    }

    /// Returns the element for `index_key`, or `None` if the index or key is missing
    pub fn try_get_by(&self, id: &str, index_key: &str) -> Option<&Value> {
        let key = self.indexes.get(id)?.get(index_key)?;
        self.try_get(key)
    }

    fn reindex(&mut self) {
        let entries = self.elements.iter().map(|(key, element)| (key.clone(), element));
        self.indexes.rebuild(entries);
    }

    // === Ordering ===

    /// Sorts by natural element order in place, keeping key association.
    ///
    /// Keys do not change, so indexes stay valid.
    pub fn sort(&mut self) -> &mut Self {
        self.sort_by(natural_cmp)
    }

    /// Sorts by `comparator` in place, keeping key association. The sort is stable.
    pub fn sort_by<F>(&mut self, mut comparator: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.elements.sort_by(|_, a, _, b| comparator(a, b));
        self
    }

    /// A naturally sorted copy. The receiver is unchanged.
    pub fn sorted(&self) -> Map {
        self.sorted_by(natural_cmp)
    }

    /// A copy sorted by `comparator`. The receiver is unchanged.
    pub fn sorted_by<F>(&self, comparator: F) -> Map
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut copy = Map::from_trusted(self.validator.clone(), self.elements.clone());
        copy.sort_by(comparator);
        copy
    }

    // === Functional operations ===

    /// A new map of the entries satisfying `predicate`, with the same declared type
    pub fn filter<F>(&self, predicate: F) -> Map
    where
        F: FnMut(&Value, &str) -> bool,
    {
        let kept = traversal::select(self.iter(), predicate, str::to_string);
        Map::from_trusted(self.validator.clone(), kept.into_iter().collect())
    }

    /// A new map of the truthy entries; see [`Value::is_truthy`]
    pub fn filter_truthy(&self) -> Map {
        self.filter(|element, _| element.is_truthy())
    }

    /// A new map with every element replaced by `callback(element, key)`.
    ///
    /// The result keeps this map's declared type.
    ///
    /// # Errors
    /// Returns a type error if a mapped element is rejected.
    pub fn map<F>(&self, callback: F) -> Result<Map>
    where
        F: FnMut(&Value, &str) -> Value,
    {
        self.map_as(self.validator.clone(), callback)
    }

    /// Like [`Map::map`], but the result is checked by `validator` instead.
    pub fn map_as<F>(&self, validator: TypeValidator, callback: F) -> Result<Map>
    where
        F: FnMut(&Value, &str) -> Value,
    {
        let mapped = traversal::transform(self.iter(), &validator, callback, str::to_string)?;
        Ok(Map::from_trusted(validator, mapped.into_iter().collect()))
    }

    /// Returns true if at least one entry satisfies `predicate`
    pub fn some<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Value, &str) -> bool,
    {
        traversal::some(self.iter(), predicate)
    }

    /// Returns true if every entry satisfies `predicate`
    pub fn every<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Value, &str) -> bool,
    {
        traversal::every(self.iter(), predicate)
    }

    /// The first element satisfying `predicate`
    pub fn find<F>(&self, predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, &str) -> bool,
    {
        traversal::find(self.iter(), predicate).map(|(_, element)| element)
    }

    /// The key of the first element satisfying `predicate`
    pub fn find_key<F>(&self, predicate: F) -> Option<&str>
    where
        F: FnMut(&Value, &str) -> bool,
    {
        traversal::find(self.iter(), predicate).map(|(key, _)| key)
    }

    /// Folds the elements from first to last
    pub fn reduce<T, F>(&self, initial: T, callback: F) -> T
    where
        F: FnMut(T, &Value) -> T,
    {
        traversal::reduce(self.elements.values(), initial, callback)
    }

    /// Folds the elements from last to first
    pub fn reduce_right<T, F>(&self, initial: T, callback: F) -> T
    where
        F: FnMut(T, &Value) -> T,
    {
        traversal::reduce_right(self.elements.values(), initial, callback)
    }

    // === Slicing and set operations ===

    /// Calls `callback(element, key, step)` for each entry in order until it returns
    /// [`ControlFlow::Break`].
    pub fn each<F>(&self, callback: F) -> &Self
    where
        F: FnMut(&Value, &str, usize) -> ControlFlow<()>,
    {
        traversal::each(self.iter(), callback);
        self
    }

    /// A new map of up to `length` entries starting at `offset`, keeping their keys.
    ///
    /// `None` takes every entry from `offset` on. An offset past the end yields an
    /// empty map.
    pub fn slice(&self, offset: usize, length: Option<usize>) -> Map {
        let length = length.unwrap_or(usize::MAX);
        let elements = self
            .elements
            .iter()
            .skip(offset)
            .take(length)
            .map(|(key, element)| (key.clone(), element.clone()))
            .collect();
        Map::from_trusted(self.validator.clone(), elements)
    }

    /// A new map with the entries in reverse order, keeping their keys
    pub fn reversed(&self) -> Map {
        let elements = self
            .elements
            .iter()
            .rev()
            .map(|(key, element)| (key.clone(), element.clone()))
            .collect();
        Map::from_trusted(self.validator.clone(), elements)
    }

    /// A new map without repeated elements. The first key holding each element wins.
    pub fn unique(&self) -> Map {
        let kept = traversal::unique(self.iter(), str::to_string);
        Map::from_trusted(self.validator.clone(), kept.into_iter().collect())
    }

    /// A new untyped map of each object element's `field`, under the same keys.
    ///
    /// Objects without the field yield null.
    ///
    /// # Errors
    /// Returns [`CollectionError::NotAnObject`] if an element is not an object.
    pub fn pluck(&self, field: &str) -> Result<Map> {
        let plucked = traversal::pluck(self.iter(), field, str::to_string)?;
        Ok(Map::from_trusted(
            TypeValidator::untyped(),
            plucked.into_iter().collect(),
        ))
    }

    /// A new map of the entries whose element is not in `others`
    pub fn diff<'o>(&self, others: impl IntoIterator<Item = &'o Value>) -> Map {
        let others: Vec<&Value> = others.into_iter().collect();
        self.filter(|element, _| !others.iter().any(|other| *other == element))
    }

    /// A new map of the entries whose element is also in `others`
    pub fn intersect<'o>(&self, others: impl IntoIterator<Item = &'o Value>) -> Map {
        let others: Vec<&Value> = others.into_iter().collect();
        self.filter(|element, _| others.iter().any(|other| *other == element))
    }

    /// The leaf elements of nested lists, in order, as an untyped Sequence
    pub fn flatten(&self) -> Sequence {
        Sequence::from_trusted(
            TypeValidator::untyped(),
            traversal::flatten(self.elements.values()),
        )
    }

    /// Joins the elements with `separator`; see [`Value::to_key_string`]
    pub fn implode(&self, separator: &str) -> String {
        traversal::implode(self.elements.values(), separator)
    }

    /// Returns true if the keys are exactly `"0"`, `"1"`, ... in order
    pub fn is_list(&self) -> bool {
        self.elements
            .keys()
            .enumerate()
            .all(|(position, key)| *key == position.to_string())
    }

    /// Sorts the entries by key in place; see [`key_cmp`].
    ///
    /// Keys do not change, so indexes stay valid.
    pub fn sort_keys(&mut self) -> &mut Self {
        self.sort_keys_by(key_cmp)
    }

    /// Sorts the entries by `comparator` over their keys, in place. The sort is stable.
    pub fn sort_keys_by<F>(&mut self, mut comparator: F) -> &mut Self
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        self.elements.sort_by(|a, _, b, _| comparator(a, b));
        self
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("declared", &self.validator.type_name())
            .field("elements", &self.elements)
            .field("indexes", &self.indexes.len())
            .finish()
    }
}

/// Maps are equal when their declared types match and they hold equal entries in the
/// same order. Indexes are not compared.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.validator == other.validator
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}

impl Serialize for Map {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, element) in self.iter() {
            map.serialize_entry(key, element)?;
        }
        map.end()
    }
}

/// Read-only bracket access. Panics if the key is absent; use [`Map::get`] to handle
/// misses.
impl std::ops::Index<&str> for Map {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.try_get(key) {
            Some(element) => element,
            None => panic!("Element with key '{key}' does not exist"),
        }
    }
}

/// Iterator over a [`Map`]'s `(key, element)` pairs.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, String, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, element)| (key.as_str(), element))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(key, element)| (key.as_str(), element))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
