//! Dense, typed, position-addressed collection.
//!
//! Positions are always the contiguous range `0..len`. Any mutation that moves existing
//! elements (pop, shift, unshift, remove, sort) finishes with a full reindex so that
//! secondary indexes never point at a stale position.

use std::cmp::Ordering;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::{
    Result,
    collection::{
        CollectionError,
        index::{Index, Indexes, KeyFn},
        json::{self, Document},
        traversal,
    },
    types::TypeValidator,
    value::{Value, compare::natural_cmp},
};

/// An ordered list of validated elements addressed by position.
///
/// ```
/// use typed_collections::{Sequence, Value};
///
/// let mut numbers = Sequence::typed("int")?;
/// numbers.push(3)?.push(1)?.push(2)?;
///
/// let sorted = numbers.sorted();
/// assert_eq!(sorted.to_json()?, "[1,2,3]");
/// assert_eq!(numbers.to_json()?, "[3,1,2]");
///
/// assert_eq!(numbers.shift(), Some(Value::from(3)));
/// assert!(numbers.push("4").is_err());
/// # Ok::<(), typed_collections::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct Sequence {
    elements: Vec<Value>,
    validator: TypeValidator,
    indexes: Indexes<usize>,
}

impl Sequence {
    /// Create an empty, untyped sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sequence declared as a primitive type (`int`, `string`, ...).
    ///
    /// # Errors
    /// Returns [`crate::types::TypeError::InvalidDeclaredType`] for an unknown type name.
    pub fn typed(declared: &str) -> Result<Self> {
        Ok(Self::with_validator(TypeValidator::new(Some(declared))?))
    }

    /// Create an empty sequence checked by `validator`
    pub fn with_validator(validator: TypeValidator) -> Self {
        Self {
            elements: Vec::new(),
            validator,
            indexes: Indexes::default(),
        }
    }

    /// Build a sequence from elements, validating each in order.
    pub fn from_values<V>(
        values: impl IntoIterator<Item = V>,
        validator: TypeValidator,
    ) -> Result<Self>
    where
        V: Into<Value>,
    {
        let mut sequence = Self::with_validator(validator);
        sequence.add(values)?;
        Ok(sequence)
    }

    /// Build a sequence from JSON text.
    ///
    /// A JSON array supplies the elements in order. A JSON object is also accepted; its
    /// values are appended in document order and its keys discarded. When the declared
    /// type is a class, JSON objects are instantiated as that class before validation.
    ///
    /// JSON carries no class names, so `from_json(to_json())` reproduces a class-typed
    /// sequence only when every element is of exactly the declared class. Subclass
    /// instances reload as the declared class, and an interface-typed sequence cannot
    /// reload objects at all.
    ///
    /// # Errors
    /// [`crate::Error::Serialize`] for malformed JSON, [`CollectionError::UnexpectedJson`]
    /// for a scalar document, or a type error for a rejected element.
    pub fn from_json(json: &str, validator: TypeValidator) -> Result<Self> {
        let values = match json::decode(json, "array")? {
            Document::Values(values) => values,
            Document::Entries(entries) => entries.into_iter().map(|(_, value)| value).collect(),
        };

        let mut sequence = Self::with_validator(validator);
        for element in values {
            let element = json::hydrate(&sequence.validator, element);
            sequence.push(element)?;
        }
        Ok(sequence)
    }

    /// Build a sequence from already validated elements. Indexes are not carried over.
    pub(crate) fn from_trusted(validator: TypeValidator, elements: Vec<Value>) -> Self {
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

    /// Returns true if the sequence holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // === Structural mutation ===

    /// Appends `element`.
    ///
    /// Existing positions do not move, so indexes are updated for the new element only.
    ///
    /// # Errors
    /// Returns [`crate::types::TypeError::Mismatch`] if the element is rejected.
    pub fn push(&mut self, element: impl Into<Value>) -> Result<&mut Self> {
        let element = element.into();
        self.validator.validate(&element)?;

        let position = self.elements.len();
        self.indexes.add(&position, &element);
        self.elements.push(element);
        Ok(self)
    }

    /// Appends every element in order.
    ///
    /// Not atomic: elements before a rejected one stay appended and indexed.
    pub fn add<V>(&mut self, values: impl IntoIterator<Item = V>) -> Result<&mut Self>
    where
        V: Into<Value>,
    {
        for element in values {
            self.push(element)?;
        }
        Ok(self)
    }

    /// Removes and returns the last element, or `None` if empty
    pub fn pop(&mut self) -> Option<Value> {
        let popped = self.elements.pop();
        self.reindex();
        popped
    }

    /// Removes and returns the first element, or `None` if empty.
    ///
    /// Every remaining element moves down one position.
    pub fn shift(&mut self) -> Option<Value> {
        if self.elements.is_empty() {
            return None;
        }
        let shifted = self.elements.remove(0);
        self.reindex();
        Some(shifted)
    }

    /// Prepends `values`, keeping their order. Returns the new length.
    ///
    /// Every element is validated before any is inserted, so a rejection leaves the
    /// sequence unchanged.
    pub fn unshift<V>(&mut self, values: impl IntoIterator<Item = V>) -> Result<usize>
    where
        V: Into<Value>,
    {
        let incoming: Vec<Value> = values.into_iter().map(Into::into).collect();
        for element in &incoming {
            self.validator.validate(element)?;
        }

        let existing = std::mem::replace(&mut self.elements, incoming);
        self.elements.extend(existing);
        self.reindex();
        Ok(self.elements.len())
    }

    /// Removes and returns the element at `position`, compacting later positions.
    /// Out of range positions are a no-op.
    pub fn remove(&mut self, position: usize) -> Option<Value> {
        if position >= self.elements.len() {
            return None;
        }
        let removed = self.elements.remove(position);
        self.reindex();
        Some(removed)
    }

    /// Removes the first element equal to `element`. Returns whether one was found.
    pub fn remove_element(&mut self, element: &Value) -> bool {
        match self.position_of(element) {
            Some(position) => self.remove(position).is_some(),
            None => false,
        }
    }

    /// Removes every element. Registered indexes stay registered but empty.
    pub fn clear(&mut self) -> &mut Self {
        self.elements.clear();
        self.indexes.clear();
        self
    }

    // === Access ===

    /// Returns the element at `position`.
    ///
    /// # Errors
    /// Returns [`CollectionError::KeyNotFound`] if the position is out of range.
    pub fn get(&self, position: usize) -> Result<&Value> {
        self.try_get(position).ok_or_else(|| {
            CollectionError::KeyNotFound {
                key: position.to_string(),
            }
            .into()
        })
    }

    /// Returns the element at `position`, if any
    pub fn try_get(&self, position: usize) -> Option<&Value> {
        self.elements.get(position)
    }

    /// Returns true if `position` is in range
    pub fn contains_key(&self, position: usize) -> bool {
        position < self.elements.len()
    }

    /// Returns true if an element equal to `element` is present
    pub fn contains(&self, element: &Value) -> bool {
        self.elements.contains(element)
    }

    /// The position of the first element equal to `element`
    pub fn position_of(&self, element: &Value) -> Option<usize> {
        self.elements.iter().position(|stored| stored == element)
    }

    /// The positions, in order, as an int-typed Sequence
    pub fn keys(&self) -> Sequence {
        Sequence::from_trusted(
            TypeValidator::from_descriptor(Some(crate::types::PrimitiveKind::Int.into())),
            (0..self.elements.len()).map(Value::from).collect(),
        )
    }

    /// A copy of the elements, with this sequence's declared type and no indexes
    pub fn values(&self) -> Sequence {
        Sequence::from_trusted(self.validator.clone(), self.elements.clone())
    }

    /// The first element
    pub fn first(&self) -> Option<&Value> {
        self.elements.first()
    }

    /// The last element
    pub fn last(&self) -> Option<&Value> {
        self.elements.last()
    }

    /// Position of the first element, `None` if empty
    pub fn first_key(&self) -> Option<usize> {
        (!self.elements.is_empty()).then_some(0)
    }

    /// Position of the last element, `None` if empty
    pub fn last_key(&self) -> Option<usize> {
        self.elements.len().checked_sub(1)
    }

    /// Iterates over `(position, element)` pairs in order
    pub fn iter(&self) -> std::iter::Enumerate<std::slice::Iter<'_, Value>> {
        self.elements.iter().enumerate()
    }

    /// The elements as a slice
    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    /// A copy of the elements
    pub fn to_vec(&self) -> Vec<Value> {
        self.elements.clone()
    }

    /// Consumes the sequence, returning its elements
    pub fn into_vec(self) -> Vec<Value> {
        self.elements
    }

    /// Renders the sequence as a JSON array
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Bracket-style write. Only appending is allowed.
    ///
    /// # Errors
    /// [`CollectionError::NonSequentialWrite`] for any explicit offset, or a type error
    /// if the element is rejected.
    pub fn offset_set(&mut self, offset: Option<usize>, element: impl Into<Value>) -> Result<()> {
        if let Some(offset) = offset {
            return Err(CollectionError::NonSequentialWrite { offset }.into());
        }
        self.push(element)?;
        Ok(())
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

    /// Registers a shared key function under `id`; see [`Sequence::add_index`].
    pub fn add_index_fn(&mut self, id: impl Into<String>, key_fn: KeyFn) -> &mut Self {
        self.indexes
            .insert(id.into(), key_fn, self.elements.iter().enumerate());
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
    pub fn get_index(&self, id: &str) -> Option<&Index<usize>> {
        self.indexes.get(id)
    }

    /// Returns the element whose index key under index `id` is `index_key`.
    ///
    /// # Errors
    /// [`CollectionError::UnknownIndex`] if no index is registered under `id`,
    /// [`CollectionError::IndexKeyNotFound`] if the index has no such key.
    pub fn get_by(&self, id: &str, index_key: &str) -> Result<&Value> {
        let position = self.indexes.lookup(id, index_key)?;
        self.get(*position)
    }

    /// Returns the element for `index_key`, or `None` if the index or key is missing
    pub fn try_get_by(&self, id: &str, index_key: &str) -> Option<&Value> {
        let position = self.indexes.get(id)?.get(index_key)?;
        self.try_get(*position)
    }

    /// Rebuilds every index from the current positions. O(n * k).
    fn reindex(&mut self) {
        self.indexes.rebuild(self.elements.iter().enumerate());
    }

    // === Ordering ===

    /// Sorts by natural element order in place. The sort is stable.
    pub fn sort(&mut self) -> &mut Self {
        self.sort_by(natural_cmp)
    }

    /// Sorts by `comparator` in place. The sort is stable.
    pub fn sort_by<F>(&mut self, comparator: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.elements.sort_by(comparator);
        self.reindex();
        self
    }

    /// A naturally sorted copy. The receiver is unchanged.
    pub fn sorted(&self) -> Sequence {
        self.sorted_by(natural_cmp)
    }

    /// A copy sorted by `comparator`. The receiver is unchanged.
    pub fn sorted_by<F>(&self, comparator: F) -> Sequence
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut copy = self.values();
        copy.sort_by(comparator);
        copy
    }

    // === Functional operations ===

    /// A new sequence of the elements satisfying `predicate`, renumbered from zero
    pub fn filter<F>(&self, predicate: F) -> Sequence
    where
        F: FnMut(&Value, usize) -> bool,
    {
        let kept = traversal::select(self.iter(), predicate, |position| position);
        Sequence::from_trusted(
            self.validator.clone(),
            kept.into_iter().map(|(_, element)| element).collect(),
        )
    }

    /// A new sequence of the truthy elements; see [`Value::is_truthy`]
    pub fn filter_truthy(&self) -> Sequence {
        self.filter(|element, _| element.is_truthy())
    }

    /// A new sequence with every element replaced by `callback(element, position)`.
    ///
    /// The result keeps this sequence's declared type.
    ///
    /// # Errors
    /// Returns a type error if a mapped element is rejected.
    pub fn map<F>(&self, callback: F) -> Result<Sequence>
    where
        F: FnMut(&Value, usize) -> Value,
    {
        self.map_as(self.validator.clone(), callback)
    }

    /// Like [`Sequence::map`], but the result is checked by `validator` instead.
    pub fn map_as<F>(&self, validator: TypeValidator, callback: F) -> Result<Sequence>
    where
        F: FnMut(&Value, usize) -> Value,
    {
        let mapped = traversal::transform(self.iter(), &validator, callback, |position| position)?;
        Ok(Sequence::from_trusted(
            validator,
            mapped.into_iter().map(|(_, element)| element).collect(),
        ))
    }

    /// Returns true if at least one element satisfies `predicate`
    pub fn some<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Value, usize) -> bool,
    {
        traversal::some(self.iter(), predicate)
    }

    /// Returns true if every element satisfies `predicate`
    pub fn every<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Value, usize) -> bool,
    {
        traversal::every(self.iter(), predicate)
    }

    /// The first element satisfying `predicate`
    pub fn find<F>(&self, predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, usize) -> bool,
    {
        traversal::find(self.iter(), predicate).map(|(_, element)| element)
    }

    /// The position of the first element satisfying `predicate`
    pub fn find_key<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&Value, usize) -> bool,
    {
        traversal::find(self.iter(), predicate).map(|(position, _)| position)
    }

    /// Folds the elements from first to last
    pub fn reduce<T, F>(&self, initial: T, callback: F) -> T
    where
        F: FnMut(T, &Value) -> T,
    {
        traversal::reduce(self.elements.iter(), initial, callback)
    }

    /// Folds the elements from last to first
    pub fn reduce_right<T, F>(&self, initial: T, callback: F) -> T
    where
        F: FnMut(T, &Value) -> T,
    {
        traversal::reduce_right(self.elements.iter(), initial, callback)
    }

    // === Slicing and set operations ===

    /// Calls `callback(element, position, step)` for each element in order until it
    /// returns [`ControlFlow::Break`].
    pub fn each<F>(&self, callback: F) -> &Self
    where
        F: FnMut(&Value, usize, usize) -> ControlFlow<()>,
    {
        traversal::each(self.iter(), callback);
        self
    }

    /// A new sequence of up to `length` elements starting at `offset`, renumbered from
    /// zero.
    ///
    /// `None` takes every element from `offset` on. An offset past the end yields an
    /// empty sequence.
    pub fn slice(&self, offset: usize, length: Option<usize>) -> Sequence {
        let start = offset.min(self.elements.len());
        let end = match length {
            Some(length) => start.saturating_add(length).min(self.elements.len()),
            None => self.elements.len(),
        };
        Sequence::from_trusted(self.validator.clone(), self.elements[start..end].to_vec())
    }

    /// A new sequence with the elements in reverse order
    pub fn reversed(&self) -> Sequence {
        Sequence::from_trusted(
            self.validator.clone(),
            self.elements.iter().rev().cloned().collect(),
        )
    }

    /// A new sequence without repeated elements, keeping first occurrences in order
    pub fn unique(&self) -> Sequence {
        let kept = traversal::unique(self.iter(), |position| position);
        Sequence::from_trusted(
            self.validator.clone(),
            kept.into_iter().map(|(_, element)| element).collect(),
        )
    }

    /// A new untyped sequence of each object element's `field`.
    ///
    /// Objects without the field yield null.
    ///
    /// # Errors
    /// Returns [`CollectionError::NotAnObject`] if an element is not an object.
    pub fn pluck(&self, field: &str) -> Result<Sequence> {
        let plucked = traversal::pluck(self.iter(), field, |position| position)?;
        Ok(Sequence::from_trusted(
            TypeValidator::untyped(),
            plucked.into_iter().map(|(_, element)| element).collect(),
        ))
    }

    /// A new sequence of the elements not in `others`
    pub fn diff<'o>(&self, others: impl IntoIterator<Item = &'o Value>) -> Sequence {
        let others: Vec<&Value> = others.into_iter().collect();
        self.filter(|element, _| !others.iter().any(|other| *other == element))
    }

    /// A new sequence of the elements also in `others`
    pub fn intersect<'o>(&self, others: impl IntoIterator<Item = &'o Value>) -> Sequence {
        let others: Vec<&Value> = others.into_iter().collect();
        self.filter(|element, _| others.iter().any(|other| *other == element))
    }

    /// The leaf elements of nested lists, in order, as an untyped sequence
    pub fn flatten(&self) -> Sequence {
        Sequence::from_trusted(
            TypeValidator::untyped(),
            traversal::flatten(self.elements.iter()),
        )
    }

    /// Joins the elements with `separator`; see [`Value::to_key_string`]
    pub fn implode(&self, separator: &str) -> String {
        traversal::implode(self.elements.iter(), separator)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("declared", &self.validator.type_name())
            .field("elements", &self.elements)
            .field("indexes", &self.indexes.len())
            .finish()
    }
}

/// Sequences are equal when their declared types match and they hold equal elements
/// in the same order. Indexes are not compared.
impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.validator == other.validator && self.elements == other.elements
    }
}

impl Serialize for Sequence {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in &self.elements {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

/// Read-only bracket access. Panics if the position is out of range; use
/// [`Sequence::get`] to handle misses.
impl std::ops::Index<usize> for Sequence {
    type Output = Value;

    fn index(&self, position: usize) -> &Value {
        match self.try_get(position) {
            Some(element) => element,
            None => panic!("Element with key '{position}' does not exist"),
        }
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = (usize, &'a Value);
    type IntoIter = std::iter::Enumerate<std::slice::Iter<'a, Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Sequence {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
