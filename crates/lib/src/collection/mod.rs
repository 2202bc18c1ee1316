//! Typed collections.
//!
//! Two containers share one engine:
//!
//! - [`Map`]: ordered string keys to elements
//! - [`Sequence`]: dense positions `0..len` to elements
//!
//! Both check every insertion against a [`TypeValidator`] and maintain any number of
//! secondary [`index::Index`]es keyed by caller-chosen ids. Functional operations
//! (`filter`, `map`, `sorted`, ...) return new collections with the same declared type
//! and no indexes; `sort` is the only in-place reordering.
//!
//! ## Example
//!
//! ```
//! use typed_collections::{Collection, Map, TypeValidator, Value};
//!
//! fn describe<C: Collection>(collection: &C) -> String {
//!     let declared = collection.validator().type_name().unwrap_or("any");
//!     format!("{} x {}", collection.len(), declared)
//! }
//!
//! let map = Map::from_entries([("a", 1), ("b", 2)], TypeValidator::new(Some("int"))?)?;
//! let seq = map.values();
//! assert_eq!(describe(&map), "2 x int");
//! assert_eq!(describe(&seq), "2 x int");
//! assert_eq!(seq.get(1)?, &Value::from(2));
//! # Ok::<(), typed_collections::Error>(())
//! ```

mod errors;
pub mod index;
mod json;
mod map;
mod sequence;
mod traversal;

pub use errors::CollectionError;
pub use map::{Iter as MapIter, Map};
pub use sequence::Sequence;

use crate::{Result, types::TypeValidator, value::Value};

/// Surface shared by [`Map`] and [`Sequence`].
///
/// Keys are `str` for Maps and `usize` positions for Sequences.
pub trait Collection {
    /// Primary key type
    type Key: ?Sized;

    /// Number of elements
    fn len(&self) -> usize;

    /// Returns true if the collection holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if an element equal to `element` is present
    fn contains(&self, element: &Value) -> bool;

    /// Returns true if `key` is present
    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Returns the element under `key`, failing on a miss
    fn get(&self, key: &Self::Key) -> Result<&Value>;

    /// Returns the element whose index key under index `id` is `index_key`
    fn get_by(&self, id: &str, index_key: &str) -> Result<&Value>;

    /// Removes every element, leaving registered indexes empty
    fn clear(&mut self);

    /// The elements, in order, as a Sequence with the same declared type
    fn values(&self) -> Sequence;

    /// Renders the collection as JSON
    fn to_json(&self) -> Result<String>;

    /// The validator guarding insertions
    fn validator(&self) -> &TypeValidator;
}

/// Bracket-style access routed through the checked collection operations.
pub trait OffsetAccess<O> {
    /// Returns true if `offset` is present
    fn offset_exists(&self, offset: O) -> bool;

    /// Returns the element at `offset`, failing on a miss
    fn offset_get(&self, offset: O) -> Result<&Value>;

    /// Writes `element` at `offset`, or appends it when `offset` is `None`.
    ///
    /// Maps require an offset; Sequences refuse one.
    fn offset_set(&mut self, offset: Option<O>, element: Value) -> Result<()>;

    /// Removes the element at `offset`, if present
    fn offset_unset(&mut self, offset: O);
}

impl Collection for Map {
    type Key = str;

    fn len(&self) -> usize {
        Map::len(self)
    }

    fn contains(&self, element: &Value) -> bool {
        Map::contains(self, element)
    }

    fn contains_key(&self, key: &str) -> bool {
        Map::contains_key(self, key)
    }

    fn get(&self, key: &str) -> Result<&Value> {
        Map::get(self, key)
    }

    fn get_by(&self, id: &str, index_key: &str) -> Result<&Value> {
        Map::get_by(self, id, index_key)
    }

    fn clear(&mut self) {
        Map::clear(self);
    }

    fn values(&self) -> Sequence {
        Map::values(self)
    }

    fn to_json(&self) -> Result<String> {
        Map::to_json(self)
    }

    fn validator(&self) -> &TypeValidator {
        Map::validator(self)
    }
}

impl Collection for Sequence {
    type Key = usize;

    fn len(&self) -> usize {
        Sequence::len(self)
    }

    fn contains(&self, element: &Value) -> bool {
        Sequence::contains(self, element)
    }

    fn contains_key(&self, position: &usize) -> bool {
        Sequence::contains_key(self, *position)
    }

    fn get(&self, position: &usize) -> Result<&Value> {
        Sequence::get(self, *position)
    }

    fn get_by(&self, id: &str, index_key: &str) -> Result<&Value> {
        Sequence::get_by(self, id, index_key)
    }

    fn clear(&mut self) {
        Sequence::clear(self);
    }

    fn values(&self) -> Sequence {
        Sequence::values(self)
    }

    fn to_json(&self) -> Result<String> {
        Sequence::to_json(self)
    }

    fn validator(&self) -> &TypeValidator {
        Sequence::validator(self)
    }
}

impl<'k> OffsetAccess<&'k str> for Map {
    fn offset_exists(&self, key: &'k str) -> bool {
        self.contains_key(key)
    }

    fn offset_get(&self, key: &'k str) -> Result<&Value> {
        self.get(key)
    }

    fn offset_set(&mut self, key: Option<&'k str>, element: Value) -> Result<()> {
        let key = key.ok_or(CollectionError::MissingOffset)?;
        self.set(key, element)?;
        Ok(())
    }

    fn offset_unset(&mut self, key: &'k str) {
        self.remove(key);
    }
}

impl OffsetAccess<usize> for Sequence {
    fn offset_exists(&self, position: usize) -> bool {
        self.contains_key(position)
    }

    fn offset_get(&self, position: usize) -> Result<&Value> {
        self.get(position)
    }

    fn offset_set(&mut self, position: Option<usize>, element: Value) -> Result<()> {
        Sequence::offset_set(self, position, element)
    }

    fn offset_unset(&mut self, position: usize) {
        self.remove(position);
    }
}
