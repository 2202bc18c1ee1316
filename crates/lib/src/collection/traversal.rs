//! Traversal algorithms shared by [`Map`](super::Map) and [`Sequence`](super::Sequence).
//!
//! Each helper works over `(key, element)` entries in storage order, where the key is
//! a `&str` for Maps and a position for Sequences. Callbacks receive the element
//! first and its key second.

use std::fmt::Display;
use std::ops::ControlFlow;

use crate::{Result, collection::CollectionError, types::TypeValidator, value::Value};

/// Calls `callback(element, key, step)` for each entry until it breaks.
///
/// `step` counts calls from zero regardless of the key type.
pub(crate) fn each<'a, K>(
    entries: impl Iterator<Item = (K, &'a Value)>,
    mut callback: impl FnMut(&Value, K, usize) -> ControlFlow<()>,
) {
    for (step, (key, element)) in entries.enumerate() {
        if callback(element, key, step).is_break() {
            break;
        }
    }
}

/// Returns true if any entry satisfies `predicate`.
pub(crate) fn some<'a, K>(
    mut entries: impl Iterator<Item = (K, &'a Value)>,
    mut predicate: impl FnMut(&Value, K) -> bool,
) -> bool {
    entries.any(|(key, element)| predicate(element, key))
}

/// Returns true if every entry satisfies `predicate`. Vacuously true when empty.
pub(crate) fn every<'a, K>(
    mut entries: impl Iterator<Item = (K, &'a Value)>,
    mut predicate: impl FnMut(&Value, K) -> bool,
) -> bool {
    entries.all(|(key, element)| predicate(element, key))
}

/// First entry satisfying `predicate`.
pub(crate) fn find<'a, K: Copy>(
    mut entries: impl Iterator<Item = (K, &'a Value)>,
    mut predicate: impl FnMut(&Value, K) -> bool,
) -> Option<(K, &'a Value)> {
    entries.find(|&(key, element)| predicate(element, key))
}

/// Clones the entries satisfying `predicate`.
pub(crate) fn select<'a, K, O>(
    entries: impl Iterator<Item = (K, &'a Value)>,
    mut predicate: impl FnMut(&Value, K) -> bool,
    owned: impl Fn(K) -> O,
) -> Vec<(O, Value)>
where
    K: Copy,
{
    entries
        .filter(|&(key, element)| predicate(element, key))
        .map(|(key, element)| (owned(key), element.clone()))
        .collect()
}

/// Clones the first entry of each distinct element, comparing structurally.
pub(crate) fn unique<'a, K, O>(
    entries: impl Iterator<Item = (K, &'a Value)>,
    owned: impl Fn(K) -> O,
) -> Vec<(O, Value)> {
    let mut seen: Vec<&Value> = Vec::new();
    let mut kept = Vec::new();
    for (key, element) in entries {
        if !seen.contains(&element) {
            seen.push(element);
            kept.push((owned(key), element.clone()));
        }
    }
    kept
}

/// Reads `field` from every entry. Objects without the field yield null.
///
/// Fails with [`CollectionError::NotAnObject`] at the first element that is not an
/// object.
pub(crate) fn pluck<'a, K, O>(
    entries: impl Iterator<Item = (K, &'a Value)>,
    field: &str,
    owned: impl Fn(K) -> O,
) -> Result<Vec<(O, Value)>>
where
    K: Copy + Display,
{
    entries
        .map(|(key, element)| match element.as_object() {
            Some(object) => Ok((owned(key), object.get(field).cloned().unwrap_or_default())),
            None => Err(CollectionError::NotAnObject {
                field: field.to_string(),
                key: key.to_string(),
                found: element.type_name().to_string(),
            }
            .into()),
        })
        .collect()
}

/// Leaf values of nested lists, depth first. Objects are leaves.
pub(crate) fn flatten<'a>(elements: impl Iterator<Item = &'a Value>) -> Vec<Value> {
    fn walk(element: &Value, leaves: &mut Vec<Value>) {
        match element {
            Value::List(items) => items.iter().for_each(|item| walk(item, leaves)),
            leaf => leaves.push(leaf.clone()),
        }
    }

    let mut leaves = Vec::new();
    elements.for_each(|element| walk(element, &mut leaves));
    leaves
}

/// Joins the elements' key renderings with `separator`.
pub(crate) fn implode<'a>(elements: impl Iterator<Item = &'a Value>, separator: &str) -> String {
    elements
        .map(Value::to_key_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Applies `callback` to every entry, checking each result against `validator`.
///
/// Stops at the first result the validator rejects.
pub(crate) fn transform<'a, K, O>(
    entries: impl Iterator<Item = (K, &'a Value)>,
    validator: &TypeValidator,
    mut callback: impl FnMut(&Value, K) -> Value,
    owned: impl Fn(K) -> O,
) -> Result<Vec<(O, Value)>>
where
    K: Copy,
{
    entries
        .map(|(key, element)| {
            let mapped = callback(element, key);
            validator.validate(&mapped)?;
            Ok((owned(key), mapped))
        })
        .collect()
}

/// Left fold over the elements.
pub(crate) fn reduce<'a, T>(
    elements: impl Iterator<Item = &'a Value>,
    initial: T,
    mut callback: impl FnMut(T, &Value) -> T,
) -> T {
    elements.fold(initial, |carry, element| callback(carry, element))
}

/// Right fold over the elements.
pub(crate) fn reduce_right<'a, T>(
    elements: impl DoubleEndedIterator<Item = &'a Value>,
    initial: T,
    mut callback: impl FnMut(T, &Value) -> T,
) -> T {
    elements.rfold(initial, |carry, element| callback(carry, element))
}
