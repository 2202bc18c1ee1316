//! Map integration tests

use typed_collections::{
    Collection, Map, OffsetAccess, TypeValidator, Value,
    collection::CollectionError,
};

use crate::helpers::*;

// ===== BASIC OPERATIONS =====

#[test]
fn test_map_basic_operations() {
    let mut map = Map::new();
    assert!(map.is_empty());

    map.set("foo", "bar").unwrap().set("baz", 1).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("foo").unwrap(), &Value::from("bar"));
    assert_eq!(map["baz"], 1);
    assert!(map.contains_key("foo"));
    assert!(!map.contains_key("qux"));
    assert!(map.contains(&Value::from("bar")));
    assert!(!map.contains(&Value::from("1")));
}

#[test]
fn test_typed_map_enforces_declared_type() {
    let mut map = Map::typed("int").unwrap();
    map.set("one", 1).unwrap();

    let err = map.set("two", "1").unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.to_string(), "Element must be of type int. string given");
    assert!(!map.contains_key("two"));
}

#[test]
fn test_invalid_declared_type() {
    let err = Map::typed("nonsense").unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_get_missing_key_fails() {
    let map = Map::new();
    let err = map.get("missing").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Element with key 'missing' does not exist");
    assert!(map.try_get("missing").is_none());
}

#[test]
fn test_insertion_order_and_overwrite() {
    let mut map = Map::new();
    map.add([("b", 1), ("a", 2), ("c", 3)]).unwrap();
    map.set("a", 20).unwrap();

    let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["b", "a", "c"]);
    assert_eq!(map["a"], 20);
    assert_eq!(map.first_key(), Some("b"));
    assert_eq!(map.last_key(), Some("c"));
    assert_eq!(map.first(), Some(&Value::from(1)));
    assert_eq!(map.last(), Some(&Value::from(3)));
}

#[test]
fn test_bulk_add_is_not_atomic() {
    let mut map = Map::typed("string").unwrap();
    let result = map.add([("a", Value::from("x")), ("b", Value::from(2)), ("c", Value::from("z"))]);

    assert!(result.is_err());
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("a"));
}

#[test]
fn test_numeric_keys_are_coerced() {
    let mut map = Map::new();
    map.add([(0, "zero"), (1, "one")]).unwrap();

    assert_eq!(map.get("0").unwrap(), &Value::from("zero"));
    assert_eq!(map.keys().to_vec(), vec![Value::from("0"), Value::from("1")]);
}

#[test]
fn test_remove() {
    let mut map = Map::new();
    map.add([("a", 1), ("b", 2), ("c", 3)]).unwrap();

    assert_eq!(map.remove("b"), Some(Value::from(2)));
    assert_eq!(map.remove("b"), None);

    let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["a", "c"]);
}

#[test]
fn test_remove_element() {
    let mut map = Map::new();
    map.add([("a", 1), ("b", 2), ("c", 2)]).unwrap();

    assert!(map.remove_element(&Value::from(2)));
    assert!(!map.contains_key("b"));
    assert!(map.contains_key("c"));
    assert!(!map.remove_element(&Value::from(9)));
    assert_eq!(map.key_of(&Value::from(2)), Some("c"));
}

#[test]
fn test_keys_and_values() {
    let floats = TypeValidator::new(Some("float")).unwrap();
    let map = Map::from_entries([("x", 1.5), ("y", 2.5)], floats).unwrap();

    let keys = map.keys();
    assert_eq!(keys.validator().type_name(), Some("string"));
    assert_eq!(keys.to_vec(), vec![Value::from("x"), Value::from("y")]);

    let values = map.values();
    assert_eq!(values.validator().type_name(), Some("float"));
    assert_eq!(values.to_vec(), vec![Value::from(1.5), Value::from(2.5)]);
}

#[test]
fn test_clear_is_idempotent() {
    let mut map = indexed_map(&["foo", "bar"]);
    map.clear();
    assert!(map.is_empty());
    map.clear();
    assert!(map.is_empty());

    assert!(map.has_index("id"));
    assert_not_found(map.get_by("id", "foo"));
    assert_not_found(map.get_by("id", "bar"));
}

// ===== ORDERING =====

#[test]
fn test_sort_keeps_key_association() {
    let mut map = Map::typed("int").unwrap();
    map.add([("c", 3), ("a", 1), ("b", 2), ("z", 0)]).unwrap();
    let before: Vec<(String, Value)> = map
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

    map.sort();

    let order: Vec<&str> = map.iter().map(|(key, _)| key).collect();
    assert_eq!(order, ["z", "a", "b", "c"]);
    for (key, value) in &before {
        assert_eq!(map.get(key).unwrap(), value);
    }
}

#[test]
fn test_sort_by_comparator() {
    let mut map = Map::new();
    map.add([("a", 1), ("b", 3), ("c", 2)]).unwrap();
    map.sort_by(|a, b| b.natural_cmp(a));

    let values: Vec<i64> = map.iter().filter_map(|(_, v)| v.as_int()).collect();
    assert_eq!(values, [3, 2, 1]);
}

#[test]
fn test_sorted_leaves_receiver_unchanged() {
    let mut map = Map::new();
    map.add([("a", "pear"), ("b", "apple")]).unwrap();

    let sorted = map.sorted();
    assert_eq!(sorted.first_key(), Some("b"));
    assert_eq!(map.first_key(), Some("a"));
    assert_eq!(sorted.validator(), map.validator());
}

#[test]
fn test_sort_keeps_indexes_valid() {
    let mut map = indexed_map(&["b", "a", "c"]);
    map.sort_by(|x, y| {
        let id = |v: &Value| v.field("id").map(Value::to_key_string).unwrap_or_default();
        id(x).cmp(&id(y))
    });

    assert_eq!(map.first_key(), Some("key2"));
    assert_eq!(map.get_by("id", "b").unwrap(), &tagged("b"));
    assert_eq!(map.get_by("id", "c").unwrap(), map.get("key3").unwrap());
}

// ===== TRAIT ACCESS =====

#[test]
fn test_offset_access() {
    let mut map = Map::typed("string").unwrap();

    map.offset_set(Some("a"), Value::from("x")).unwrap();
    assert!(map.offset_exists("a"));
    assert_eq!(map.offset_get("a").unwrap(), &Value::from("x"));

    assert!(map.offset_set(Some("b"), Value::from(1)).unwrap_err().is_type_mismatch());

    let err = map.offset_set(None, Value::from("y")).unwrap_err();
    assert!(matches!(
        err,
        typed_collections::Error::Collection(CollectionError::MissingOffset)
    ));

    map.offset_unset("a");
    map.offset_unset("a");
    assert!(!map.offset_exists("a"));
}

#[test]
fn test_collection_trait() {
    fn first_of<C: Collection + ?Sized>(collection: &C, key: &C::Key) -> Option<String> {
        collection.get(key).ok().map(Value::to_key_string)
    }

    let mut map = Map::new();
    map.set("k", "v").unwrap();
    assert_eq!(first_of(&map, "k"), Some("v".to_string()));
    assert_eq!(first_of(&map, "missing"), None);

    Collection::clear(&mut map);
    assert!(Collection::is_empty(&map));
}

#[test]
#[should_panic(expected = "does not exist")]
fn test_bracket_access_panics_on_miss() {
    let map = Map::new();
    let _ = &map["missing"];
}

#[test]
fn test_equality_is_ordered() {
    let mut left = Map::new();
    left.add([("a", 1), ("b", 2)]).unwrap();
    let mut right = Map::new();
    right.add([("b", 2), ("a", 1)]).unwrap();

    assert_ne!(left, right);
    right.sort();
    assert_eq!(left, right);
    assert_ne!(left, Map::typed("int").unwrap().add([("a", 1), ("b", 2)]).unwrap().clone());
}
