//! Secondary index integration tests
//!
//! Every mutation that can move or drop a primary key must leave `get_by` pointing at
//! the element's current key or position.

use typed_collections::{Map, Sequence, Value, collection::CollectionError};

use crate::helpers::*;

// ===== SEQUENCE =====

#[test]
fn test_get_by_after_shift() {
    let mut sequence = indexed_sequence(&["foo", "bar", "baz"]);

    assert_eq!(sequence.shift(), Some(tagged("foo")));

    assert_eq!(sequence.get_by("id", "bar").unwrap(), &tagged("bar"));
    assert_eq!(sequence.get_by("id", "baz").unwrap(), &tagged("baz"));
    assert_not_found(sequence.get_by("id", "foo"));
}

#[test]
fn test_get_by_after_unshift() {
    let mut sequence = indexed_sequence(&["foo", "bar"]);

    let count = sequence.unshift([tagged("baz"), tagged("qux")]).unwrap();

    assert_eq!(count, 4);
    assert_eq!(ids(sequence.as_slice()), ["baz", "qux", "foo", "bar"]);
    assert_eq!(sequence.get_by("id", "foo").unwrap(), &tagged("foo"));
    assert_eq!(sequence.get_by("id", "baz").unwrap(), &tagged("baz"));
    assert_eq!(sequence.get_index("id").unwrap().get("bar"), Some(&3));
}

#[test]
fn test_get_by_after_pop() {
    let mut sequence = indexed_sequence(&["foo", "bar"]);
    sequence.pop();

    assert_eq!(sequence.get_by("id", "foo").unwrap(), &tagged("foo"));
    assert_not_found(sequence.get_by("id", "bar"));
}

#[test]
fn test_get_by_after_push() {
    let mut sequence = indexed_sequence(&["foo"]);
    sequence.push(tagged("bar")).unwrap();

    assert_eq!(sequence.get_index("id").unwrap().get("bar"), Some(&1));
    assert_eq!(sequence.get_by("id", "bar").unwrap(), &tagged("bar"));
}

#[test]
fn test_get_by_after_sort() {
    let mut sequence = indexed_sequence(&["c", "a", "b"]);

    sequence.sort();

    assert_eq!(ids(sequence.as_slice()), ["a", "b", "c"]);
    for id in ["a", "b", "c"] {
        assert_eq!(sequence.get_by("id", id).unwrap(), &tagged(id));
    }
    assert_eq!(sequence.get_index("id").unwrap().get("a"), Some(&0));
}

#[test]
fn test_get_by_after_remove() {
    let mut sequence = indexed_sequence(&["foo", "bar", "baz"]);
    assert!(sequence.remove_element(&tagged("foo")));

    assert_eq!(sequence.get_by("id", "baz").unwrap(), &tagged("baz"));
    assert_not_found(sequence.get_by("id", "foo"));
}

#[test]
fn test_index_added_after_elements() {
    let mut sequence = Sequence::new();
    sequence.add([tagged("x"), tagged("y")]).unwrap();
    sequence.add_index("id", |element: &Value| {
        element.field("id").map(Value::to_key_string).unwrap_or_default()
    });

    assert_eq!(sequence.get_by("id", "y").unwrap(), &tagged("y"));
}

#[test]
fn test_multiple_indexes_stay_in_step() {
    let mut sequence = indexed_sequence(&["foo", "bar"]);
    sequence.add_index("upper", |element: &Value| {
        element
            .field("id")
            .and_then(Value::as_text)
            .unwrap_or_default()
            .to_uppercase()
    });

    sequence.shift();

    assert_eq!(sequence.get_by("upper", "BAR").unwrap(), &tagged("bar"));
    assert_eq!(sequence.get_by("id", "bar").unwrap(), &tagged("bar"));
    assert_not_found(sequence.get_by("upper", "FOO"));
    assert_eq!(sequence.index_ids().collect::<Vec<_>>(), ["id", "upper"]);
}

// ===== MAP =====

#[test]
fn test_map_get_by_then_remove() {
    let mut map = Map::typed("object").unwrap();
    let obj1 = tagged("one");
    map.set("key1", obj1.clone()).unwrap();
    map.add_index("id", |element: &Value| {
        element.field("id").map(Value::to_key_string).unwrap_or_default()
    });

    assert_eq!(map.get_by("id", "one").unwrap(), &obj1);

    map.remove("key1");
    let err = map.get_by("id", "one").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Key 'one' does not exist within index 'id'");
}

#[test]
fn test_map_class_typed_index() {
    let mut map = Map::with_validator(validator("Foo"));
    map.set("a", instance("Foo", "foo")).unwrap();
    map.set("b", instance("Bar", "bar")).unwrap();
    map.add_index_fn("id", typed_collections::collection::index::by_field("id"));

    assert_eq!(map.get_by("id", "bar").unwrap().type_name(), "Bar");
    assert!(map.set("c", instance("Baz", "baz")).is_err());
    assert!(map.try_get_by("id", "baz").is_none());
}

#[test]
fn test_map_overwrite_replaces_index_key() {
    let mut map = indexed_map(&["foo", "bar"]);
    map.set("key1", tagged("changed")).unwrap();

    assert_not_found(map.get_by("id", "foo"));
    assert_eq!(map.get_by("id", "changed").unwrap(), map.get("key1").unwrap());
}

#[test]
fn test_map_set_new_key_is_indexed() {
    let mut map = indexed_map(&["foo"]);
    map.set("key9", tagged("late")).unwrap();
    assert_eq!(map.get_index("id").unwrap().get("late"), Some(&"key9".to_string()));
}

#[test]
fn test_map_remove_element_updates_index() {
    let mut map = indexed_map(&["foo", "bar"]);
    assert!(map.remove_element(&tagged("bar")));
    assert_not_found(map.get_by("id", "bar"));
    assert_eq!(map.get_by("id", "foo").unwrap(), &tagged("foo"));
}

// ===== REGISTRATION =====

#[test]
fn test_unknown_index() {
    let map = indexed_map(&["foo"]);
    let err = map.get_by("missing", "foo").unwrap_err();

    assert!(err.is_unknown_index());
    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "Index 'missing' not found");
    match err {
        typed_collections::Error::Collection(CollectionError::UnknownIndex { ref id }) => {
            assert_eq!(id, "missing")
        }
        other => panic!("Expected UnknownIndex, got {other:?}"),
    }
}

#[test]
fn test_remove_index() {
    let mut sequence = indexed_sequence(&["foo"]);
    assert!(sequence.has_index("id"));

    sequence.remove_index("id");

    assert!(!sequence.has_index("id"));
    assert!(sequence.get_by("id", "foo").unwrap_err().is_unknown_index());
    assert!(sequence.try_get_by("id", "foo").is_none());
}

#[test]
fn test_re_adding_index_replaces_it() {
    let mut map = indexed_map(&["foo"]);
    map.add_index("id", |element: &Value| {
        let id = element.field("id").map(Value::to_key_string);
        format!("#{}", id.unwrap_or_default())
    });

    assert_not_found(map.get_by("id", "foo"));
    assert_eq!(map.get_by("id", "#foo").unwrap(), &tagged("foo"));
}

#[test]
fn test_colliding_index_keys_last_write_wins() {
    let mut sequence = Sequence::new();
    sequence.add_index("kind", |element: &Value| element.type_name().to_string());
    sequence.add([Value::from(1), Value::from(2)]).unwrap();

    assert_eq!(sequence.get_by("kind", "int").unwrap(), &Value::from(2));
}

#[test]
fn test_derived_collections_have_no_indexes() {
    let sequence = indexed_sequence(&["foo", "bar"]);
    let filtered = sequence.filter(|_, _| true);
    let sorted = sequence.sorted();

    assert!(!filtered.has_index("id"));
    assert!(!sorted.has_index("id"));
    assert!(filtered.get_by("id", "foo").unwrap_err().is_unknown_index());

    let map = indexed_map(&["foo"]);
    assert_eq!(map.filter(|_, _| true).index_ids().count(), 0);
}
