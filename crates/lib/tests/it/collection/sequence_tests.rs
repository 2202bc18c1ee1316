//! Sequence integration tests

use typed_collections::{
    Collection, OffsetAccess, Sequence, TypeValidator, Value,
    collection::CollectionError,
};

use crate::helpers::*;

// ===== BASIC OPERATIONS =====

#[test]
fn test_sequence_basic_operations() {
    let mut sequence = Sequence::new();
    assert!(sequence.is_empty());

    sequence.push("a").unwrap().push(1).unwrap().push(true).unwrap();

    assert_eq!(sequence.len(), 3);
    assert_eq!(sequence.get(0).unwrap(), &Value::from("a"));
    assert_eq!(sequence[1], 1);
    assert_eq!(sequence[2], true);
    assert!(sequence.contains_key(2));
    assert!(!sequence.contains_key(3));
    assert!(sequence.contains(&Value::from(1)));
}

#[test]
fn test_typed_sequence_rejects_mismatch() {
    let mut sequence = Sequence::typed("int").unwrap();
    sequence.push(1).unwrap();

    let err = sequence.push("1").unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(sequence.to_vec(), vec![Value::from(1)]);
}

#[test]
fn test_get_out_of_range_fails() {
    let sequence = Sequence::from_values([1, 2], TypeValidator::untyped()).unwrap();
    let err = sequence.get(2).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Element with key '2' does not exist");
    assert!(sequence.try_get(2).is_none());
}

#[test]
fn test_pop_and_shift() {
    let mut sequence = Sequence::from_values(["a", "b", "c"], TypeValidator::untyped()).unwrap();

    assert_eq!(sequence.pop(), Some(Value::from("c")));
    assert_eq!(sequence.shift(), Some(Value::from("a")));
    assert_eq!(sequence.to_vec(), vec![Value::from("b")]);
    assert_eq!(sequence.shift(), Some(Value::from("b")));
    assert_eq!(sequence.pop(), None);
    assert_eq!(sequence.shift(), None);
}

#[test]
fn test_unshift_prepends_in_order() {
    let mut sequence = Sequence::typed("int").unwrap();
    sequence.add([3, 4]).unwrap();

    let count = sequence.unshift([1, 2]).unwrap();

    assert_eq!(count, 4);
    assert_eq!(sequence.to_json().unwrap(), "[1,2,3,4]");
}

#[test]
fn test_unshift_validates_before_inserting() {
    let mut sequence = Sequence::typed("int").unwrap();
    sequence.push(3).unwrap();

    let err = sequence
        .unshift([Value::from(1), Value::from("2")])
        .unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(sequence.to_json().unwrap(), "[3]");
}

#[test]
fn test_remove_keeps_positions_dense() {
    let mut sequence = Sequence::from_values(["a", "b", "c"], TypeValidator::untyped()).unwrap();

    assert_eq!(sequence.remove(0), Some(Value::from("a")));
    assert_eq!(sequence.remove(5), None);

    let positions: Vec<usize> = sequence.iter().map(|(position, _)| position).collect();
    assert_eq!(positions, [0, 1]);
    assert_eq!(sequence[0], "b");
}

#[test]
fn test_remove_element() {
    let mut sequence = Sequence::from_values([1, 2, 1], TypeValidator::untyped()).unwrap();

    assert!(sequence.remove_element(&Value::from(1)));
    assert_eq!(sequence.to_json().unwrap(), "[2,1]");
    assert!(!sequence.remove_element(&Value::from(7)));
}

#[test]
fn test_first_last_and_keys() {
    let sequence = Sequence::from_values(["x", "y", "z"], TypeValidator::untyped()).unwrap();

    assert_eq!(sequence.first(), Some(&Value::from("x")));
    assert_eq!(sequence.last(), Some(&Value::from("z")));
    assert_eq!(sequence.first_key(), Some(0));
    assert_eq!(sequence.last_key(), Some(2));
    assert_eq!(sequence.keys().to_json().unwrap(), "[0,1,2]");

    let empty = Sequence::new();
    assert_eq!(empty.first(), None);
    assert_eq!(empty.last_key(), None);
}

#[test]
fn test_clear() {
    let mut sequence = indexed_sequence(&["foo", "bar"]);
    sequence.clear().clear();

    assert!(sequence.is_empty());
    assert_not_found(sequence.get_by("id", "foo"));
}

// ===== ORDERING =====

#[test]
fn test_sort_and_sorted() {
    let mut sequence = Sequence::typed("int").unwrap();
    sequence.push(3).unwrap().push(1).unwrap().push(2).unwrap();

    let unsorted = sequence.clone();
    let sorted = unsorted.sorted();
    assert_eq!(sorted.to_json().unwrap(), "[1,2,3]");
    assert_eq!(unsorted.to_json().unwrap(), "[3,1,2]");

    sequence.sort();
    assert_eq!(sequence.to_json().unwrap(), "[1,2,3]");
    assert_eq!(sequence, sorted);
}

#[test]
fn test_sort_mixed_values() {
    let mut sequence = Sequence::new();
    sequence
        .add([Value::from("b"), Value::from(2.5), Value::Null, Value::from(1), Value::from(true)])
        .unwrap();
    sequence.sort();

    assert_eq!(sequence.to_json().unwrap(), r#"[null,true,1,2.5,"b"]"#);
}

#[test]
fn test_sort_by_is_stable() {
    let mut sequence = Sequence::new();
    for (id, rank) in [("a", 2), ("b", 1), ("c", 2), ("d", 1)] {
        let element = tagged(id);
        let mut object = element.as_object().cloned().unwrap();
        object.set("rank", rank);
        sequence.push(object).unwrap();
    }

    sequence.sort_by(|x, y| x.field("rank").unwrap().natural_cmp(y.field("rank").unwrap()));
    assert_eq!(ids(sequence.as_slice()), ["b", "d", "a", "c"]);
}

// ===== TRAIT ACCESS =====

#[test]
fn test_offset_set_only_appends() {
    let mut sequence = Sequence::typed("string").unwrap();
    sequence.offset_set(None, "a").unwrap();
    assert_eq!(sequence.len(), 1);

    let err = sequence.offset_set(Some(0), "b").unwrap_err();
    assert!(err.is_illegal_operation());
    assert!(matches!(
        err,
        typed_collections::Error::Collection(CollectionError::NonSequentialWrite { offset: 0 })
    ));
    assert_eq!(
        err.to_string(),
        "Cannot set element at offset 0. Sequences must be sequential"
    );

    let err = OffsetAccess::offset_set(&mut sequence, Some(5), Value::from("c")).unwrap_err();
    assert!(err.is_illegal_operation());
    assert_eq!(sequence.len(), 1);
}

#[test]
fn test_offset_access_trait() {
    let mut sequence = Sequence::from_values(["a", "b"], TypeValidator::untyped()).unwrap();

    assert!(OffsetAccess::offset_exists(&sequence, 1));
    assert_eq!(OffsetAccess::offset_get(&sequence, 0).unwrap(), &Value::from("a"));
    OffsetAccess::offset_unset(&mut sequence, 0);
    assert_eq!(sequence[0], "b");
    assert!(!OffsetAccess::offset_exists(&sequence, 1));
}

#[test]
fn test_collection_trait() {
    let sequence = Sequence::from_values([10, 20], TypeValidator::untyped()).unwrap();
    assert_eq!(Collection::get(&sequence, &1).unwrap(), &Value::from(20));
    assert!(Collection::contains_key(&sequence, &0));
    assert_eq!(Collection::values(&sequence), sequence);
}

#[test]
fn test_iteration() {
    let sequence = Sequence::from_values(["a", "b"], TypeValidator::untyped()).unwrap();

    let mut seen = Vec::new();
    for (position, element) in &sequence {
        seen.push(format!("{position}={element}"));
    }
    assert_eq!(seen, ["0=a", "1=b"]);

    let owned: Vec<Value> = sequence.into_iter().collect();
    assert_eq!(owned, vec![Value::from("a"), Value::from("b")]);
}
