//! Natural ordering of values.
//!
//! Used by `sort()`/`sorted()` when no comparator is supplied. The order is total so
//! that sorting a mixed, untyped collection is deterministic.
//!
//! Ordering rules:
//! 1. Kind rank: null < bool < number < string < array < object
//! 2. Kind-specific comparison within the same rank
//!
//! Integers and floats share a rank and compare numerically.

use std::cmp::Ordering;

use crate::value::{Object, Value};

/// Total natural comparator.
pub fn natural_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = rank(left).cmp(&rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => cmp_lists(a, b),
        (Value::Object(a), Value::Object(b)) => cmp_objects(a, b),
        _ => Ordering::Equal,
    }
}

/// Total comparator for Map keys.
///
/// Keys that parse as integers come first, in numeric order; the rest follow in
/// byte order.
pub fn key_cmp(left: &str, right: &str) -> Ordering {
    match (left.parse::<i64>(), right.parse::<i64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => left.cmp(right),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::Text(_) => 3,
        Value::List(_) => 4,
        Value::Object(_) => 5,
    }
}

fn cmp_lists(left: &[Value], right: &[Value]) -> Ordering {
    for (a, b) in left.iter().zip(right) {
        let ordering = natural_cmp(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}

fn cmp_objects(left: &Object, right: &Object) -> Ordering {
    let class = left.class_name().cmp(&right.class_name());
    if class != Ordering::Equal {
        return class;
    }

    for ((left_name, left_value), (right_name, right_value)) in left.fields().zip(right.fields())
    {
        let ordering = left_name
            .cmp(right_name)
            .then_with(|| natural_cmp(left_value, right_value));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}
