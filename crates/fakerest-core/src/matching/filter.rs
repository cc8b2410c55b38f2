//! Exact-match record filtering.

use crate::types::record::Record;
use serde_json::{Number, Value};

/// Check that every filter field is present in `record` with an equal value.
///
/// Values are compared with deep [`values_equal`], so nested objects and arrays
/// must match exactly (no subset or substring matching). An empty filter matches
/// any record.
pub fn record_matches(record: &Record, filter: &Record) -> bool {
    filter.iter().all(|(field, expected)| {
        record
            .get(field)
            .is_some_and(|actual| values_equal(actual, expected))
    })
}

/// Deep equality of JSON values where numbers compare by numeric value.
///
/// `1` and `1.0` are equal; values of different JSON types never are, so
/// `"1"` differs from `1`. Object field order is ignored.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, x)| y.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x == y;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn r(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[rstest]
    #[case(json!({"id": 1, "arg": true}), json!({}), true)]
    #[case(json!({"id": 1, "arg": true}), json!({"arg": true}), true)]
    #[case(json!({"id": 1, "arg": true}), json!({"arg": false}), false)]
    #[case(json!({"id": 1, "name": "abc"}), json!({"name": "ab"}), false)]
    #[case(json!({"id": 1, "name": "abc"}), json!({"id": 1, "name": "abc"}), true)]
    #[case(json!({"id": 1, "name": "abc"}), json!({"id": 1, "name": "abd"}), false)]
    #[case(json!({"id": 1}), json!({"missing": null}), false)]
    #[case(json!({"id": 1}), json!({"id": "1"}), false)]
    #[case(json!({"tags": ["a", "b"]}), json!({"tags": ["a", "b"]}), true)]
    #[case(json!({"tags": ["a", "b"]}), json!({"tags": ["a"]}), false)]
    #[case(json!({"author": {"name": "Leo", "age": 82}}), json!({"author": {"name": "Leo", "age": 82}}), true)]
    #[case(json!({"author": {"name": "Leo", "age": 82}}), json!({"author": {"name": "Leo"}}), false)]
    #[case(json!({"id": 1, "price": 1}), json!({"price": 1.0}), true)]
    #[case(json!({"id": 1, "price": 1.0}), json!({"price": 1}), true)]
    #[case(json!({"id": 1, "price": 1.5}), json!({"price": 1}), false)]
    #[case(json!({"sizes": [1, 2.0]}), json!({"sizes": [1.0, 2]}), true)]
    #[case(json!({"dims": {"w": 2, "h": 3}}), json!({"dims": {"h": 3.0, "w": 2}}), true)]
    fn test_record_matches(#[case] record: Value, #[case] filter: Value, #[case] expected: bool) {
        assert_eq!(record_matches(&r(record), &r(filter)), expected);
    }

    #[rstest]
    #[case(json!(1), json!(1.0), true)]
    #[case(json!(-3), json!(-3.0), true)]
    #[case(json!(u64::MAX), json!(u64::MAX), true)]
    #[case(json!(u64::MAX), json!(-1), false)]
    #[case(json!(0.1), json!(0.1), true)]
    #[case(json!(1), json!("1"), false)]
    #[case(json!(null), json!(null), true)]
    #[case(json!(true), json!(1), false)]
    #[case(json!([1]), json!([1, 1]), false)]
    #[case(json!({"a": 1}), json!({"a": 1, "b": 2}), false)]
    fn test_values_equal(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
        assert_eq!(values_equal(&a, &b), expected);
        assert_eq!(values_equal(&b, &a), expected);
    }
}
