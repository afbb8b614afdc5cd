//! Idempotent array mutations evaluated against a prior `Value`.

use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// ArrayTransform
///
/// `Union` and `Remove` are modeled as a tagged variant rather than
/// two free functions so that the tag participates in equality (two
/// transforms with the same element list but different kind are not
/// equal).
///
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ArrayTransform {
    Union(Vec<Value>),
    Remove(Vec<Value>),
}

impl ArrayTransform {
    #[must_use]
    pub const fn kind(&self) -> ArrayTransformKind {
        match self {
            Self::Union(_) => ArrayTransformKind::Union,
            Self::Remove(_) => ArrayTransformKind::Remove,
        }
    }

    /// Applies this transform to the prior value at a field. A prior
    /// value that is `Null` or not an `Array` is treated as an empty
    /// array, matching the server's own interpretation of a missing or
    /// mistyped field. Callers with no prior field at all pass
    /// `&Value::null()`.
    #[must_use]
    pub fn apply(&self, prior: &Value) -> Value {
        let base: Vec<Value> = match prior {
            Value::Array(items) => items.clone(),
            _ => Vec::new(),
        };

        match self {
            Self::Union(elements) => Value::array(union(base, elements)),
            Self::Remove(elements) => Value::array(remove(base, elements)),
        }
    }
}

/// Diagnostic-only accessor mirroring the small-enum-kind idiom used
/// elsewhere in this crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArrayTransformKind {
    Union,
    Remove,
}

fn union(mut base: Vec<Value>, elements: &[Value]) -> Vec<Value> {
    for element in elements {
        let already_present = base.iter().any(|v| v == element);
        if !already_present {
            base.push(element.clone());
        }
    }
    base
}

fn remove(base: Vec<Value>, elements: &[Value]) -> Vec<Value> {
    base.into_iter()
        .filter(|v| !elements.iter().any(|element| element == v))
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn arr(items: Vec<i64>) -> Value {
        Value::array(items.into_iter().map(Value::int).collect())
    }

    #[test]
    fn union_appends_new_elements_preserving_existing_order() {
        let transform = ArrayTransform::Union(vec![
            Value::int(1),
            Value::int(2),
            Value::int(2),
            Value::int(3),
        ]);
        let result = transform.apply(&arr(vec![2, 4]));
        assert_eq!(result, arr(vec![2, 4, 1, 3]));
    }

    #[test]
    fn union_on_null_prior_treats_it_as_empty_array() {
        let transform = ArrayTransform::Union(vec![Value::int(1)]);
        assert_eq!(transform.apply(&Value::null()), arr(vec![1]));
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let transform = ArrayTransform::Remove(vec![Value::int(1)]);
        let result = transform.apply(&arr(vec![1, 2, 1, 3]));
        assert_eq!(result, arr(vec![2, 3]));
    }

    #[test]
    fn remove_on_non_array_prior_yields_empty_array() {
        let transform = ArrayTransform::Remove(vec![Value::int(1)]);
        assert_eq!(transform.apply(&Value::string("x")), arr(vec![]));
    }

    #[test]
    fn union_is_idempotent() {
        let transform = ArrayTransform::Union(vec![Value::int(1)]);
        let once = transform.apply(&arr(vec![2]));
        let twice = transform.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn remove_is_idempotent() {
        let transform = ArrayTransform::Remove(vec![Value::int(1)]);
        let once = transform.apply(&arr(vec![1, 2]));
        let twice = transform.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn transforms_with_different_kinds_are_not_equal() {
        let elements = vec![Value::int(1)];
        assert_ne!(
            ArrayTransform::Union(elements.clone()),
            ArrayTransform::Remove(elements)
        );
    }
}
