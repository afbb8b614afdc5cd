//! Field filter evaluation: predicate construction, routing to
//! specialized variants, and matching against a document.

use crate::{error::DocValError, object::ObjectValue, path::FieldPath, value::Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Operator
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Operator {
    LessThan,
    LessThanOrEqual,
    Equal,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    ArrayContains,
    ArrayContainsAny,
}

impl Operator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Equal => "=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::In => "in",
            Self::ArrayContains => "array-contains",
            Self::ArrayContainsAny => "array-contains-any",
        }
    }

    #[must_use]
    pub const fn is_inequality(self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual
        )
    }
}

///
/// Document
///
/// The minimal surface the filter evaluator needs from a document: a
/// single field lookup by path. Document-key resolution (so that a
/// `__name__` lookup yields the document's own reference) belongs to
/// the surrounding engine, not to this crate; `ObjectValue`'s own
/// implementation below simply looks the path up as an ordinary field
/// and does not special-case `__name__`.
///
pub trait Document {
    fn field(&self, path: &FieldPath) -> Option<Value>;
}

impl Document for ObjectValue {
    fn field(&self, path: &FieldPath) -> Option<Value> {
        self.get(path)
    }
}

///
/// Filter
///
/// `(field, op, bound)` construction routes to one of six specialized
/// variants rather than staying a single generic triple: the variant
/// tag participates in equality (two filters that happen to share
/// field/op/bound but differ in kind are not equal), matching the
/// intent behind the source's overly permissive `equals`.
///
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Field {
        field: FieldPath,
        op: Operator,
        bound: Value,
    },
    Key {
        op: Operator,
        bound: Value,
    },
    KeyIn {
        bound: Vec<Value>,
    },
    ArrayContains {
        field: FieldPath,
        bound: Value,
    },
    ArrayContainsAny {
        field: FieldPath,
        bound: Vec<Value>,
    },
    In {
        field: FieldPath,
        bound: Vec<Value>,
    },
}

impl Filter {
    /// Validates `(field, op, bound)` and routes to the matching
    /// variant. See the module docs for the routing rules.
    pub fn create(field: FieldPath, op: Operator, bound: Value) -> Result<Self, DocValError> {
        if field.is_key_field() {
            return Self::create_key_filter(op, bound);
        }

        if (bound.is_null() || bound.is_nan()) && !matches!(op, Operator::Equal) {
            return Err(DocValError::invalid_argument(
                "a Null or NaN bound only supports the = operator",
            ));
        }

        match op {
            Operator::ArrayContains => Ok(Self::ArrayContains { field, bound }),
            Operator::ArrayContainsAny => Ok(Self::ArrayContainsAny {
                field,
                bound: expect_array(bound)?,
            }),
            Operator::In => Ok(Self::In {
                field,
                bound: expect_array(bound)?,
            }),
            _ => Ok(Self::Field { field, op, bound }),
        }
    }

    fn create_key_filter(op: Operator, bound: Value) -> Result<Self, DocValError> {
        match op {
            Operator::In => Ok(Self::KeyIn {
                bound: expect_array(bound)?,
            }),
            Operator::ArrayContains | Operator::ArrayContainsAny => Err(
                DocValError::invalid_argument("array-contains[_any] is not valid on the key field"),
            ),
            _ => {
                if !matches!(bound, Value::Reference(_)) {
                    return Err(DocValError::invalid_argument(
                        "key field filters require a Reference bound",
                    ));
                }
                Ok(Self::Key { op, bound })
            }
        }
    }

    #[must_use]
    pub const fn operator(&self) -> Operator {
        match self {
            Self::Field { op, .. } | Self::Key { op, .. } => *op,
            Self::KeyIn { .. } | Self::In { .. } => Operator::In,
            Self::ArrayContains { .. } => Operator::ArrayContains,
            Self::ArrayContainsAny { .. } => Operator::ArrayContainsAny,
        }
    }

    #[must_use]
    pub const fn is_inequality(&self) -> bool {
        self.operator().is_inequality()
    }

    /// Evaluates this filter against a document's field value.
    #[must_use]
    pub fn matches<D: Document>(&self, document: &D) -> bool {
        match self {
            Self::Field { field, op, bound } => document
                .field(field)
                .is_some_and(|doc_value| relational_match(*op, &doc_value, bound)),
            Self::Key { op, bound } => document
                .field(&FieldPath::key_field())
                .is_some_and(|doc_value| relational_match(*op, &doc_value, bound)),
            Self::KeyIn { bound } => document
                .field(&FieldPath::key_field())
                .is_some_and(|doc_value| bound.iter().any(|b| value_equals(&doc_value, b))),
            Self::ArrayContains { field, bound } => document.field(field).is_some_and(|doc_value| {
                matches!(&doc_value, Value::Array(items) if items.iter().any(|v| value_equals(v, bound)))
            }),
            Self::ArrayContainsAny { field, bound } => {
                document.field(field).is_some_and(|doc_value| {
                    matches!(&doc_value, Value::Array(items)
                        if items.iter().any(|v| bound.iter().any(|b| value_equals(v, b))))
                })
            }
            Self::In { field, bound } => document
                .field(field)
                .is_some_and(|doc_value| bound.iter().any(|b| value_equals(&doc_value, b))),
        }
    }

    /// `canonicalPath(field) + opSymbol + canonicalValue(bound)`, with
    /// the bound's type rank encoded ahead of its string form so that
    /// values with identical string representations but different
    /// kinds (e.g. `1` vs `"1"`) do not collide.
    #[must_use]
    pub fn canonical_id(&self) -> String {
        match self {
            Self::Field { field, op, bound } => {
                format!("{field}{}{}", op.symbol(), canonical_value_id(bound))
            }
            Self::Key { op, bound } => format!(
                "{}{}{}",
                FieldPath::key_field(),
                op.symbol(),
                canonical_value_id(bound)
            ),
            Self::KeyIn { bound } => format!(
                "{}{}{}",
                FieldPath::key_field(),
                Operator::In.symbol(),
                canonical_array_id(bound)
            ),
            Self::ArrayContains { field, bound } => format!(
                "{field}{}{}",
                Operator::ArrayContains.symbol(),
                canonical_value_id(bound)
            ),
            Self::ArrayContainsAny { field, bound } => format!(
                "{field}{}{}",
                Operator::ArrayContainsAny.symbol(),
                canonical_array_id(bound)
            ),
            Self::In { field, bound } => {
                format!("{field}{}{}", Operator::In.symbol(), canonical_array_id(bound))
            }
        }
    }
}

fn expect_array(bound: Value) -> Result<Vec<Value>, DocValError> {
    match bound {
        Value::Array(items) => Ok(items),
        _ => Err(DocValError::invalid_argument(
            "operator requires an Array bound",
        )),
    }
}

fn canonical_value_id(value: &Value) -> String {
    format!("{}:{value}", value.canonical_tag().to_u8())
}

fn canonical_array_id(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(canonical_value_id).collect();
    format!("[{}]", items.join(","))
}

/// Equality used by `in`, `array-contains`, and `array-contains-any`:
/// the comparator's equivalence class, specialized so that `NaN` never
/// equals anything (including itself). These operators never carry a
/// NaN bound (rejected at construction, see `Filter::create`), but a
/// NaN document field must still fail to match a non-NaN element.
#[must_use]
pub fn value_equals(a: &Value, b: &Value) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    Value::canonical_cmp(a, b) == Ordering::Equal
}

/// Equality used by `=`: unlike `value_equals`, a NaN bound matches a
/// NaN document field. This is the one place NaN is allowed to equal
/// itself.
#[must_use]
fn equal_op_matches(doc_value: &Value, bound: &Value) -> bool {
    if bound.is_nan() {
        return doc_value.is_nan();
    }
    value_equals(doc_value, bound)
}

/// Plain relational match: the document field must exist, share the
/// bound's type rank, and satisfy the operator under the comparator.
/// Cross-type inequality never matches.
fn relational_match(op: Operator, doc_value: &Value, bound: &Value) -> bool {
    if doc_value.canonical_rank() != bound.canonical_rank() {
        return false;
    }

    if matches!(op, Operator::Equal) {
        return equal_op_matches(doc_value, bound);
    }

    let cmp = Value::canonical_cmp(doc_value, bound);
    match op {
        Operator::LessThan => cmp == Ordering::Less,
        Operator::LessThanOrEqual => cmp != Ordering::Greater,
        Operator::GreaterThan => cmp == Ordering::Greater,
        Operator::GreaterThanOrEqual => cmp != Ordering::Less,
        Operator::Equal | Operator::In | Operator::ArrayContains | Operator::ArrayContainsAny => {
            false
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(entries: Vec<(&str, Value)>) -> ObjectValue {
        ObjectValue::from_map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn null_bound_only_allows_equal() {
        let err = Filter::create(FieldPath::from("a"), Operator::LessThan, Value::null());
        assert!(err.is_err());
        let filter = Filter::create(FieldPath::from("a"), Operator::Equal, Value::null()).unwrap();
        assert!(filter.matches(&doc(vec![("a", Value::null())])));
        assert!(!filter.matches(&doc(vec![("a", Value::int(0))])));
    }

    #[test]
    fn nan_equal_matches_only_nan_field() {
        let filter =
            Filter::create(FieldPath::from("a"), Operator::Equal, Value::double(f64::NAN)).unwrap();
        assert!(filter.matches(&doc(vec![("a", Value::double(f64::NAN))])));
        assert!(!filter.matches(&doc(vec![("a", Value::double(0.0))])));

        let zero_filter =
            Filter::create(FieldPath::from("a"), Operator::Equal, Value::double(0.0)).unwrap();
        assert!(!zero_filter.matches(&doc(vec![("a", Value::double(f64::NAN))])));
    }

    #[test]
    fn cross_type_inequality_never_matches() {
        let filter =
            Filter::create(FieldPath::from("a"), Operator::GreaterThan, Value::string("a")).unwrap();
        assert!(!filter.matches(&doc(vec![("a", Value::int(5))])));
    }

    #[test]
    fn array_contains_any_matches_shared_element() {
        let filter = Filter::create(
            FieldPath::from("a"),
            Operator::ArrayContainsAny,
            Value::array(vec![Value::int(1), Value::string("x")]),
        )
        .unwrap();
        assert!(filter.matches(&doc(vec![(
            "a",
            Value::array(vec![Value::bool(true), Value::string("x"), Value::null()])
        )])));
        assert!(!filter.matches(&doc(vec![("a", Value::string("x"))])));
    }

    #[test]
    fn array_contains_any_requires_array_bound() {
        let err = Filter::create(
            FieldPath::from("a"),
            Operator::ArrayContainsAny,
            Value::int(1),
        );
        assert!(err.is_err());
    }

    #[test]
    fn key_field_array_contains_is_rejected() {
        let err = Filter::create(
            FieldPath::key_field(),
            Operator::ArrayContains,
            Value::reference("a/1"),
        );
        assert!(err.is_err());
    }

    #[test]
    fn key_field_in_matches_matching_reference() {
        let filter = Filter::create(
            FieldPath::key_field(),
            Operator::In,
            Value::array(vec![Value::reference("a/1"), Value::reference("a/2")]),
        )
        .unwrap();
        assert!(filter.matches(&doc(vec![("__name__", Value::reference("a/1"))])));
        assert!(!filter.matches(&doc(vec![("__name__", Value::reference("a/3"))])));
    }

    #[test]
    fn is_inequality_reports_relational_operators() {
        let lt = Filter::create(FieldPath::from("a"), Operator::LessThan, Value::int(1)).unwrap();
        let eq = Filter::create(FieldPath::from("a"), Operator::Equal, Value::int(1)).unwrap();
        assert!(lt.is_inequality());
        assert!(!eq.is_inequality());
    }

    #[test]
    fn canonical_id_distinguishes_value_kind() {
        let int_filter =
            Filter::create(FieldPath::from("a"), Operator::Equal, Value::int(1)).unwrap();
        let string_filter =
            Filter::create(FieldPath::from("a"), Operator::Equal, Value::string("1")).unwrap();
        assert_ne!(int_filter.canonical_id(), string_filter.canonical_id());
    }

    #[test]
    fn variant_tag_participates_in_equality() {
        let field_filter =
            Filter::create(FieldPath::from("a"), Operator::ArrayContains, Value::int(1)).unwrap();
        let in_filter = Filter::create(
            FieldPath::from("a"),
            Operator::In,
            Value::array(vec![Value::int(1)]),
        )
        .unwrap();
        assert_ne!(field_filter, in_filter);
    }
}
