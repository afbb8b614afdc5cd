use crate::value::{Value, compare};
use std::cmp::Ordering;

fn sample_chain() -> Vec<Value> {
    vec![
        Value::null(),
        Value::bool(false),
        Value::bool(true),
        Value::int(1),
        Value::double(1.5),
        Value::int(2),
        Value::timestamp(1, 0),
        Value::string(""),
        Value::string("a"),
        Value::bytes(vec![0x00]),
        Value::reference("a/b"),
        Value::geo_point(0.0, 0.0),
        Value::array(vec![]),
        Value::array(vec![Value::int(1)]),
        Value::empty_map(),
        Value::from_entries(vec![("a".to_string(), Value::int(1))]).unwrap(),
    ]
}

#[test]
fn cross_type_ordering_chain() {
    let chain = sample_chain();
    for window in chain.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        assert_eq!(
            Value::canonical_cmp(a, b),
            Ordering::Less,
            "{a:?} should sort before {b:?}"
        );
    }
}

#[test]
fn total_order_is_reflexive_antisymmetric_transitive() {
    let chain = sample_chain();
    for a in &chain {
        assert_eq!(Value::canonical_cmp(a, a), Ordering::Equal);
    }
    for pair in chain.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let fwd = Value::canonical_cmp(a, b);
        let back = Value::canonical_cmp(b, a);
        assert_eq!(fwd, back.reverse());
    }
    for triple in chain.windows(3) {
        let (a, b, c) = (&triple[0], &triple[1], &triple[2]);
        if Value::canonical_cmp(a, b) == Ordering::Less
            && Value::canonical_cmp(b, c) == Ordering::Less
        {
            assert_eq!(Value::canonical_cmp(a, c), Ordering::Less);
        }
    }
}

#[test]
fn type_separation_follows_rank() {
    let a = Value::int(1);
    let b = Value::string("z");
    assert_eq!(
        Value::canonical_cmp(&a, &b),
        a.canonical_rank().cmp(&b.canonical_rank())
    );
}

#[test]
fn mixed_numeric_compare_huge_int_vs_huge_double() {
    let cmp = compare::cmp_mixed(i64::MAX, 1e19);
    assert_eq!(cmp, Ordering::Less);
}

#[test]
fn mixed_numeric_compare_nan_sorts_below_integers() {
    assert_eq!(
        Value::canonical_cmp(&Value::double(f64::NAN), &Value::int(0)),
        Ordering::Less
    );
}

#[test]
fn nan_is_self_equal_under_comparator() {
    let nan = Value::double(f64::NAN);
    assert_eq!(nan.clone(), nan);
}

#[test]
fn negative_zero_equals_positive_zero() {
    assert_eq!(Value::double(0.0), Value::double(-0.0));
}

#[test]
fn int_and_double_compare_equal_when_mathematically_equal() {
    assert_eq!(Value::int(5), Value::double(5.0));
}

#[test]
fn map_construction_rejects_duplicate_keys() {
    let err = Value::from_entries(vec![
        ("a".to_string(), Value::int(1)),
        ("a".to_string(), Value::int(2)),
    ]);
    assert!(err.is_err());
}

#[test]
fn map_iterates_in_sorted_key_order() {
    let value = Value::from_entries(vec![
        ("b".to_string(), Value::int(2)),
        ("a".to_string(), Value::int(1)),
    ])
    .unwrap();
    let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn array_order_matters_for_equality() {
    let a = Value::array(vec![Value::int(1), Value::int(2)]);
    let b = Value::array(vec![Value::int(2), Value::int(1)]);
    assert_ne!(a, b);
}

#[test]
fn geo_point_breaks_latitude_tie_on_longitude() {
    let west = Value::geo_point(0.0, 1.0);
    let east = Value::geo_point(0.0, 2.0);
    assert_eq!(Value::canonical_cmp(&west, &east), Ordering::Less);
}

#[test]
fn shorter_array_or_map_sorts_before_prefix_extension() {
    let short = Value::array(vec![Value::int(1)]);
    let long = Value::array(vec![Value::int(1), Value::int(2)]);
    assert_eq!(Value::canonical_cmp(&short, &long), Ordering::Less);
}

mod props {
    use crate::value::Value;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::null()),
            any::<bool>().prop_map(Value::bool),
            any::<i64>().prop_map(Value::int),
            any::<f64>().prop_map(Value::double),
            ".*".prop_map(Value::string),
        ]
    }

    proptest! {
        #[test]
        fn comparator_is_antisymmetric(a in arb_scalar(), b in arb_scalar()) {
            let fwd = Value::canonical_cmp(&a, &b);
            let back = Value::canonical_cmp(&b, &a);
            prop_assert_eq!(fwd, back.reverse());
        }

        #[test]
        fn equality_implies_equal_hash(a in arb_scalar(), b in arb_scalar()) {
            if a == b {
                prop_assert_eq!(a.hash_code(), b.hash_code());
            }
        }

        #[test]
        fn comparator_is_reflexive(a in arb_scalar()) {
            prop_assert_eq!(Value::canonical_cmp(&a, &a), Ordering::Equal);
        }
    }
}
