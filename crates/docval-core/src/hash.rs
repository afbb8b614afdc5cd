//! `hash_code`: the hashing contract for `Value`, where `a == b => hash(a) == hash(b)`.
//!
//! Maps mix `31 * acc + key_hash` then `31 * acc + value_hash` over
//! keys in sorted order; arrays mix element hashes positionally. `NaN`
//! hashes to its IEEE bit pattern. Implemented as an exhaustive match
//! on the variant tag rather than polymorphic per-type dispatch.

use crate::value::Value;

const MIX_MUL: u64 = 31;

#[inline]
const fn mix(acc: u64, x: u64) -> u64 {
    acc.wrapping_mul(MIX_MUL).wrapping_add(x)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// `-0.0` and `0.0` compare equal under the double comparator, so both
/// must hash the same.
fn normalized_double_bits(d: f64) -> u64 {
    if d == 0.0 { 0.0f64.to_bits() } else { d.to_bits() }
}

/// Numbers hash by their double bit pattern whenever the integer side
/// is small enough to convert without losing precision (`|i| <= 2^53`,
/// the same threshold the mixed comparator uses). Outside that range,
/// hash consistency between an `Int` and an exactly-equal `Double` is
/// not guaranteed; see DESIGN.md.
fn int_number_bits(i: i64) -> u64 {
    if i.unsigned_abs() <= (1u64 << 53) {
        normalized_double_bits(i as f64)
    } else {
        i as u64
    }
}

fn double_number_bits(d: f64) -> u64 {
    if d.is_nan() {
        f64::NAN.to_bits()
    } else {
        normalized_double_bits(d)
    }
}

/// Hash code consistent with `Value::canonical_cmp`-based equality.
#[must_use]
pub fn hash_code(value: &Value) -> u64 {
    let tag = value.canonical_tag().to_u8().into();
    match value {
        Value::Null => mix(tag, 0),
        Value::Bool(b) => mix(tag, u64::from(*b)),
        Value::Int(i) => mix(tag, int_number_bits(*i)),
        Value::Double(d) => mix(tag, double_number_bits(*d)),
        Value::Timestamp(ts) => mix(mix(tag, ts.seconds as u64), ts.nanos as u64),
        Value::String(s) => mix(tag, fnv1a(s.as_bytes())),
        Value::Bytes(b) => mix(tag, fnv1a(b)),
        Value::Reference(r) => mix(tag, fnv1a(r.as_str().as_bytes())),
        Value::GeoPoint(g) => mix(
            mix(tag, normalized_double_bits(g.latitude)),
            normalized_double_bits(g.longitude),
        ),
        Value::Array(items) => {
            let mut acc = tag;
            for item in items {
                acc = mix(acc, hash_code(item));
            }
            acc
        }
        Value::Map(map) => {
            let mut acc = tag;
            for (key, value) in map {
                acc = mix(acc, fnv1a(key.as_bytes()));
                acc = mix(acc, hash_code(value));
            }
            acc
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::hash_code;
    use crate::value::Value;

    #[test]
    fn equal_values_hash_equal() {
        let a = Value::array(vec![Value::int(1), Value::string("x")]);
        let b = Value::array(vec![Value::int(1), Value::string("x")]);
        assert_eq!(hash_code(&a), hash_code(&b));
    }

    #[test]
    fn mixed_int_double_hash_equal_when_safe() {
        assert_eq!(hash_code(&Value::int(5)), hash_code(&Value::double(5.0)));
    }

    #[test]
    fn negative_zero_hashes_like_positive_zero() {
        assert_eq!(hash_code(&Value::double(0.0)), hash_code(&Value::double(-0.0)));
    }

    #[test]
    fn map_hash_is_order_independent_of_construction() {
        let a = Value::from_entries(vec![
            ("a".to_string(), Value::int(1)),
            ("b".to_string(), Value::int(2)),
        ])
        .unwrap();
        let b = Value::from_entries(vec![
            ("b".to_string(), Value::int(2)),
            ("a".to_string(), Value::int(1)),
        ])
        .unwrap();
        assert_eq!(hash_code(&a), hash_code(&b));
    }

    #[test]
    fn distinct_values_usually_hash_differently() {
        assert_ne!(hash_code(&Value::int(1)), hash_code(&Value::int(2)));
        assert_ne!(hash_code(&Value::string("a")), hash_code(&Value::string("b")));
    }
}
