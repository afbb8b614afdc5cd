use crate::value::Value;
use std::cmp::Ordering;

/// Values exceeding this magnitude as `f64` cannot represent every
/// adjacent `i64` distinctly, so the mixed comparator falls back to
/// comparing by sign and integer magnitude rather than casting to `f64`.
const F64_SAFE_I64: i64 = 1i64 << 53;

/// Total canonical comparator used by ordering, equality, and hashing.
///
/// Ranks first (`Value::canonical_rank`), then delegates to the
/// per-type comparator for same-rank pairs. This is a true total order:
/// `NaN` compares equal only to `NaN` and below every other number, so
/// transitivity and antisymmetry hold even though `NaN == NaN` is false
/// under the `=` query predicate (see `crate::filter::value_equals`).
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

#[allow(clippy::match_same_arms)]
fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Double(a), Value::Double(b)) => cmp_double(*a, *b),
        (Value::Int(i), Value::Double(d)) => cmp_mixed(*i, *d),
        (Value::Double(d), Value::Int(i)) => cmp_mixed(*i, *d).reverse(),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.as_str().cmp(b.as_str()),
        (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
        (Value::Reference(a), Value::Reference(b)) => a.cmp(b),
        (Value::GeoPoint(a), Value::GeoPoint(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => cmp_array(a, b),
        (Value::Map(a), Value::Map(b)) => cmp_map(a, b),
        // Same rank implies same variant family above; unreachable in
        // practice but kept total rather than panicking mid-sort.
        _ => Ordering::Equal,
    }
}

/// IEEE-754 total order with `-0.0 == 0.0` and `NaN` sorting below
/// every other double, equal only to itself.
#[must_use]
pub fn cmp_double(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Mixed int64/float64 comparator preserving mathematical order even
/// when `d` exceeds 2⁵³ and can no longer represent every adjacent
/// integer. `NaN` sorts below every integer.
#[must_use]
pub fn cmp_mixed(i: i64, d: f64) -> Ordering {
    if d.is_nan() {
        return Ordering::Greater;
    }

    if i.unsigned_abs() <= F64_SAFE_I64.unsigned_abs() {
        return cmp_double(i as f64, d);
    }

    // |i| > 2^53: compare by sign first, then by integer magnitude
    // after rounding `d` toward the integer (floor for positive `i`,
    // ceil for negative `i`) so the comparison never loses precision
    // on the integer side.
    let i_sign = i.signum();
    let d_sign = if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    };
    if i_sign != d_sign {
        return i_sign.cmp(&d_sign);
    }

    if i_sign >= 0 {
        let d_floor = d.floor();
        if d_floor > i64::MAX as f64 {
            return Ordering::Less;
        }
        i.cmp(&(d_floor as i64)).then_with(|| {
            let frac = d - d_floor;
            if frac > 0.0 {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        })
    } else {
        let d_ceil = d.ceil();
        if d_ceil < i64::MIN as f64 {
            return Ordering::Greater;
        }
        i.cmp(&(d_ceil as i64)).then_with(|| {
            let frac = d_ceil - d;
            if frac > 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }
}

fn cmp_array(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn cmp_map(left: &crate::value::ValueMap, right: &crate::value::ValueMap) -> Ordering {
    let mut left = left.iter();
    let mut right = right.iter();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some((lk, lv)), Some((rk, rv))) => {
                let key_cmp = lk.as_str().cmp(rk.as_str());
                if key_cmp != Ordering::Equal {
                    return key_cmp;
                }
                let value_cmp = canonical_cmp(lv, rv);
                if value_cmp != Ordering::Equal {
                    return value_cmp;
                }
            }
        }
    }
}
