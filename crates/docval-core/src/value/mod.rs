mod compare;
mod rank;
mod tag;
mod wire;

#[cfg(test)]
mod tests;

use crate::hash;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

pub(crate) use tag::ValueTag;

///
/// ValueMap
///
/// Canonical backing store for `Value::Map`: keys are unique UTF-8
/// strings, iteration order is always key-sorted. `BTreeMap` already
/// gives us both properties for free.
///
pub type ValueMap = BTreeMap<String, Value>;

///
/// MapValueError
///
/// Invariant violation raised while constructing a `Value::Map` from
/// loose entries.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MapValueError {
    DuplicateKey { key: String },
}

impl std::fmt::Display for MapValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { key } => write!(f, "duplicate map key: {key}"),
        }
    }
}

impl std::error::Error for MapValueError {}

///
/// Timestamp
///
/// Seconds and nanoseconds since the Unix epoch. `nanos` is trusted to
/// lie in `[0, 1_000_000_000)`; the wire codec that produces `Value`s
/// is responsible for that invariant (see crate-level docs), so only a
/// debug assertion documents it here.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    #[must_use]
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        debug_assert!(nanos >= 0 && nanos < 1_000_000_000);
        Self { seconds, nanos }
    }
}

///
/// Reference
///
/// A canonical resource-path string (e.g. `projects/p/databases/d/documents/c/doc`).
/// Path structure is not validated here; that belongs to the external
/// document-key resolver.
///
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Display, From, Deref, Serialize, Deserialize)]
pub struct Reference(String);

impl Reference {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// GeoPoint
///
/// Compared latitude then longitude, using the double comparator (so
/// `NaN` components sort consistently with `Value::Double`).
///
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GeoPoint {}

impl Ord for GeoPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        compare::cmp_double(self.latitude, other.latitude)
            .then_with(|| compare::cmp_double(self.longitude, other.longitude))
    }
}

impl PartialOrd for GeoPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

///
/// Value
///
/// A tagged datum drawn from the ten-variant document value algebra:
/// null, boolean, number (integer or double, sharing one type-order
/// rank), timestamp, string, bytes, reference, geopoint, array, and
/// map. Every `Value` carries exactly one variant; there is no "unset"
/// state at this level.
///
#[derive(Clone, Debug, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Timestamp(Timestamp),
    String(String),
    Bytes(Vec<u8>),
    Reference(Reference),
    GeoPoint(GeoPoint),
    Array(Vec<Self>),
    Map(ValueMap),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    #[must_use]
    pub const fn bool(v: bool) -> Self {
        Self::Bool(v)
    }

    #[must_use]
    pub const fn int(v: i64) -> Self {
        Self::Int(v)
    }

    #[must_use]
    pub const fn double(v: f64) -> Self {
        Self::Double(v)
    }

    #[must_use]
    pub const fn timestamp(seconds: i64, nanos: i32) -> Self {
        Self::Timestamp(Timestamp::new(seconds, nanos))
    }

    #[must_use]
    pub fn string(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    #[must_use]
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(v.into())
    }

    #[must_use]
    pub fn reference(v: impl Into<String>) -> Self {
        Self::Reference(Reference::new(v))
    }

    #[must_use]
    pub const fn geo_point(latitude: f64, longitude: f64) -> Self {
        Self::GeoPoint(GeoPoint::new(latitude, longitude))
    }

    #[must_use]
    pub fn array(items: Vec<Self>) -> Self {
        Self::Array(items)
    }

    #[must_use]
    pub fn empty_map() -> Self {
        Self::Map(ValueMap::new())
    }

    /// Build a `Value::Map` from owned key/value entries, rejecting
    /// duplicate keys. `ValueMap` (a `BTreeMap`) gives sorted iteration
    /// for free; only the uniqueness invariant needs checking here.
    pub fn from_entries(entries: Vec<(String, Self)>) -> Result<Self, MapValueError> {
        let mut map = ValueMap::new();
        for (key, value) in entries {
            if map.insert(key.clone(), value).is_some() {
                return Err(MapValueError::DuplicateKey { key });
            }
        }
        Ok(Self::Map(map))
    }

    #[must_use]
    pub const fn from_map(map: ValueMap) -> Self {
        Self::Map(map)
    }

    ///
    /// PREDICATES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Double(_))
    }

    /// True iff this is a double carrying a NaN payload. Integers are
    /// never NaN.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Self::Double(d) if d.is_nan())
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&Vec<Self>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }

    ///
    /// ORDERING & HASHING
    ///

    /// Stable canonical variant tag used by hashing and canonical-id
    /// encodings.
    #[must_use]
    pub(crate) const fn canonical_tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    /// Stable canonical rank used by all cross-variant ordering
    /// surfaces; integers and doubles share one rank.
    #[must_use]
    pub(crate) const fn canonical_rank(&self) -> u8 {
        rank::canonical_rank(self)
    }

    /// Total canonical comparator: type rank first, then the per-type
    /// comparator for same-rank pairs. `NaN` is equal only to `NaN` and
    /// sorts below every other number (see `crate::filter::value_equals`
    /// for the distinct `=` predicate semantics).
    #[must_use]
    pub fn canonical_cmp(left: &Self, right: &Self) -> Ordering {
        compare::canonical_cmp(left, right)
    }

    /// Hash code consistent with `canonical_cmp`-based equality:
    /// `a == b => hash(a) == hash(b)`.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        hash::hash_code(self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        compare::canonical_cmp(self, other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare::canonical_cmp(self, other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        compare::canonical_cmp(self, other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hash::hash_code(self));
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Timestamp(v) => write!(f, "timestamp({}.{})", v.seconds, v.nanos),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Bytes(v) => write!(f, "bytes({} bytes)", v.len()),
            Self::Reference(v) => write!(f, "ref({v})"),
            Self::GeoPoint(v) => write!(f, "geo({}, {})", v.latitude, v.longitude),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

macro_rules! impl_from_for_value {
    ($( $ty:ty => $variant:ident ),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_value!(
    bool => Bool,
    i64 => Int,
    f64 => Double,
    String => String,
    Vec<u8> => Bytes,
    Timestamp => Timestamp,
    Reference => Reference,
    GeoPoint => GeoPoint,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}
