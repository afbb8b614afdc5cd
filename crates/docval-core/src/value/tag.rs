use crate::value::Value;

///
/// ValueTag
///
/// Stable canonical value-variant tag used by hashing, ordering, and
/// canonical-id surfaces.
///
/// IMPORTANT:
/// Tag values are part of deterministic query/sort behavior and must
/// remain fixed once published.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueTag {
    Null = 1,
    Bool = 2,
    Number = 3,
    Timestamp = 4,
    String = 5,
    Bytes = 6,
    Reference = 7,
    GeoPoint = 8,
    Array = 9,
    Map = 10,
}

impl ValueTag {
    /// Stable wire/hash byte tag for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Number => "Number",
            Self::Timestamp => "Timestamp",
            Self::String => "String",
            Self::Bytes => "Bytes",
            Self::Reference => "Reference",
            Self::GeoPoint => "GeoPoint",
            Self::Array => "Array",
            Self::Map => "Map",
        }
    }
}

/// Stable canonical variant tag used by rank/hash/canonical-id encodings.
/// Both `Value::Int` and `Value::Double` map to `ValueTag::Number`: the
/// two Rust-level numeric variants share one type-order slot.
#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Int(_) | Value::Double(_) => ValueTag::Number,
        Value::Timestamp(_) => ValueTag::Timestamp,
        Value::String(_) => ValueTag::String,
        Value::Bytes(_) => ValueTag::Bytes,
        Value::Reference(_) => ValueTag::Reference,
        Value::GeoPoint(_) => ValueTag::GeoPoint,
        Value::Array(_) => ValueTag::Array,
        Value::Map(_) => ValueTag::Map,
    }
}
