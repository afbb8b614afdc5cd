use crate::value::{GeoPoint, MapValueError, Reference, Timestamp, Value};
use serde::{Deserialize, Deserializer};

///
/// ValueWire
///
/// Serde decode shape used to re-check `Value::Map` invariants
/// (unique keys) during deserialization, the same way a derived
/// `Deserialize` for `Value` could not: derive would happily decode a
/// `BTreeMap` built from a wire array that repeated a key, silently
/// keeping the last occurrence instead of rejecting it.
///
#[derive(Deserialize)]
enum ValueWire {
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
    Map(Vec<(String, Self)>),
}

impl ValueWire {
    fn into_value(self) -> Result<Value, MapValueError> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Bool(v) => Ok(Value::Bool(v)),
            Self::Int(v) => Ok(Value::Int(v)),
            Self::Double(v) => Ok(Value::Double(v)),
            Self::Timestamp(v) => Ok(Value::Timestamp(v)),
            Self::String(v) => Ok(Value::String(v)),
            Self::Bytes(v) => Ok(Value::Bytes(v)),
            Self::Reference(v) => Ok(Value::Reference(v)),
            Self::GeoPoint(v) => Ok(Value::GeoPoint(v)),
            Self::Array(items) => {
                let items = items
                    .into_iter()
                    .map(Self::into_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(items))
            }
            Self::Map(entries) => {
                let entries = entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, value.into_value()?)))
                    .collect::<Result<Vec<_>, MapValueError>>()?;
                Value::from_entries(entries)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = ValueWire::deserialize(deserializer)?;
        wire.into_value().map_err(serde::de::Error::custom)
    }
}
