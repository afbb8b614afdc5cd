//! Core value model for a client-side document store: tagged values,
//! field paths, persistent overlay objects, array transforms, and field
//! filters.
#![warn(unreachable_pub)]

pub mod error;
pub mod filter;
pub mod hash;
pub mod object;
pub mod path;
pub mod transform;
pub mod value;

///
/// Prelude
///
/// Domain vocabulary only: no error types, no internal helpers.
///

pub mod prelude {
    pub use crate::{
        filter::{Document, Filter, Operator},
        object::{FieldMask, ObjectValue},
        path::FieldPath,
        transform::ArrayTransform,
        value::{GeoPoint, Reference, Timestamp, Value},
    };
}
