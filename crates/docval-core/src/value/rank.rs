use crate::value::{Value, tag};

///
/// Canonical Value Rank
///
/// Stable 0-based rank used for cross-variant ordering: `Null` sorts
/// first, `Map` sorts last. Integers and doubles share rank 2.
///
/// IMPORTANT:
/// Rank order is part of deterministic query/sort behavior and must
/// remain fixed once published.
///
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    // Tags are 1-based for wire/hash stability; rank is 0-based.
    tag::canonical_tag(value).to_u8() - 1
}
