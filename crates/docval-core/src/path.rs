//! `FieldPath`: an immutable ordered sequence of non-empty string
//! segments addressing a nested field inside an `ObjectValue`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The reserved segment used to address a document's own key rather
/// than one of its fields.
pub const KEY_FIELD_SEGMENT: &str = "__name__";

///
/// FieldPath
///
/// Segments are compared as strings; paths compare lexicographically
/// by segment, shorter-is-prefix sorting first (the derived `Ord` on
/// `Vec<String>` already gives us this). All operations return fresh
/// paths; there is no in-place mutation.
///
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    #[must_use]
    pub const fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn from_segment(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    #[must_use]
    pub fn key_field() -> Self {
        Self::from_segment(KEY_FIELD_SEGMENT)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn first_segment(&self) -> Option<&str> {
        self.segment(0)
    }

    #[must_use]
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Drops the head segment, returning the remainder. `None` if this
    /// path is already empty.
    #[must_use]
    pub fn pop_first(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[1..].to_vec(),
        })
    }

    #[must_use]
    pub fn append(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    #[must_use]
    pub fn append_path(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| a == b)
    }

    /// True iff this path addresses the reserved `__name__` key field.
    #[must_use]
    pub fn is_key_field(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == KEY_FIELD_SEGMENT
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            if needs_escaping(segment) {
                write!(f, "`{}`", segment.replace('`', "``"))?;
            } else {
                write!(f, "{segment}")?;
            }
        }
        Ok(())
    }
}

fn needs_escaping(segment: &str) -> bool {
    segment.is_empty() || segment.contains('.') || segment.contains('`')
}

impl FromIterator<String> for FieldPath {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Convenience constructor for call sites and tests: splits on `.`
/// without honoring backtick escaping. Prefer `FieldPath::new` when a
/// segment might itself contain a dot.
impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            return Self::empty();
        }
        Self {
            segments: value.split('.').map(str::to_string).collect(),
        }
    }
}

///
/// TESTS
///
