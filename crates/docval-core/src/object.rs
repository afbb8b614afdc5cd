//! `ObjectValue`: a persistent, structurally-shared map-rooted value
//! supporting path-addressed `get` / `set` / `delete` over a base map
//! plus an overlay of pending writes.

use crate::{error::DocValError, path::FieldPath, value::{Value, ValueMap}};
use im::OrdMap;
use std::cmp::Ordering;
use std::collections::HashSet;

///
/// ChildState
///
/// A `Present` overlay entry replaces the base child of the same name;
/// a `Deleted` entry tombstones it. Keeping deletion as its own
/// variant (rather than overlaying `Value::Null`) lets "field set to
/// null" and "field deleted" round-trip distinctly through `iterate`
/// and `get`.
///
#[derive(Clone, Debug, Eq, PartialEq)]
enum ChildState {
    Present(Child),
    Deleted,
}

///
/// Child
///
/// What a `Present` overlay entry actually holds. A map child is kept
/// as a nested `ObjectValue` (`Object`) rather than flattened to a
/// plain `Value::Map`, so a deeper `set`/`delete` can recurse into it
/// and reuse its `im::OrdMap` structure instead of re-flattening the
/// whole subtree on every write. Anything else is a `Leaf`.
///
#[derive(Clone, Debug, Eq, PartialEq)]
enum Child {
    Leaf(Value),
    Object(Box<ObjectValue>),
}

impl Child {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Map(map) => Self::Object(Box::new(ObjectValue::from_map(map))),
            other => Self::Leaf(other),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Leaf(v) => v.clone(),
            Self::Object(obj) => obj.to_value(),
        }
    }
}

///
/// ObjectValue
///
/// Represented as `(base, overlays)`: `base` is the immutable map this
/// object was constructed from; `overlays` records pending writes atop
/// it. Both are persistent ordered maps (`im::OrdMap`), so `set` and
/// `delete` return a new `ObjectValue` that shares all unchanged
/// structure with `self` in O(log n) time and allocation. The base map
/// itself is never mutated.
///
#[derive(Clone, Debug)]
pub struct ObjectValue {
    base: OrdMap<String, Value>,
    overlays: OrdMap<String, ChildState>,
}

impl ObjectValue {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            base: OrdMap::new(),
            overlays: OrdMap::new(),
        }
    }

    #[must_use]
    pub fn from_map(map: ValueMap) -> Self {
        Self {
            base: map.into_iter().collect(),
            overlays: OrdMap::new(),
        }
    }

    /// Descend `path` through overlays first, then through the base
    /// map, returning the value at that path if one exists.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<Value> {
        let head = path.first_segment()?;
        let rest = path.pop_first()?;

        match self.overlays.get(head) {
            Some(ChildState::Deleted) => None,
            Some(ChildState::Present(Child::Object(child))) => {
                if rest.is_empty() {
                    Some(child.to_value())
                } else {
                    child.get(&rest)
                }
            }
            Some(ChildState::Present(Child::Leaf(value))) => descend(value, &rest),
            None => descend(self.base.get(head)?, &rest),
        }
    }

    /// Returns a new `ObjectValue` with `value` installed at `path`.
    /// `path` must be non-empty.
    pub fn set(&self, path: &FieldPath, value: Value) -> Result<Self, DocValError> {
        if path.is_empty() {
            return Err(DocValError::invalid_argument(
                "set requires a non-empty field path",
            ));
        }
        Ok(self.set_at(path, value))
    }

    fn set_at(&self, path: &FieldPath, value: Value) -> Self {
        let head = path.first_segment().expect("checked by set()");
        let rest = path.pop_first().expect("checked by set()");

        let new_state = if rest.is_empty() {
            ChildState::Present(Child::from_value(value))
        } else {
            let child = self.child_object(head);
            ChildState::Present(Child::Object(Box::new(child.set_at(&rest, value))))
        };

        Self {
            base: self.base.clone(),
            overlays: self.overlays.update(head.to_string(), new_state),
        }
    }

    /// Returns a new `ObjectValue` with the value at `path` removed.
    /// `path` must be non-empty. Deleting through a non-map child is a
    /// no-op rather than coercing that child into a map.
    pub fn delete(&self, path: &FieldPath) -> Result<Self, DocValError> {
        if path.is_empty() {
            return Err(DocValError::invalid_argument(
                "delete requires a non-empty field path",
            ));
        }
        Ok(self.delete_at(path))
    }

    fn delete_at(&self, path: &FieldPath) -> Self {
        let head = path.first_segment().expect("checked by delete()");
        let rest = path.pop_first().expect("checked by delete()");

        if rest.is_empty() {
            return Self {
                base: self.base.clone(),
                overlays: self.overlays.update(head.to_string(), ChildState::Deleted),
            };
        }

        if !self.child_is_map(head) {
            return self.clone();
        }

        let child = self.child_object(head);
        let updated = child.delete_at(&rest);
        Self {
            base: self.base.clone(),
            overlays: self
                .overlays
                .update(head.to_string(), ChildState::Present(Child::Object(Box::new(updated)))),
        }
    }

    /// Lazy merged view of `(name, value)` pairs in lexicographic key
    /// order: base and overlay are each already sorted by name, so this
    /// is a two-way merge that skips tombstones and, on a tied key,
    /// prefers the overlay.
    pub fn iterate(&self) -> impl Iterator<Item = (String, Value)> + '_ {
        MergeIter {
            base: self.base.iter().peekable(),
            overlay: self.overlays.iter().peekable(),
        }
    }

    /// Recursive descent producing the set of leaf paths, including
    /// paths to empty nested maps (so the object can be rebuilt
    /// exactly by replaying `set` for every yielded path).
    #[must_use]
    pub fn field_mask(&self) -> FieldMask {
        let mut paths = Vec::new();
        self.collect_field_mask(&FieldPath::empty(), &mut paths);
        FieldMask::new(paths)
    }

    fn collect_field_mask(&self, prefix: &FieldPath, out: &mut Vec<FieldPath>) {
        for (name, value) in self.iterate() {
            let path = prefix.append(name);
            match value {
                Value::Map(map) if map.is_empty() => out.push(path),
                Value::Map(map) => Self::from_map(map).collect_field_mask(&path, out),
                _ => out.push(path),
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iterate().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iterate().next().is_none()
    }

    /// Flattens this object's merged view into a plain `Value::Map`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Map(self.iterate().collect())
    }

    /// True iff the current value at `head` (overlay, if any, else
    /// base) is a Map. Checked without materializing anything: an
    /// overlaid `Child::Object` is by construction always a map child.
    fn child_is_map(&self, head: &str) -> bool {
        match self.overlays.get(head) {
            Some(ChildState::Present(Child::Object(_))) => true,
            Some(ChildState::Present(Child::Leaf(_)) | ChildState::Deleted) => false,
            None => matches!(self.base.get(head), Some(Value::Map(_))),
        }
    }

    /// The current value at `head`, reinterpreted as an `ObjectValue`
    /// (empty if absent or not a map) so a deeper `set`/`delete` can
    /// recurse into it. If `head` already holds a nested `Child::Object`
    /// this is an O(1) clone (the boxed `ObjectValue`'s `im::OrdMap`
    /// fields are structurally shared); only the first touch of a plain
    /// base map pays the one-time cost of building its `im::OrdMap`.
    fn child_object(&self, head: &str) -> Self {
        match self.overlays.get(head) {
            Some(ChildState::Present(Child::Object(child))) => (**child).clone(),
            Some(ChildState::Present(Child::Leaf(_)) | ChildState::Deleted) => Self::empty(),
            None => match self.base.get(head) {
                Some(Value::Map(map)) => Self::from_map(map.clone()),
                _ => Self::empty(),
            },
        }
    }
}

impl PartialEq for ObjectValue {
    /// Two objects are equal iff their merged iteration sequences are
    /// pairwise equal and exhaust together.
    fn eq(&self, other: &Self) -> bool {
        self.iterate().eq(other.iterate())
    }
}

impl Eq for ObjectValue {}

fn descend(value: &Value, rest: &FieldPath) -> Option<Value> {
    if rest.is_empty() {
        return Some(value.clone());
    }
    match value {
        Value::Map(map) => {
            let head = rest.first_segment()?;
            let tail = rest.pop_first()?;
            map.get(head).and_then(|child| descend(child, &tail))
        }
        _ => None,
    }
}

struct MergeIter<'a> {
    base: std::iter::Peekable<im::ordmap::Iter<'a, String, Value>>,
    overlay: std::iter::Peekable<im::ordmap::Iter<'a, String, ChildState>>,
}

impl Iterator for MergeIter<'_> {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            return match (self.base.peek(), self.overlay.peek()) {
                (None, None) => None,
                (Some(_), None) => {
                    let (k, v) = self.base.next().expect("peeked Some");
                    Some((k.clone(), v.clone()))
                }
                (None, Some(_)) => match self.overlay.next().expect("peeked Some") {
                    (_, ChildState::Deleted) => continue,
                    (k, ChildState::Present(child)) => Some((k.clone(), child.to_value())),
                },
                (Some((bk, _)), Some((ok, _))) => match bk.as_str().cmp(ok.as_str()) {
                    Ordering::Less => {
                        let (k, v) = self.base.next().expect("peeked Some");
                        Some((k.clone(), v.clone()))
                    }
                    Ordering::Greater => match self.overlay.next().expect("peeked Some") {
                        (_, ChildState::Deleted) => continue,
                        (k, ChildState::Present(child)) => Some((k.clone(), child.to_value())),
                    },
                    Ordering::Equal => {
                        self.base.next();
                        match self.overlay.next().expect("peeked Some") {
                            (_, ChildState::Deleted) => continue,
                            (k, ChildState::Present(child)) => Some((k.clone(), child.to_value())),
                        }
                    }
                },
            };
        }
    }
}

///
/// FieldMask
///
/// An unordered set of leaf `FieldPath`s present in an `ObjectValue`.
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldMask {
    paths: HashSet<FieldPath>,
}

impl FieldMask {
    #[must_use]
    pub fn new(paths: Vec<FieldPath>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.paths.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.paths.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

///
/// TESTS
///
