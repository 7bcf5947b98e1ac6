//! Per-instance attribute tree.
//!
//! An [`AttributeTree`] mirrors the declared schema of one resource instance
//! for the duration of a single create/read/update/delete call. Besides the
//! attributes it holds a singular identifier slot.
//!
//! Every top-level key has a tri-state presence: explicitly set, using the
//! schema default, or absent. Extraction only trusts keys that were set or
//! whose default is non-zero, so optional fields are never invented.

use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a top-level attribute came to have its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Written by the user configuration or by populate
    Set,
    /// Filled in from the schema default
    Default,
}

/// Result of looking up a top-level key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Set(&'a Value),
    Default(&'a Value),
    Absent,
}

impl<'a> Lookup<'a> {
    /// The value, if it is trustworthy for extraction.
    ///
    /// Explicitly set values always count; defaults only when non-zero.
    pub fn explicit(self) -> Option<&'a Value> {
        match self {
            Lookup::Set(value) => Some(value),
            Lookup::Default(value) if !value.is_zero() => Some(value),
            Lookup::Default(_) | Lookup::Absent => None,
        }
    }

    /// The value regardless of how it got there.
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Lookup::Set(value) | Lookup::Default(value) => Some(value),
            Lookup::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Lookup::Absent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    value: Value,
    presence: Presence,
}

/// Dynamic attribute tree for one resource instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTree {
    id: Option<String>,
    attributes: BTreeMap<String, Slot>,
}

impl AttributeTree {
    /// Create an empty tree with no identifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from explicitly set attributes and schema defaults.
    ///
    /// A key present in both is considered explicitly set.
    pub fn from_parts(id: Option<String>, set: Map, defaults: Map) -> Self {
        let mut tree = Self {
            id: id.filter(|id| !id.is_empty()),
            attributes: BTreeMap::new(),
        };
        for (key, value) in defaults {
            tree.set_default(key, value);
        }
        for (key, value) in set {
            tree.set(key, value);
        }
        tree
    }

    /// Split the tree back into `(id, set, defaults)`.
    pub fn into_parts(self) -> (Option<String>, Map, Map) {
        let mut set = Map::new();
        let mut defaults = Map::new();
        for (key, slot) in self.attributes {
            match slot.presence {
                Presence::Set => set.insert(key, slot.value),
                Presence::Default => defaults.insert(key, slot.value),
            };
        }
        (self.id, set, defaults)
    }

    // =========================================================================
    // Identifier
    // =========================================================================

    /// The resource identifier, if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Assign the resource identifier. An empty string clears it.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = if id.is_empty() { None } else { Some(id) };
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Look up a top-level key along with its presence.
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        match self.attributes.get(key) {
            Some(Slot {
                value,
                presence: Presence::Set,
            }) => Lookup::Set(value),
            Some(Slot {
                value,
                presence: Presence::Default,
            }) => Lookup::Default(value),
            None => Lookup::Absent,
        }
    }

    /// Get a value regardless of presence.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.lookup(key).value()
    }

    /// Get a value only if it was set or has a non-zero default.
    pub fn get_explicit(&self, key: &str) -> Option<&Value> {
        self.lookup(key).explicit()
    }

    /// Presence of a key, `None` when absent.
    pub fn presence(&self, key: &str) -> Option<Presence> {
        self.attributes.get(key).map(|slot| slot.presence)
    }

    /// Write a value, marking it explicitly set.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(
            key.into(),
            Slot {
                value: value.into(),
                presence: Presence::Set,
            },
        );
    }

    /// Record a schema default. Never downgrades an explicitly set key.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if self.presence(&key) == Some(Presence::Set) {
            return;
        }
        self.attributes.insert(
            key,
            Slot {
                value: value.into(),
                presence: Presence::Default,
            },
        );
    }

    /// Remove a key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key).map(|slot| slot.value)
    }

    /// Ordered elements of a list attribute (repeated blocks).
    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_list)
    }

    /// Sub-maps of a repeated block attribute, in order.
    ///
    /// Elements that are not maps are skipped; use the coercion engine when a
    /// malformed element must be an error.
    pub fn blocks(&self, key: &str) -> impl Iterator<Item = &Map> {
        self.get_list(key)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_map)
    }

    /// A free-form map attribute.
    pub fn get_map(&self, key: &str) -> Option<&Map> {
        self.get(key).and_then(Value::as_map)
    }

    /// Iterate over `(key, value, presence)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value, Presence)> {
        self.attributes
            .iter()
            .map(|(key, slot)| (key.as_str(), &slot.value, slot.presence))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
