//! Opaque schema properties.
//!
//! Keys the schema grammar itself interprets are reserved and never land in a
//! property bag. `logicalType` is kept in the bag of a logical schema so that
//! comparing bags also compares the logical type name.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Property holding the logical type name.
pub const LOGICAL_TYPE_KEY: &str = "logicalType";

/// Keys interpreted by the schema grammar.
pub const RESERVED_KEYS: &[&str] = &[
    "type",
    "name",
    "namespace",
    "fields",
    "items",
    "size",
    "symbols",
    "values",
    "aliases",
    "order",
    "doc",
    "default",
];

/// Insertion-ordered property bag. Equality and hashing ignore order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Map<String, Value>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every non-reserved key of a schema node, in document order.
    pub(crate) fn from_node(node: &Map<String, Value>) -> Self {
        let entries = node
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self { entries }
    }

    pub(crate) fn without(&self, key: &str) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { entries }
    }

    pub(crate) fn set_logical_type(&mut self, name: &str) {
        self.entries
            .insert(LOGICAL_TYPE_KEY.to_string(), Value::String(name.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Adds a property.
    ///
    /// Reserved keys and `logicalType` are rejected, as is a second, different
    /// value for a key already present. Re-adding an identical value is a no-op.
    pub fn add(&mut self, key: impl Into<String>, value: Value) -> Result<(), SchemaError> {
        let key = key.into();
        if key == LOGICAL_TYPE_KEY || RESERVED_KEYS.contains(&key.as_str()) {
            return Err(SchemaError::Property(key));
        }
        match self.entries.get(&key) {
            Some(existing) if *existing == value => Ok(()),
            Some(_) => Err(SchemaError::Property(key)),
            None => {
                self.entries.insert(key, value);
                Ok(())
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends every entry not listed in `skip` to a JSON object being emitted.
    pub(crate) fn write_into(&self, out: &mut Map<String, Value>, skip: &[&str]) {
        for (key, value) in &self.entries {
            if !skip.contains(&key.as_str()) {
                out.insert(key.clone(), value.clone());
            }
        }
    }
}

impl Hash for PropertyMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.len().hash(state);
        let combined = self
            .entries
            .iter()
            .fold(0u64, |acc, (key, value)| acc.wrapping_add(entry_hash(key, value)));
        combined.hash(state);
    }
}

fn entry_hash(key: &str, value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    value_hash(value).hash(&mut hasher);
    hasher.finish()
}

// Objects hash order-independently to agree with `Map` equality.
fn value_hash(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    match value {
        Value::Null => 0u8.hash(&mut hasher),
        Value::Bool(b) => {
            1u8.hash(&mut hasher);
            b.hash(&mut hasher);
        }
        Value::Number(n) => {
            2u8.hash(&mut hasher);
            n.to_string().hash(&mut hasher);
        }
        Value::String(s) => {
            3u8.hash(&mut hasher);
            s.hash(&mut hasher);
        }
        Value::Array(items) => {
            4u8.hash(&mut hasher);
            items.len().hash(&mut hasher);
            for item in items {
                value_hash(item).hash(&mut hasher);
            }
        }
        Value::Object(map) => {
            5u8.hash(&mut hasher);
            map.len().hash(&mut hasher);
            let combined = map
                .iter()
                .fold(0u64, |acc, (k, v)| acc.wrapping_add(entry_hash(k, v)));
            combined.hash(&mut hasher);
        }
    }
    hasher.finish()
}
