//! Schema node pairing a physical schema with a resolved logical type.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::props::{PropertyMap, LOGICAL_TYPE_KEY};
use super::{LogicalTypeMode, Schema};
use crate::error::{LogicalTypeError, SchemaError};
use crate::logical::LogicalType;
use crate::registry::LogicalTypeRegistry;
use crate::value::{BaseValue, LogicalValue};

/// A physical schema annotated with a logical type.
///
/// A value of this type always holds a logical type that was found in a
/// registry and validated against the base schema.
#[derive(Debug, Clone)]
pub struct LogicalSchema {
    base: Box<Schema>,
    logical_type_name: String,
    props: PropertyMap,
    logical_type: Arc<dyn LogicalType>,
}

impl LogicalSchema {
    /// Wraps `base` with `logical_type_name` using the default registry.
    pub fn new(base: Schema, logical_type_name: &str) -> Result<Self, LogicalTypeError> {
        Self::new_in(LogicalTypeRegistry::global(), base, logical_type_name)
    }

    /// Wraps `base` with `logical_type_name` resolved in `registry`.
    pub fn new_in(
        registry: &LogicalTypeRegistry,
        base: Schema,
        logical_type_name: &str,
    ) -> Result<Self, LogicalTypeError> {
        let mut props = PropertyMap::new();
        props.set_logical_type(logical_type_name);
        let logical_type = registry.resolve(logical_type_name, &base)?;
        Ok(Self {
            base: Box::new(base),
            logical_type_name: logical_type_name.to_string(),
            props,
            logical_type,
        })
    }

    /// Builds the node for a parsed schema. In lenient mode an unknown or
    /// invalid logical type leaves the bare base schema.
    pub(crate) fn from_parts(
        registry: &LogicalTypeRegistry,
        mode: LogicalTypeMode,
        base: Schema,
        logical_type_name: &str,
        mut props: PropertyMap,
    ) -> Result<Schema, SchemaError> {
        let ignore = mode == LogicalTypeMode::Lenient;
        let Some(logical_type) = registry.resolve_with(logical_type_name, &base, ignore)? else {
            return Ok(base);
        };
        props.set_logical_type(logical_type_name);
        Ok(Schema::Logical(Self {
            base: Box::new(base),
            logical_type_name: logical_type_name.to_string(),
            props,
            logical_type,
        }))
    }

    pub fn base_schema(&self) -> &Schema {
        &self.base
    }

    pub fn logical_type_name(&self) -> &str {
        &self.logical_type_name
    }

    pub fn logical_type(&self) -> &dyn LogicalType {
        self.logical_type.as_ref()
    }

    /// Properties of the node, `logicalType` included.
    pub fn props(&self) -> &PropertyMap {
        &self.props
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn add_property(&mut self, key: impl Into<String>, value: Value) -> Result<(), SchemaError> {
        self.props.add(key, value)
    }

    /// Both sides must be logical schemas over compatible base schemas. The
    /// logical type names are not compared.
    pub fn can_read(&self, writer: &Schema) -> bool {
        match writer {
            Schema::Logical(writer) => self.base.can_read(&writer.base),
            _ => false,
        }
    }

    /// Converts a domain value for the physical encoder.
    pub fn to_base_value(&self, value: &LogicalValue) -> Result<BaseValue, LogicalTypeError> {
        self.logical_type.convert_to_base_value(value, self)
    }

    /// Converts a value from the physical decoder to its domain value.
    pub fn to_logical_value(&self, value: &BaseValue) -> Result<LogicalValue, LogicalTypeError> {
        self.logical_type.convert_to_logical_value(value, self)
    }

    pub(crate) fn write_json(&self, written: &mut HashSet<String>) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), self.base.write_json(written));
        out.insert(
            LOGICAL_TYPE_KEY.into(),
            Value::String(self.logical_type_name.clone()),
        );
        self.props.write_into(&mut out, &[LOGICAL_TYPE_KEY]);
        Value::Object(out)
    }
}

impl PartialEq for LogicalSchema {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.props == other.props
    }
}

impl Eq for LogicalSchema {}

impl Hash for LogicalSchema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.props.hash(state);
    }
}
