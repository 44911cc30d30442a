//! JSON schema parsing for primitives, `fixed`, name references and logical
//! schemas.

use std::collections::HashMap;

use log::trace;
use serde_json::{Map, Value};

use super::logical::LogicalSchema;
use super::name::Name;
use super::props::{PropertyMap, LOGICAL_TYPE_KEY};
use super::{FixedSchema, Schema, SchemaKind};
use crate::error::{LogicalTypeError, SchemaError};
use crate::registry::LogicalTypeRegistry;

/// How a parser treats a `logicalType` it cannot apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalTypeMode {
    /// Unknown names and invalid combinations fail the parse.
    #[default]
    Strict,
    /// Unknown names and invalid combinations are dropped and the node is
    /// read as its base schema.
    Lenient,
}

/// Options for [`SchemaParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub logical_types: LogicalTypeMode,
}

/// Named schemas defined so far, keyed by fullname.
#[derive(Debug, Clone, Default)]
pub struct Names {
    defined: HashMap<String, Schema>,
}

impl Names {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks `name` up relative to `enclosing`, falling back to the bare name.
    pub fn get(&self, name: &str, enclosing: Option<&str>) -> Option<&Schema> {
        if !name.contains('.') {
            if let Some(ns) = enclosing.filter(|ns| !ns.is_empty()) {
                if let Some(schema) = self.defined.get(&format!("{ns}.{name}")) {
                    return Some(schema);
                }
            }
        }
        self.defined.get(name)
    }

    pub fn add(&mut self, name: &Name, schema: Schema) -> Result<(), SchemaError> {
        let fullname = name.fullname();
        if self.defined.contains_key(&fullname) {
            return Err(SchemaError::DuplicateName(fullname));
        }
        trace!("defined named schema '{fullname}'");
        self.defined.insert(fullname, schema);
        Ok(())
    }

    pub fn contains(&self, fullname: &str) -> bool {
        self.defined.contains_key(fullname)
    }

    pub fn len(&self) -> usize {
        self.defined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }
}

/// Parses schema JSON against a logical type registry.
///
/// Names defined by one call stay visible to later calls on the same parser,
/// so a schema can refer to a `fixed` parsed earlier.
#[derive(Debug)]
pub struct SchemaParser<'r> {
    registry: &'r LogicalTypeRegistry,
    options: ParseOptions,
    names: Names,
}

impl Default for SchemaParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaParser<'static> {
    /// Parser over the default registry in strict mode.
    pub fn new() -> Self {
        Self::with_registry(LogicalTypeRegistry::global())
    }
}

impl<'r> SchemaParser<'r> {
    pub fn with_registry(registry: &'r LogicalTypeRegistry) -> Self {
        Self {
            registry,
            options: ParseOptions::default(),
            names: Names::new(),
        }
    }

    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Shorthand for [`LogicalTypeMode::Lenient`].
    pub fn lenient(self) -> Self {
        self.options(ParseOptions {
            logical_types: LogicalTypeMode::Lenient,
        })
    }

    pub fn names(&self) -> &Names {
        &self.names
    }

    pub fn parse_str(&mut self, text: &str) -> Result<Schema, SchemaError> {
        let json: Value = serde_json::from_str(text)?;
        self.parse_value(&json)
    }

    pub fn parse_value(&mut self, json: &Value) -> Result<Schema, SchemaError> {
        self.parse_node(json, None)
    }

    fn parse_node(&mut self, json: &Value, enclosing: Option<&str>) -> Result<Schema, SchemaError> {
        match json {
            Value::String(type_name) => self.parse_type_name(type_name, enclosing),
            Value::Object(node) if node.contains_key(LOGICAL_TYPE_KEY) => {
                self.parse_logical(node, enclosing)
            }
            Value::Object(node) => match node.get("type") {
                Some(Value::String(t)) if t == "fixed" => {
                    self.parse_fixed(node, enclosing, PropertyMap::from_node(node))
                }
                Some(Value::String(t)) => self.parse_type_name(t, enclosing),
                Some(nested @ Value::Object(_)) => self.parse_node(nested, enclosing),
                Some(other) => Err(SchemaError::Malformed(format!(
                    "unsupported type declaration {other}"
                ))),
                None => Err(SchemaError::Malformed("no 'type' property".into())),
            },
            other => Err(SchemaError::Malformed(format!("unsupported schema {other}"))),
        }
    }

    fn parse_type_name(
        &mut self,
        type_name: &str,
        enclosing: Option<&str>,
    ) -> Result<Schema, SchemaError> {
        if let Some(schema) = SchemaKind::from_primitive(type_name).and_then(Schema::primitive) {
            return Ok(schema);
        }
        self.names
            .get(type_name, enclosing)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))
    }

    fn parse_logical(
        &mut self,
        node: &Map<String, Value>,
        enclosing: Option<&str>,
    ) -> Result<Schema, SchemaError> {
        let Some(Value::String(logical_type_name)) = node.get(LOGICAL_TYPE_KEY) else {
            return Err(LogicalTypeError::InvalidLogicalTypeSchema(format!(
                "'{LOGICAL_TYPE_KEY}' must be a string"
            ))
            .into());
        };
        let props = PropertyMap::from_node(node);
        let mode = self.options.logical_types;

        let inline_fixed = matches!(node.get("type"), Some(Value::String(t)) if t == "fixed");
        if inline_fixed {
            // `{"type": "fixed", "name": .., "size": .., "logicalType": ..}`:
            // the fixed is defined by the same node and owns no properties
            // unless the logical type is dropped.
            let fixed = Self::fixed_from_node(node, enclosing, PropertyMap::new())?;
            let name = fixed.name.clone();
            let schema = match LogicalSchema::from_parts(
                self.registry,
                mode,
                Schema::Fixed(fixed),
                logical_type_name,
                props.clone(),
            )? {
                Schema::Fixed(mut dropped) => {
                    dropped.props = props.without(LOGICAL_TYPE_KEY);
                    Schema::Fixed(dropped)
                }
                schema => schema,
            };
            // The logical type belongs to the named type, so references
            // resolve to the annotated schema.
            self.names.add(&name, schema.clone())?;
            return Ok(schema);
        }

        let base = match node.get("type") {
            Some(type_json) => self.parse_node(type_json, enclosing)?,
            None => {
                return Err(LogicalTypeError::InvalidLogicalTypeSchema(format!(
                    "'{logical_type_name}' is declared without a 'type'"
                ))
                .into())
            }
        };
        LogicalSchema::from_parts(self.registry, mode, base, logical_type_name, props)
    }

    fn parse_fixed(
        &mut self,
        node: &Map<String, Value>,
        enclosing: Option<&str>,
        props: PropertyMap,
    ) -> Result<Schema, SchemaError> {
        let fixed = Self::fixed_from_node(node, enclosing, props)?;
        let name = fixed.name.clone();
        let schema = Schema::Fixed(fixed);
        self.names.add(&name, schema.clone())?;
        Ok(schema)
    }

    fn fixed_from_node(
        node: &Map<String, Value>,
        enclosing: Option<&str>,
        props: PropertyMap,
    ) -> Result<FixedSchema, SchemaError> {
        let Some(Value::String(short)) = node.get("name") else {
            return Err(SchemaError::Malformed("fixed without a string 'name'".into()));
        };
        let namespace = match node.get("namespace") {
            None | Some(Value::Null) => None,
            Some(Value::String(ns)) => Some(ns.as_str()),
            Some(other) => {
                return Err(SchemaError::Malformed(format!("namespace {other} is not a string")))
            }
        };
        let name = Name::new(short, namespace, enclosing)?;

        let size = node
            .get("size")
            .and_then(Value::as_u64)
            .and_then(|size| usize::try_from(size).ok())
            .ok_or_else(|| {
                SchemaError::Malformed(format!("fixed '{name}' needs a non-negative 'size'"))
            })?;

        let aliases = match node.get("aliases") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(alias) => Name::new(alias, None, name.namespace.as_deref()),
                    other => Err(SchemaError::Malformed(format!("alias {other} is not a string"))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(SchemaError::Malformed(format!("aliases {other} is not an array")))
            }
        };

        Ok(FixedSchema {
            name,
            aliases,
            size,
            props,
        })
    }
}
