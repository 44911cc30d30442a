//! Physical schema nodes and the logical schema wrapper.
//!
//! Only the node kinds a logical type can sit on are modelled: the primitive
//! types, `fixed`, and logical schemas themselves.
//!
//! Reference: Apache Avro 1.12.0 specification, "Logical Types"

pub mod logical;
pub mod name;
pub mod parser;
pub mod props;

pub use logical::LogicalSchema;
pub use name::Name;
pub use parser::{LogicalTypeMode, Names, ParseOptions, SchemaParser};
pub use props::{PropertyMap, LOGICAL_TYPE_KEY, RESERVED_KEYS};

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Tag of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Fixed,
    Logical,
}

impl SchemaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Fixed => "fixed",
            Self::Logical => "logical",
        }
    }

    /// Maps a primitive type name to its kind.
    pub fn from_primitive(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "bytes" => Some(Self::Bytes),
            "string" => Some(Self::String),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `fixed` schema: a named byte array of constant size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedSchema {
    pub name: Name,
    pub aliases: Vec<Name>,
    pub size: usize,
    pub props: PropertyMap,
}

impl FixedSchema {
    pub fn new(name: Name, size: usize) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            size,
            props: PropertyMap::new(),
        }
    }

    /// The writer must carry the same fullname (or one of our aliases) and size.
    pub fn can_read(&self, writer: &FixedSchema) -> bool {
        let name_matches = self.name == writer.name || self.aliases.contains(&writer.name);
        name_matches && self.size == writer.size
    }

    fn write_json(&self, written: &mut HashSet<String>) -> Value {
        let fullname = self.name.fullname();
        if !written.insert(fullname.clone()) {
            return Value::String(fullname);
        }
        let mut out = Map::new();
        out.insert("type".into(), Value::String("fixed".into()));
        out.insert("name".into(), Value::String(self.name.name.clone()));
        if let Some(ns) = &self.name.namespace {
            out.insert("namespace".into(), Value::String(ns.clone()));
        }
        if !self.aliases.is_empty() {
            let aliases = self
                .aliases
                .iter()
                .map(|alias| Value::String(alias.fullname()))
                .collect();
            out.insert("aliases".into(), Value::Array(aliases));
        }
        out.insert("size".into(), Value::from(self.size));
        self.props.write_into(&mut out, &[]);
        Value::Object(out)
    }
}

/// A schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Fixed(FixedSchema),
    Logical(LogicalSchema),
}

impl Schema {
    /// Parses schema JSON text with the default registry in strict mode.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        SchemaParser::new().parse_str(text)
    }

    /// Parses an already decoded JSON schema with the default registry in
    /// strict mode.
    pub fn parse_value(json: &Value) -> Result<Self, SchemaError> {
        SchemaParser::new().parse_value(json)
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Null => SchemaKind::Null,
            Self::Boolean => SchemaKind::Boolean,
            Self::Int => SchemaKind::Int,
            Self::Long => SchemaKind::Long,
            Self::Float => SchemaKind::Float,
            Self::Double => SchemaKind::Double,
            Self::Bytes => SchemaKind::Bytes,
            Self::String => SchemaKind::String,
            Self::Fixed(_) => SchemaKind::Fixed,
            Self::Logical(_) => SchemaKind::Logical,
        }
    }

    pub(crate) fn primitive(kind: SchemaKind) -> Option<Self> {
        match kind {
            SchemaKind::Null => Some(Self::Null),
            SchemaKind::Boolean => Some(Self::Boolean),
            SchemaKind::Int => Some(Self::Int),
            SchemaKind::Long => Some(Self::Long),
            SchemaKind::Float => Some(Self::Float),
            SchemaKind::Double => Some(Self::Double),
            SchemaKind::Bytes => Some(Self::Bytes),
            SchemaKind::String => Some(Self::String),
            SchemaKind::Fixed | SchemaKind::Logical => None,
        }
    }

    pub fn as_logical(&self) -> Option<&LogicalSchema> {
        match self {
            Self::Logical(schema) => Some(schema),
            _ => None,
        }
    }

    /// Whether data written with `writer` can be read with this schema.
    pub fn can_read(&self, writer: &Schema) -> bool {
        match (self, writer) {
            (Self::Logical(reader), _) => reader.can_read(writer),
            (Self::Fixed(reader), Self::Fixed(writer)) => reader.can_read(writer),
            (Self::Fixed(_), _) | (_, Self::Fixed(_)) | (_, Self::Logical(_)) => false,
            (reader, writer) if reader.kind() == writer.kind() => true,
            (Self::Long, Self::Int)
            | (Self::Float, Self::Int | Self::Long)
            | (Self::Double, Self::Int | Self::Long | Self::Float)
            | (Self::String, Self::Bytes)
            | (Self::Bytes, Self::String) => true,
            _ => false,
        }
    }

    /// Canonical JSON form. Named schemas are defined on first occurrence and
    /// referenced by fullname afterwards.
    pub fn to_json(&self) -> Value {
        self.write_json(&mut HashSet::new())
    }

    pub(crate) fn write_json(&self, written: &mut HashSet<String>) -> Value {
        match self {
            Self::Fixed(fixed) => fixed.write_json(written),
            Self::Logical(logical) => logical.write_json(written),
            primitive => Value::String(primitive.kind().as_str().to_string()),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
