//! Error types for schema parsing and logical-type resolution/conversion.

use thiserror::Error;

/// Errors raised by logical-type resolution, validation and conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogicalTypeError {
    /// The logical type name is not bound in the registry.
    #[error("logical type '{0}' is not supported")]
    UnsupportedLogicalType(String),
    /// The logical type is known but the schema declaring it is malformed or
    /// sits on the wrong physical kind.
    #[error("invalid logical type schema: {0}")]
    InvalidLogicalTypeSchema(String),
    /// The value cannot be represented by the target encoding.
    #[error("value out of range: {0}")]
    ConversionRange(String),
    /// The value is not of the kind the logical type converts.
    #[error("value type mismatch: {0}")]
    ConversionType(String),
    /// A second implementation was offered for an already bound name.
    #[error("logical type '{0}' is already registered")]
    AlreadyRegistered(String),
}

impl LogicalTypeError {
    pub(crate) fn wrong_base(logical: &str, expected: &str) -> Self {
        Self::InvalidLogicalTypeSchema(format!(
            "'{logical}' can only be used with an underlying {expected} type"
        ))
    }

    pub(crate) fn unexpected_value(logical: &str, found: &str) -> Self {
        Self::ConversionType(format!("'{logical}' cannot convert a {found} value"))
    }
}

/// Errors raised while parsing or editing a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("undefined name: {0}")]
    UnknownType(String),
    #[error("name already defined: {0}")]
    DuplicateName(String),
    #[error("malformed schema: {0}")]
    Malformed(String),
    #[error("cannot set property '{0}'")]
    Property(String),
    #[error(transparent)]
    LogicalType(#[from] LogicalTypeError),
}

impl SchemaError {
    /// The logical-type error behind this schema error, if any.
    pub fn as_logical_type(&self) -> Option<&LogicalTypeError> {
        match self {
            Self::LogicalType(err) => Some(err),
            _ => None,
        }
    }
}
