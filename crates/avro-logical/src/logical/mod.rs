//! Logical type capability and the builtin implementations.
//!
//! A logical type names the physical kind it sits on, validates schemas that
//! declare it, and converts between domain values and base values. Builtins
//! are listed by [`Builtin`]; custom types implement [`LogicalType`] and are
//! added to a [`LogicalTypeRegistry`](crate::LogicalTypeRegistry).

pub mod date;
pub mod decimal;
pub mod time;

pub use date::DateType;
pub use decimal::{decode_decimal, encode_decimal, DecimalType, DECIMAL_SIZE};
pub use time::{TimeOfDayType, TimeUnit, TimestampType};

use std::fmt;
use std::sync::Arc;

use crate::error::LogicalTypeError;
use crate::schema::{LogicalSchema, Schema, SchemaKind};
use crate::value::{BaseValue, LogicalValue};

pub const DATE: &str = "date";
pub const TIME_MILLIS: &str = "time-millis";
pub const TIME_MICROS: &str = "time-micros";
pub const TIMESTAMP_MILLIS: &str = "timestamp-millis";
pub const TIMESTAMP_MICROS: &str = "timestamp-micros";
pub const DECIMAL: &str = "decimal";

/// Capability every logical type implements.
///
/// Implementations are stateless: a conversion depends only on its arguments.
pub trait LogicalType: fmt::Debug + Send + Sync {
    /// Registry key, as written in `logicalType`.
    fn name(&self) -> &str;

    /// Checks the physical schema this type is declared on.
    fn validate_schema(&self, _base: &Schema) -> Result<(), LogicalTypeError> {
        Ok(())
    }

    /// Domain value to the value handed to the physical encoder.
    fn convert_to_base_value(
        &self,
        value: &LogicalValue,
        schema: &LogicalSchema,
    ) -> Result<BaseValue, LogicalTypeError>;

    /// Value read by the physical decoder to its domain value.
    fn convert_to_logical_value(
        &self,
        value: &BaseValue,
        schema: &LogicalSchema,
    ) -> Result<LogicalValue, LogicalTypeError>;

    fn is_instance_of_logical_type(&self, value: &LogicalValue) -> bool;

    /// Physical schema a new field of this type should use.
    fn recommended_schema(&self) -> Schema;
}

/// The logical types every registry starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    Decimal,
}

impl Builtin {
    pub const ALL: [Builtin; 6] = [
        Builtin::Date,
        Builtin::TimeMillis,
        Builtin::TimeMicros,
        Builtin::TimestampMillis,
        Builtin::TimestampMicros,
        Builtin::Decimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Date => DATE,
            Self::TimeMillis => TIME_MILLIS,
            Self::TimeMicros => TIME_MICROS,
            Self::TimestampMillis => TIMESTAMP_MILLIS,
            Self::TimestampMicros => TIMESTAMP_MICROS,
            Self::Decimal => DECIMAL,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn implementation(self) -> Arc<dyn LogicalType> {
        match self {
            Self::Date => Arc::new(DateType),
            Self::TimeMillis => Arc::new(TimeOfDayType::new(TimeUnit::Millis)),
            Self::TimeMicros => Arc::new(TimeOfDayType::new(TimeUnit::Micros)),
            Self::TimestampMillis => Arc::new(TimestampType::new(TimeUnit::Millis)),
            Self::TimestampMicros => Arc::new(TimestampType::new(TimeUnit::Micros)),
            Self::Decimal => Arc::new(DecimalType),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) fn require_kind(
    logical: &str,
    base: &Schema,
    expected: SchemaKind,
) -> Result<(), LogicalTypeError> {
    if base.kind() == expected {
        Ok(())
    } else {
        Err(LogicalTypeError::wrong_base(logical, expected.as_str()))
    }
}
