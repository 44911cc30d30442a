//! Physical (base) values and logical (domain) values.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use rust_decimal::Decimal;

use crate::error::LogicalTypeError;
use crate::schema::{FixedSchema, SchemaKind};

/// A value as handed to, or received from, the physical encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseValue {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    String(String),
    Fixed(FixedValue),
}

impl BaseValue {
    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Null => SchemaKind::Null,
            Self::Boolean(_) => SchemaKind::Boolean,
            Self::Int(_) => SchemaKind::Int,
            Self::Long(_) => SchemaKind::Long,
            Self::Float(_) => SchemaKind::Float,
            Self::Double(_) => SchemaKind::Double,
            Self::Bytes(_) => SchemaKind::Bytes,
            Self::String(_) => SchemaKind::String,
            Self::Fixed(_) => SchemaKind::Fixed,
        }
    }
}

/// Bytes of a `fixed` value, always exactly `schema.size` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedValue {
    schema: FixedSchema,
    bytes: Vec<u8>,
}

impl FixedValue {
    pub fn new(schema: FixedSchema, bytes: Vec<u8>) -> Result<Self, LogicalTypeError> {
        if bytes.len() != schema.size {
            return Err(LogicalTypeError::ConversionRange(format!(
                "fixed '{}' holds {} bytes, got {}",
                schema.name,
                schema.size,
                bytes.len()
            )));
        }
        Ok(Self { schema, bytes })
    }

    pub fn schema(&self) -> &FixedSchema {
        &self.schema
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A value as seen by application code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalValue {
    /// Calendar date without time of day.
    Date(NaiveDate),
    /// Duration since midnight.
    TimeOfDay(TimeDelta),
    /// Instant in UTC.
    Timestamp(DateTime<Utc>),
    /// Instant carrying the offset it was observed in.
    ZonedTimestamp(DateTime<FixedOffset>),
    Decimal(Decimal),
}

impl LogicalValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Date(_) => "date",
            Self::TimeOfDay(_) => "time of day",
            Self::Timestamp(_) => "timestamp",
            Self::ZonedTimestamp(_) => "zoned timestamp",
            Self::Decimal(_) => "decimal",
        }
    }
}

impl From<NaiveDate> for LogicalValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<TimeDelta> for LogicalValue {
    fn from(value: TimeDelta) -> Self {
        Self::TimeOfDay(value)
    }
}

impl From<DateTime<Utc>> for LogicalValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<DateTime<FixedOffset>> for LogicalValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::ZonedTimestamp(value)
    }
}

impl From<Decimal> for LogicalValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}
