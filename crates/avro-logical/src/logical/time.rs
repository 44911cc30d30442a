//! `time-millis`, `time-micros`, `timestamp-millis` and `timestamp-micros`.
//!
//! Times of day count units since midnight and must stay within one day.
//! Timestamps count units since 1970-01-01T00:00:00Z and always decode to UTC.

use chrono::{DateTime, TimeDelta, Utc};

use super::{
    require_kind, LogicalType, TIMESTAMP_MICROS, TIMESTAMP_MILLIS, TIME_MICROS, TIME_MILLIS,
};
use crate::error::LogicalTypeError;
use crate::schema::{LogicalSchema, Schema, SchemaKind};
use crate::value::{BaseValue, LogicalValue};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// Granularity of an epoch-relative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millis,
    Micros,
}

impl TimeUnit {
    pub fn per_second(self) -> i64 {
        match self {
            Self::Millis => 1_000,
            Self::Micros => 1_000_000,
        }
    }

    pub fn per_day(self) -> i64 {
        self.per_second() * SECONDS_PER_DAY
    }

    fn nanos_per_unit(self) -> i64 {
        NANOS_PER_SECOND / self.per_second()
    }

    /// Whole units in `delta`, truncated.
    fn count(self, delta: TimeDelta) -> Option<i64> {
        match self {
            Self::Millis => Some(delta.num_milliseconds()),
            Self::Micros => delta.num_microseconds(),
        }
    }

    fn delta(self, count: i64) -> TimeDelta {
        match self {
            Self::Millis => TimeDelta::milliseconds(count),
            Self::Micros => TimeDelta::microseconds(count),
        }
    }
}

/// Time of day as a count of units since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDayType {
    unit: TimeUnit,
}

impl TimeOfDayType {
    pub fn new(unit: TimeUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    fn physical_kind(&self) -> SchemaKind {
        match self.unit {
            TimeUnit::Millis => SchemaKind::Int,
            TimeUnit::Micros => SchemaKind::Long,
        }
    }

    fn out_of_day(&self, what: impl std::fmt::Display) -> LogicalTypeError {
        LogicalTypeError::ConversionRange(format!(
            "'{}' value {what} is outside a single day",
            self.name()
        ))
    }
}

impl LogicalType for TimeOfDayType {
    fn name(&self) -> &str {
        match self.unit {
            TimeUnit::Millis => TIME_MILLIS,
            TimeUnit::Micros => TIME_MICROS,
        }
    }

    fn validate_schema(&self, base: &Schema) -> Result<(), LogicalTypeError> {
        require_kind(self.name(), base, self.physical_kind())
    }

    fn convert_to_base_value(
        &self,
        value: &LogicalValue,
        _schema: &LogicalSchema,
    ) -> Result<BaseValue, LogicalTypeError> {
        let LogicalValue::TimeOfDay(time) = value else {
            return Err(LogicalTypeError::unexpected_value(self.name(), value.kind()));
        };
        if *time < TimeDelta::zero() || *time >= TimeDelta::days(1) {
            return Err(self.out_of_day(time));
        }
        let count = self.unit.count(*time).ok_or_else(|| self.out_of_day(time))?;
        match self.unit {
            TimeUnit::Millis => i32::try_from(count)
                .map(BaseValue::Int)
                .map_err(|_| self.out_of_day(count)),
            TimeUnit::Micros => Ok(BaseValue::Long(count)),
        }
    }

    fn convert_to_logical_value(
        &self,
        value: &BaseValue,
        _schema: &LogicalSchema,
    ) -> Result<LogicalValue, LogicalTypeError> {
        let count = match (self.unit, value) {
            (TimeUnit::Millis, BaseValue::Int(n)) => i64::from(*n),
            (TimeUnit::Micros, BaseValue::Long(n)) => *n,
            _ => {
                return Err(LogicalTypeError::unexpected_value(
                    self.name(),
                    value.kind().as_str(),
                ))
            }
        };
        if !(0..self.unit.per_day()).contains(&count) {
            return Err(self.out_of_day(count));
        }
        Ok(LogicalValue::TimeOfDay(self.unit.delta(count)))
    }

    fn is_instance_of_logical_type(&self, value: &LogicalValue) -> bool {
        matches!(value, LogicalValue::TimeOfDay(_))
    }

    fn recommended_schema(&self) -> Schema {
        match self.unit {
            TimeUnit::Millis => Schema::Int,
            TimeUnit::Micros => Schema::Long,
        }
    }
}

/// Instant as a count of units since the Unix epoch, on `long`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampType {
    unit: TimeUnit,
}

impl TimestampType {
    pub fn new(unit: TimeUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    fn instant(value: &LogicalValue) -> Option<DateTime<Utc>> {
        match value {
            LogicalValue::Timestamp(instant) => Some(*instant),
            LogicalValue::ZonedTimestamp(instant) => Some(instant.with_timezone(&Utc)),
            _ => None,
        }
    }
}

impl LogicalType for TimestampType {
    fn name(&self) -> &str {
        match self.unit {
            TimeUnit::Millis => TIMESTAMP_MILLIS,
            TimeUnit::Micros => TIMESTAMP_MICROS,
        }
    }

    fn validate_schema(&self, base: &Schema) -> Result<(), LogicalTypeError> {
        require_kind(self.name(), base, SchemaKind::Long)
    }

    fn convert_to_base_value(
        &self,
        value: &LogicalValue,
        _schema: &LogicalSchema,
    ) -> Result<BaseValue, LogicalTypeError> {
        let instant = Self::instant(value)
            .ok_or_else(|| LogicalTypeError::unexpected_value(self.name(), value.kind()))?;
        let count = match self.unit {
            TimeUnit::Millis => instant.timestamp_millis(),
            TimeUnit::Micros => instant.timestamp_micros(),
        };
        Ok(BaseValue::Long(count))
    }

    fn convert_to_logical_value(
        &self,
        value: &BaseValue,
        _schema: &LogicalSchema,
    ) -> Result<LogicalValue, LogicalTypeError> {
        let BaseValue::Long(count) = value else {
            return Err(LogicalTypeError::unexpected_value(
                self.name(),
                value.kind().as_str(),
            ));
        };
        let per_second = self.unit.per_second();
        let secs = count.div_euclid(per_second);
        let nanos = count.rem_euclid(per_second) * self.unit.nanos_per_unit();
        u32::try_from(nanos)
            .ok()
            .and_then(|nanos| DateTime::from_timestamp(secs, nanos))
            .map(LogicalValue::Timestamp)
            .ok_or_else(|| {
                LogicalTypeError::ConversionRange(format!(
                    "'{}' value {count} is outside the representable instants",
                    self.name()
                ))
            })
    }

    fn is_instance_of_logical_type(&self, value: &LogicalValue) -> bool {
        Self::instant(value).is_some()
    }

    fn recommended_schema(&self) -> Schema {
        Schema::Long
    }
}
