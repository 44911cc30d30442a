//! `date`: days since the Unix epoch, on `int`.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use super::{require_kind, LogicalType, DATE};
use crate::error::LogicalTypeError;
use crate::schema::{LogicalSchema, Schema, SchemaKind};
use crate::value::{BaseValue, LogicalValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

fn epoch_date() -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive()
}

impl DateType {
    /// Calendar date of a domain value; instants use the date in their own
    /// offset and drop the time of day.
    fn calendar_date(value: &LogicalValue) -> Option<NaiveDate> {
        match value {
            LogicalValue::Date(date) => Some(*date),
            LogicalValue::Timestamp(instant) => Some(instant.date_naive()),
            LogicalValue::ZonedTimestamp(instant) => Some(instant.date_naive()),
            _ => None,
        }
    }
}

impl LogicalType for DateType {
    fn name(&self) -> &str {
        DATE
    }

    fn validate_schema(&self, base: &Schema) -> Result<(), LogicalTypeError> {
        require_kind(DATE, base, SchemaKind::Int)
    }

    fn convert_to_base_value(
        &self,
        value: &LogicalValue,
        _schema: &LogicalSchema,
    ) -> Result<BaseValue, LogicalTypeError> {
        let date = Self::calendar_date(value)
            .ok_or_else(|| LogicalTypeError::unexpected_value(DATE, value.kind()))?;
        let days = date.signed_duration_since(epoch_date()).num_days();
        let days = i32::try_from(days).map_err(|_| {
            LogicalTypeError::ConversionRange(format!("{date} is {days} days from the epoch"))
        })?;
        Ok(BaseValue::Int(days))
    }

    fn convert_to_logical_value(
        &self,
        value: &BaseValue,
        _schema: &LogicalSchema,
    ) -> Result<LogicalValue, LogicalTypeError> {
        let BaseValue::Int(days) = value else {
            return Err(LogicalTypeError::unexpected_value(DATE, value.kind().as_str()));
        };
        epoch_date()
            .checked_add_signed(TimeDelta::days(i64::from(*days)))
            .map(LogicalValue::Date)
            .ok_or_else(|| {
                LogicalTypeError::ConversionRange(format!("{days} days from the epoch"))
            })
    }

    fn is_instance_of_logical_type(&self, value: &LogicalValue) -> bool {
        Self::calendar_date(value).is_some()
    }

    fn recommended_schema(&self) -> Schema {
        Schema::Int
    }
}
