//! Avro logical types layered on physical schemas.
//!
//! A logical type annotates a primitive or `fixed` schema and converts
//! between a domain value and the value the physical encoder handles.
//!
//! # Overview
//!
//! - [`LogicalType`] - capability every logical type implements
//! - [`LogicalTypeRegistry`] - name → implementation bindings, with the
//!   builtin `date`, `time-millis`, `time-micros`, `timestamp-millis`,
//!   `timestamp-micros` and `decimal`
//! - [`LogicalSchema`] - a base schema plus its resolved logical type
//! - [`SchemaParser`] - JSON schema parsing in strict or lenient mode
//!
//! # Example
//!
//! ```
//! use avro_logical::{BaseValue, LogicalValue, Schema};
//! use chrono::NaiveDate;
//!
//! let schema = Schema::parse(r#"{"type": "int", "logicalType": "date"}"#).unwrap();
//! let logical = schema.as_logical().unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2019, 5, 5).unwrap();
//! let base = logical.to_base_value(&LogicalValue::Date(date)).unwrap();
//! assert_eq!(base, BaseValue::Int(18021));
//! assert_eq!(logical.to_logical_value(&base).unwrap(), LogicalValue::Date(date));
//! ```
//!
//! The `decimal` encoding is specific to this crate; see [`logical::decimal`].

pub mod error;
pub mod logical;
pub mod registry;
pub mod schema;
pub mod value;

pub use error::{LogicalTypeError, SchemaError};
pub use logical::{
    Builtin, DateType, DecimalType, LogicalType, TimeOfDayType, TimeUnit, TimestampType,
};
pub use registry::LogicalTypeRegistry;
pub use schema::{
    FixedSchema, LogicalSchema, LogicalTypeMode, Name, ParseOptions, PropertyMap, Schema,
    SchemaKind, SchemaParser,
};
pub use value::{BaseValue, FixedValue, LogicalValue};
