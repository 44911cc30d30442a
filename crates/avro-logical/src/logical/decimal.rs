//! `decimal`: 128-bit decimal bits on `bytes` or `fixed`.
//!
//! The value is stored as four 32-bit words in the order `lo`, `mid`, `hi`,
//! `flags`, each written little-endian. `lo`..`hi` hold the 96-bit magnitude,
//! `flags` holds the scale in bits 16..=23 and the sign in bit 31.
//!
//! This layout is not the two's-complement unscaled integer of the Avro
//! decimal encoding. Data written here does not decode with other Avro
//! implementations, and theirs does not decode here; `precision` and `scale`
//! schema properties are carried but not used.
//!
//! A zero magnitude with the sign bit set decodes to an unsigned zero of the
//! same scale, so such input does not re-encode byte for byte.

use rust_decimal::Decimal;

use super::{LogicalType, DECIMAL};
use crate::error::LogicalTypeError;
use crate::schema::{LogicalSchema, Schema, SchemaKind};
use crate::value::{BaseValue, FixedValue, LogicalValue};

/// Encoded length of a decimal.
pub const DECIMAL_SIZE: usize = 16;

const SIGN_MASK: u32 = 0x8000_0000;
const SCALE_MASK: u32 = 0x00FF_0000;
const SCALE_SHIFT: u32 = 16;
const MAX_SCALE: u32 = 28;

/// Splits a decimal into `[lo, mid, hi, flags]`.
pub fn decimal_words(value: &Decimal) -> [u32; 4] {
    let magnitude = value.mantissa().unsigned_abs();
    let mut flags = value.scale() << SCALE_SHIFT;
    if value.is_sign_negative() {
        flags |= SIGN_MASK;
    }
    [
        magnitude as u32,
        (magnitude >> 32) as u32,
        (magnitude >> 64) as u32,
        flags,
    ]
}

/// Rebuilds a decimal from `[lo, mid, hi, flags]`.
pub fn decimal_from_words(words: [u32; 4]) -> Result<Decimal, LogicalTypeError> {
    let [lo, mid, hi, flags] = words;
    if flags & !(SIGN_MASK | SCALE_MASK) != 0 {
        return Err(LogicalTypeError::ConversionRange(format!(
            "decimal flags {flags:#010x} set reserved bits"
        )));
    }
    let scale = (flags & SCALE_MASK) >> SCALE_SHIFT;
    if scale > MAX_SCALE {
        return Err(LogicalTypeError::ConversionRange(format!(
            "decimal scale {scale} exceeds {MAX_SCALE}"
        )));
    }
    Ok(Decimal::from_parts(lo, mid, hi, flags & SIGN_MASK != 0, scale))
}

pub fn encode_decimal(value: &Decimal) -> [u8; DECIMAL_SIZE] {
    let mut out = [0u8; DECIMAL_SIZE];
    for (chunk, word) in out.chunks_exact_mut(4).zip(decimal_words(value)) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

pub fn decode_decimal(bytes: &[u8]) -> Result<Decimal, LogicalTypeError> {
    if bytes.len() != DECIMAL_SIZE {
        return Err(LogicalTypeError::ConversionRange(format!(
            "decimal needs {DECIMAL_SIZE} bytes, got {}",
            bytes.len()
        )));
    }
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    decimal_from_words(words)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalType;

impl LogicalType for DecimalType {
    fn name(&self) -> &str {
        DECIMAL
    }

    fn validate_schema(&self, base: &Schema) -> Result<(), LogicalTypeError> {
        match base.kind() {
            SchemaKind::Bytes | SchemaKind::Fixed => Ok(()),
            _ => Err(LogicalTypeError::wrong_base(DECIMAL, "bytes or fixed")),
        }
    }

    fn convert_to_base_value(
        &self,
        value: &LogicalValue,
        schema: &LogicalSchema,
    ) -> Result<BaseValue, LogicalTypeError> {
        let LogicalValue::Decimal(decimal) = value else {
            return Err(LogicalTypeError::unexpected_value(DECIMAL, value.kind()));
        };
        let bytes = encode_decimal(decimal).to_vec();
        match schema.base_schema() {
            Schema::Bytes => Ok(BaseValue::Bytes(bytes)),
            Schema::Fixed(fixed) => FixedValue::new(fixed.clone(), bytes).map(BaseValue::Fixed),
            other => Err(LogicalTypeError::wrong_base(DECIMAL, other.kind().as_str())),
        }
    }

    fn convert_to_logical_value(
        &self,
        value: &BaseValue,
        schema: &LogicalSchema,
    ) -> Result<LogicalValue, LogicalTypeError> {
        let bytes = match (schema.base_schema(), value) {
            (Schema::Bytes, BaseValue::Bytes(bytes)) => bytes.as_slice(),
            (Schema::Fixed(_), BaseValue::Fixed(fixed)) => fixed.bytes(),
            _ => {
                return Err(LogicalTypeError::unexpected_value(
                    DECIMAL,
                    value.kind().as_str(),
                ))
            }
        };
        decode_decimal(bytes).map(LogicalValue::Decimal)
    }

    fn is_instance_of_logical_type(&self, value: &LogicalValue) -> bool {
        matches!(value, LogicalValue::Decimal(_))
    }

    fn recommended_schema(&self) -> Schema {
        Schema::Bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FixedSchema, Name};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn byte_layout_matrix() {
        let one = encode_decimal(&Decimal::ONE);
        assert_eq!(one, [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let neg = encode_decimal(&dec("-1.5"));
        assert_eq!(neg, [15, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0x80]);

        let zero = encode_decimal(&Decimal::ZERO);
        assert_eq!(zero, [0u8; 16]);

        let max = encode_decimal(&Decimal::MAX);
        assert_eq!(&max[..12], &[0xFF; 12]);
        assert_eq!(&max[12..], &[0, 0, 0, 0]);

        let mid = encode_decimal(&Decimal::from(0x1_0000_0000_i64));
        assert_eq!(mid, [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let tiny = encode_decimal(&dec("0.0000000000000000000000000001"));
        assert_eq!(tiny, [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 28, 0]);
    }

    #[test]
    fn scale_is_preserved() {
        for s in ["1.10", "1.1", "0.000", "79228162514264337593543950335", "-3.1415926535"] {
            let value = dec(s);
            let back = decode_decimal(&encode_decimal(&value)).unwrap();
            assert_eq!(back, value);
            assert_eq!(back.scale(), value.scale());
            assert_eq!(back.to_string(), value.to_string());
        }
        assert_eq!(decode_decimal(&encode_decimal(&Decimal::MIN)).unwrap(), Decimal::MIN);
    }

    #[test]
    fn signed_zero_decodes_unsigned() {
        let mut negative_zero = [0u8; 16];
        negative_zero[14] = 2;
        negative_zero[15] = 0x80;
        let value = decode_decimal(&negative_zero).unwrap();
        assert_eq!(value, Decimal::new(0, 2));
        assert_eq!(value.scale(), 2);
        assert!(!value.is_sign_negative());
        assert_eq!(&encode_decimal(&value)[12..], &[0, 0, 2, 0]);
    }

    #[test]
    fn malformed_buffers_are_range_errors() {
        assert!(matches!(
            decode_decimal(&[0u8; 15]),
            Err(LogicalTypeError::ConversionRange(_))
        ));
        let mut bad_scale = [0u8; 16];
        bad_scale[14] = 29;
        assert!(matches!(
            decode_decimal(&bad_scale),
            Err(LogicalTypeError::ConversionRange(_))
        ));
        let mut reserved = [0u8; 16];
        reserved[12] = 1;
        assert!(matches!(
            decode_decimal(&reserved),
            Err(LogicalTypeError::ConversionRange(_))
        ));
    }

    #[test]
    fn bytes_and_fixed_bases() {
        let value = LogicalValue::Decimal(dec("-12.345"));

        let on_bytes = LogicalSchema::new(Schema::Bytes, DECIMAL).unwrap();
        let base = DecimalType.convert_to_base_value(&value, &on_bytes).unwrap();
        assert!(matches!(&base, BaseValue::Bytes(b) if b.len() == DECIMAL_SIZE));
        assert_eq!(DecimalType.convert_to_logical_value(&base, &on_bytes).unwrap(), value);

        let fixed = FixedSchema::new(Name::new("Dec", None, None).unwrap(), DECIMAL_SIZE);
        let on_fixed = LogicalSchema::new(Schema::Fixed(fixed.clone()), DECIMAL).unwrap();
        let base = DecimalType.convert_to_base_value(&value, &on_fixed).unwrap();
        match &base {
            BaseValue::Fixed(f) => assert_eq!(f.schema(), &fixed),
            other => panic!("expected fixed, got {other:?}"),
        }
        assert_eq!(DecimalType.convert_to_logical_value(&base, &on_fixed).unwrap(), value);

        // Base value kind must follow the schema.
        assert!(matches!(
            DecimalType.convert_to_logical_value(&base, &on_bytes),
            Err(LogicalTypeError::ConversionType(_))
        ));
    }

    #[test]
    fn undersized_fixed_fails_at_conversion() {
        let fixed = FixedSchema::new(Name::new("Small", None, None).unwrap(), 8);
        let schema = LogicalSchema::new(Schema::Fixed(fixed), DECIMAL).unwrap();
        assert!(matches!(
            DecimalType.convert_to_base_value(&LogicalValue::Decimal(Decimal::ONE), &schema),
            Err(LogicalTypeError::ConversionRange(_))
        ));
    }

    #[test]
    fn validation_accepts_bytes_and_fixed_only() {
        assert!(DecimalType.validate_schema(&Schema::Bytes).is_ok());
        let fixed = FixedSchema::new(Name::new("D", None, None).unwrap(), 16);
        assert!(DecimalType.validate_schema(&Schema::Fixed(fixed)).is_ok());
        assert_eq!(
            DecimalType.validate_schema(&Schema::Int),
            Err(LogicalTypeError::InvalidLogicalTypeSchema(
                "'decimal' can only be used with an underlying bytes or fixed type".into()
            ))
        );
    }
}
