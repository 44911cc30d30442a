use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use avro_logical::{
    FixedSchema, LogicalSchema, LogicalTypeError, LogicalTypeMode, Name, ParseOptions, Schema,
    SchemaError, SchemaParser,
};
use serde_json::json;

fn hash_of(schema: &Schema) -> u64 {
    let mut hasher = DefaultHasher::new();
    schema.hash(&mut hasher);
    hasher.finish()
}

fn lenient() -> SchemaParser<'static> {
    SchemaParser::new().options(ParseOptions {
        logical_types: LogicalTypeMode::Lenient,
    })
}

#[test]
fn emission_round_trip_matrix() {
    let cases = [
        r#"{"type":"int","logicalType":"date"}"#,
        r#"{"type":"int","logicalType":"time-millis"}"#,
        r#"{"type":"long","logicalType":"time-micros"}"#,
        r#"{"type":"long","logicalType":"timestamp-millis"}"#,
        r#"{"type":"long","logicalType":"timestamp-micros"}"#,
        r#"{"type":"bytes","logicalType":"decimal","precision":9,"scale":2}"#,
        r#"{"type":{"type":"fixed","name":"Money","namespace":"org.acme","size":16},"logicalType":"decimal","precision":28}"#,
    ];
    for text in cases {
        let schema = Schema::parse(text).unwrap();
        assert_eq!(schema.to_string(), text);
        assert_eq!(Schema::parse(&schema.to_string()).unwrap(), schema);
    }
}

#[test]
fn inline_fixed_emits_nested_definition() {
    let schema = Schema::parse(
        r#"{"type":"fixed","name":"Money","namespace":"org.acme","size":16,"logicalType":"decimal","scale":2}"#,
    )
    .unwrap();
    assert_eq!(
        schema.to_json(),
        json!({
            "type": {"type": "fixed", "name": "Money", "namespace": "org.acme", "size": 16},
            "logicalType": "decimal",
            "scale": 2
        })
    );
    assert_eq!(Schema::parse(&schema.to_string()).unwrap(), schema);
}

#[test]
fn strict_mode_fails_fast() {
    let err = Schema::parse(r#"{"type":"int","logicalType":"decimal"}"#).unwrap_err();
    assert_eq!(
        err.as_logical_type(),
        Some(&LogicalTypeError::InvalidLogicalTypeSchema(
            "'decimal' can only be used with an underlying bytes or fixed type".into()
        ))
    );

    let err = Schema::parse(r#"{"type":"string","logicalType":"uuid"}"#).unwrap_err();
    assert_eq!(
        err.as_logical_type(),
        Some(&LogicalTypeError::UnsupportedLogicalType("uuid".into()))
    );

    for text in [
        r#"{"type":"long","logicalType":"date"}"#,
        r#"{"type":"long","logicalType":"time-millis"}"#,
        r#"{"type":"int","logicalType":"time-micros"}"#,
        r#"{"type":"int","logicalType":"timestamp-millis"}"#,
        r#"{"type":"string","logicalType":"timestamp-micros"}"#,
    ] {
        assert!(
            matches!(
                Schema::parse(text).unwrap_err().as_logical_type(),
                Some(LogicalTypeError::InvalidLogicalTypeSchema(_))
            ),
            "{text}"
        );
    }
}

#[test]
fn lenient_mode_degrades_to_the_base() {
    let mut parser = lenient();
    assert_eq!(
        parser
            .parse_str(r#"{"type":"int","logicalType":"decimal"}"#)
            .unwrap(),
        Schema::Int
    );
    assert_eq!(
        parser
            .parse_str(r#"{"type":"string","logicalType":"uuid"}"#)
            .unwrap(),
        Schema::String
    );
    let kept = parser
        .parse_str(r#"{"type":"int","logicalType":"date"}"#)
        .unwrap();
    assert_eq!(kept.as_logical().unwrap().logical_type_name(), "date");
}

#[test]
fn missing_type_is_a_schema_definition_error() {
    for mut parser in [SchemaParser::new(), lenient()] {
        let err = parser.parse_str(r#"{"logicalType":"date"}"#).unwrap_err();
        assert!(matches!(
            err.as_logical_type(),
            Some(LogicalTypeError::InvalidLogicalTypeSchema(_))
        ));
    }
}

#[test]
fn logical_schema_over_named_reference() {
    let mut parser = SchemaParser::new();
    parser
        .parse_str(r#"{"type":"fixed","name":"Dec","namespace":"org.acme","size":16}"#)
        .unwrap();
    let schema = parser
        .parse_str(r#"{"type":"org.acme.Dec","logicalType":"decimal"}"#)
        .unwrap();
    let base = schema.as_logical().unwrap().base_schema();
    assert!(matches!(base, Schema::Fixed(fixed) if fixed.name.fullname() == "org.acme.Dec"));

    let err = SchemaParser::new()
        .parse_str(r#"{"type":"Nowhere","logicalType":"decimal"}"#)
        .unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType(_)));
}

#[test]
fn can_read_matrix() {
    let date = Schema::parse(r#"{"type":"int","logicalType":"date"}"#).unwrap();
    let time_millis = Schema::parse(r#"{"type":"int","logicalType":"time-millis"}"#).unwrap();
    let ts_millis = Schema::parse(r#"{"type":"long","logicalType":"timestamp-millis"}"#).unwrap();
    let dec_bytes = Schema::parse(r#"{"type":"bytes","logicalType":"decimal"}"#).unwrap();

    assert!(date.can_read(&date));
    // Names are not compared at this layer.
    assert!(date.can_read(&time_millis));
    assert!(ts_millis.can_read(&date));
    assert!(!date.can_read(&ts_millis));
    assert!(!date.can_read(&Schema::Int));
    assert!(!dec_bytes.can_read(&Schema::Bytes));
    assert!(!dec_bytes.can_read(&date));

    let fixed = |name: &str, size: usize| {
        let base = Schema::Fixed(FixedSchema::new(Name::new(name, None, None).unwrap(), size));
        Schema::Logical(LogicalSchema::new(base, "decimal").unwrap())
    };
    assert!(fixed("A", 16).can_read(&fixed("A", 16)));
    assert!(!fixed("A", 16).can_read(&fixed("B", 16)));
    assert!(!fixed("A", 16).can_read(&dec_bytes));
}

#[test]
fn equality_and_hash_ignore_property_order() {
    let a = Schema::parse(r#"{"type":"bytes","logicalType":"decimal","precision":9,"scale":2}"#)
        .unwrap();
    let b = Schema::parse(r#"{"scale":2,"precision":9,"logicalType":"decimal","type":"bytes"}"#)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a.to_string(), b.to_string());

    let c = Schema::parse(r#"{"type":"bytes","logicalType":"decimal","precision":9,"scale":3}"#)
        .unwrap();
    assert_ne!(a, c);

    let date = Schema::parse(r#"{"type":"int","logicalType":"date"}"#).unwrap();
    let time = Schema::parse(r#"{"type":"int","logicalType":"time-millis"}"#).unwrap();
    assert_ne!(date, time);
    assert_ne!(date, Schema::Int);
}

#[test]
fn properties_are_add_only() {
    let mut schema = LogicalSchema::new(Schema::Bytes, "decimal").unwrap();
    schema.add_property("precision", json!(12)).unwrap();
    schema.add_property("precision", json!(12)).unwrap();
    assert!(matches!(
        schema.add_property("precision", json!(13)),
        Err(SchemaError::Property(_))
    ));
    assert!(matches!(
        schema.add_property("type", json!("int")),
        Err(SchemaError::Property(_))
    ));
    assert_eq!(schema.props().len(), 2);
    assert_eq!(schema.property("precision"), Some(&json!(12)));
}
