//! Integration tests for enum assembly
//!
//! Tests symbol mapping, validation, and enums nested in records.

use tessera_encode::{EnumEncoder, RecordEncoder};
use tessera_schema::{EnumSchema, ErrorKind, Schema, SchemaFor, Value};

use crate::fixtures::{Color, color_encoder};

#[test]
fn green_encodes_to_its_symbol() {
    let value = color_encoder().encode(&Color::Green).unwrap();
    let symbol = value.as_enum().unwrap();
    assert_eq!(symbol.symbol(), "GREEN");
    assert_eq!(symbol.schema().name.full_name(), "demo.Color");
    assert_eq!(value.to_string(), "GREEN");
}

#[test]
fn purple_is_unmapped() {
    let err = color_encoder().encode(&Color::Purple).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnmappedSymbol { .. }));
    assert!(err.to_string().contains("PURPLE"));
}

#[test]
fn enum_schema_lists_symbols() {
    let sf = color_encoder().schema_for().unwrap();
    assert_eq!(sf.schema().symbols(), ["RED", "GREEN", "BLUE"]);
}

#[test]
fn symbols_accumulate_across_calls() {
    let encoder = EnumEncoder::<u8>::builder("Level", "demo")
        .symbols(["LOW"])
        .symbols(["HIGH"])
        .build(|level: &u8| if *level > 5 { "HIGH" } else { "LOW" })
        .unwrap();
    assert_eq!(encoder.encode(&9).unwrap().as_enum().unwrap().index(), 1);
}

#[test]
fn owned_symbols_are_accepted() {
    let encoder = EnumEncoder::<u32>::builder("Digit", "demo")
        .symbols(["D0", "D1", "D2"])
        .build(|d: &u32| format!("D{d}"))
        .unwrap();
    assert_eq!(encoder.encode(&2).unwrap().as_enum().unwrap().symbol(), "D2");
    assert!(encoder.encode(&3).is_err());
}

#[test]
fn enum_without_symbols_fails_to_build() {
    let err = EnumEncoder::<Color>::builder("Color", "demo")
        .build(|_: &Color| "RED")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SchemaBuild(_)));
}

#[test]
fn enum_override_extends_symbols() {
    let wider = EnumSchema::builder("Color", "demo", ["RED", "GREEN", "BLUE", "PURPLE"])
        .build()
        .unwrap();
    let encoder = color_encoder()
        .with_schema(SchemaFor::new(Schema::from(wider)))
        .unwrap();
    assert_eq!(
        encoder.encode(&Color::Purple).unwrap().as_enum().unwrap().index(),
        3
    );
}

#[test]
fn enum_fields_are_validated_within_records() {
    struct Paint {
        color: Color,
    }

    let color_schema = color_encoder().schema_for().unwrap().into_schema();
    let paint = RecordEncoder::<Paint>::builder("Paint", "demo")
        .field("color", color_schema, |p: &Paint| &p.color, color_encoder())
        .build()
        .unwrap();

    let value = paint.encode(&Paint { color: Color::Red }).unwrap();
    let color = value.as_record().unwrap().get("color").unwrap();
    assert_eq!(color.as_enum().unwrap().symbol(), "RED");
    assert!(matches!(color, Value::Enum(_)));

    let err = paint.encode(&Paint {
        color: Color::Purple,
    })
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnmappedSymbol { .. }));
    assert_eq!(err.context.unwrap().stack, ["demo.Paint.color"]);
}
