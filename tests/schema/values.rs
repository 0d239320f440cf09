//! Integration tests for generic values
//!
//! Tests records, enum symbols, unions, equality, and display.

use std::sync::Arc;

use tessera_schema::{EnumSchema, EnumSymbol, Field, Record, RecordSchema, Schema, Value};

fn person() -> Arc<RecordSchema> {
    Arc::new(
        RecordSchema::builder("Person", "demo")
            .field(Field::new("name", Schema::String))
            .field(Field::new("age", Schema::Int))
            .build()
            .unwrap(),
    )
}

fn ada() -> Record {
    Record::new(person(), vec![Value::from("Ada"), Value::Int(31)]).unwrap()
}

// =============================================================================
// Records
// =============================================================================

#[test]
fn record_iterates_in_schema_order() {
    let record = ada();
    let pairs: Vec<_> = record.iter().map(|(k, v)| (k, v.clone())).collect();
    assert_eq!(
        pairs,
        vec![("name", Value::from("Ada")), ("age", Value::Int(31))]
    );
    assert_eq!(record.get_index(1), Some(&Value::Int(31)));
    assert_eq!(record.get_index(2), None);
}

#[test]
fn record_display() {
    assert_eq!(Value::Record(ada()).to_string(), r#"{name: "Ada", age: 31}"#);
}

#[test]
fn records_compare_by_values() {
    assert_eq!(Value::Record(ada()), Value::Record(ada()));
    let bob = Record::new(person(), vec![Value::from("Bob"), Value::Int(31)]).unwrap();
    assert_ne!(Value::Record(ada()), Value::Record(bob));
}

#[test]
fn record_arity_mismatch_fails() {
    let err = Record::new(person(), vec![]).unwrap_err();
    assert!(err.is_value_mismatch());
}

// =============================================================================
// Enum symbols
// =============================================================================

#[test]
fn enum_symbol_binds_to_schema() {
    let color = Arc::new(
        EnumSchema::builder("Color", "demo", ["RED", "GREEN", "BLUE"])
            .build()
            .unwrap(),
    );
    let green = Value::Enum(EnumSymbol::new(Arc::clone(&color), "GREEN").unwrap());
    assert_eq!(green.to_string(), "GREEN");
    assert_eq!(green.as_enum().unwrap().schema().name.full_name(), "demo.Color");
    assert!(EnumSymbol::new(color, "green").is_err());
}

// =============================================================================
// Scalars and containers
// =============================================================================

#[test]
fn scalar_accessors() {
    assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    assert_eq!(Value::Int(3).as_int(), Some(3));
    assert_eq!(Value::Int(3).as_long(), None);
    assert_eq!(Value::Long(3).as_long(), Some(3));
    assert_eq!(Value::from("x").as_str(), Some("x"));
    assert!(Value::Null.is_null());
}

#[test]
fn bytes_display_as_hex() {
    assert_eq!(Value::Bytes(vec![0xde, 0xad]).to_string(), "dead");
    assert_eq!(Value::Fixed(vec![0x01]).to_string(), "01");
}

#[test]
fn union_display_shows_branch_value() {
    let v = Value::union(1, Value::from("x"));
    assert_eq!(v.to_string(), r#""x""#);
    assert_eq!(v.unwrap_union().as_str(), Some("x"));
}

#[test]
fn union_branch_is_part_of_equality() {
    assert_ne!(Value::union(0, Value::Int(1)), Value::union(1, Value::Int(1)));
}

#[test]
fn arrays_and_maps_display() {
    let array = Value::Array(im::vector![Value::Int(1), Value::Int(2)]);
    assert_eq!(array.to_string(), "[1, 2]");

    let map = Value::Map(im::ordmap! {Arc::from("a") => Value::Int(1)});
    assert_eq!(map.to_string(), r#"{"a": 1}"#);
}
