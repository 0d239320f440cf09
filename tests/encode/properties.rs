//! Property tests for encoding
//!
//! Tests determinism, resolution idempotence, schema/value pairing, and
//! enum validity over generated inputs.

use proptest::prelude::*;

use tessera_encode::Encoder;
use tessera_schema::{ErrorKind, Value};

use crate::fixtures::{
    Color, Node, Person, chain, color_encoder, color_name, node_encoder, person_encoder,
};

fn person() -> impl Strategy<Value = Person> {
    ("[A-Za-z ]{0,16}", any::<i32>()).prop_map(|(name, age)| Person { name, age })
}

fn node() -> impl Strategy<Value = Node> {
    prop::collection::vec(any::<i64>(), 1..8).prop_map(|values| chain(&values))
}

fn color() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::Red),
        Just(Color::Green),
        Just(Color::Blue),
        Just(Color::Purple),
    ]
}

/// Checks that every record in `value` carries exactly its schema's field names, in order.
fn fields_match_schema(value: &Value) -> bool {
    match value {
        Value::Record(record) => {
            record.field_names().eq(record.schema().field_names())
                && record.len() == record.schema().fields.len()
                && record.iter().all(|(_, v)| fields_match_schema(v))
        }
        Value::Union { value, .. } => fields_match_schema(value),
        Value::Array(items) => items.iter().all(fields_match_schema),
        _ => true,
    }
}

fn resolved<T: 'static>(encoder: &Encoder<T>) -> Encoder<T> {
    encoder.resolve_encoder().unwrap()
}

proptest! {
    #[test]
    fn encoding_is_deterministic(p in person()) {
        let encoder = resolved(&person_encoder());
        prop_assert_eq!(encoder.encode(&p).unwrap(), encoder.encode(&p).unwrap());
    }

    #[test]
    fn resolution_is_idempotent(n in node()) {
        let unresolved = node_encoder();
        let first = resolved(&unresolved);
        let second = resolved(&unresolved);
        let again = resolved(&first);

        prop_assert_eq!(first.schema_for().unwrap(), second.schema_for().unwrap());
        prop_assert_eq!(first.schema_for().unwrap(), again.schema_for().unwrap());
        let expected = first.encode(&n).unwrap();
        prop_assert_eq!(&second.encode(&n).unwrap(), &expected);
        prop_assert_eq!(&again.encode(&n).unwrap(), &expected);
        prop_assert_eq!(&unresolved.encode(&n).unwrap(), &expected);
    }

    #[test]
    fn records_pair_with_their_schema(n in node(), p in person()) {
        prop_assert!(fields_match_schema(&resolved(&node_encoder()).encode(&n).unwrap()));
        prop_assert!(fields_match_schema(&person_encoder().encode(&p).unwrap()));
    }

    #[test]
    fn enum_symbols_are_validated(c in color()) {
        let name = color_name(c);
        match color_encoder().encode(&c) {
            Ok(value) => {
                prop_assert_eq!(value.as_enum().unwrap().symbol(), name);
            }
            Err(err) => {
                prop_assert_eq!(name, "PURPLE");
                let unmapped = matches!(err.kind, ErrorKind::UnmappedSymbol { .. });
                prop_assert!(unmapped);
            }
        }
    }
}
