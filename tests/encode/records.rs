//! Integration tests for record assembly
//!
//! Tests field order, nested records, containers, and encode-time errors.

use std::collections::BTreeMap;

use tessera_encode::{Encodable, Encoder, RecordEncoder, primitives};
use tessera_schema::{ErrorKind, Field, FieldMapper, FixedSchema, Schema, Value};

use crate::fixtures::{Person, ada, person_encoder};

// =============================================================================
// Basic records
// =============================================================================

#[test]
fn person_encodes_in_field_order() {
    let value = person_encoder().resolve_encoder().unwrap().encode(&ada()).unwrap();
    let record = value.as_record().unwrap();

    assert_eq!(record.schema().name.full_name(), "demo.Person");
    assert_eq!(record.field_names().collect::<Vec<_>>(), ["name", "age"]);
    assert_eq!(record.get("name"), Some(&Value::from("Ada")));
    assert_eq!(record.get("age"), Some(&Value::Int(31)));
    assert_eq!(value.to_string(), r#"{name: "Ada", age: 31}"#);
}

#[test]
fn schema_reports_record_skeleton() {
    let sf = person_encoder().schema_for().unwrap();
    let record = sf.schema().as_record().unwrap();
    assert_eq!(record.fields[0], Field::new("name", Schema::String));
    assert_eq!(record.fields[1], Field::new("age", Schema::Int));
}

#[test]
fn unresolved_and_resolved_agree() {
    let adhoc = person_encoder();
    let resolved = adhoc.resolve_encoder().unwrap();
    assert_eq!(adhoc.schema_for().unwrap(), resolved.schema_for().unwrap());
    assert_eq!(adhoc.encode(&ada()).unwrap(), resolved.encode(&ada()).unwrap());
}

#[test]
fn record_metadata_reaches_schema() {
    let encoder = RecordEncoder::<Person>::builder("Person", "demo")
        .doc("Someone we know")
        .alias("Human")
        .prop("source", "hr")
        .field_with(
            Field::new("name", Schema::String).with_doc("Given name"),
            |p: &Person| &p.name,
            String::encoder(),
        )
        .build()
        .unwrap();

    let sf = encoder.schema_for().unwrap();
    let record = sf.schema().as_record().unwrap();
    assert_eq!(record.doc.as_deref(), Some("Someone we know"));
    assert_eq!(record.aliases, ["Human"]);
    assert_eq!(record.props.get("source").map(String::as_str), Some("hr"));
    assert_eq!(record.fields[0].doc.as_deref(), Some("Given name"));
}

#[test]
fn field_mapper_applies_to_declared_names() {
    struct Login {
        user_name: String,
    }

    let encoder = RecordEncoder::<Login>::builder("Login", "demo")
        .field_mapper(FieldMapper::PascalCase)
        .field("user_name", Schema::String, |l: &Login| &l.user_name, String::encoder())
        .build()
        .unwrap();

    let value = encoder
        .encode(&Login {
            user_name: "ada".to_string(),
        })
        .unwrap();
    assert_eq!(
        value.as_record().unwrap().field_names().collect::<Vec<_>>(),
        ["UserName"]
    );
}

// =============================================================================
// Nested values
// =============================================================================

struct Team {
    lead: Person,
    members: Vec<Person>,
    scores: BTreeMap<String, i64>,
    motto: Option<String>,
}

fn team_encoder() -> Encoder<Team> {
    let person_schema = person_encoder().schema_for().unwrap().into_schema();
    RecordEncoder::<Team>::builder("Team", "demo")
        .field("lead", person_schema.clone(), |t: &Team| &t.lead, person_encoder())
        .field(
            "members",
            Schema::array(person_schema),
            |t: &Team| &t.members,
            tessera_encode::containers::array(person_encoder()),
        )
        .field(
            "scores",
            Schema::map(Schema::Long),
            |t: &Team| &t.scores,
            BTreeMap::<String, i64>::encoder(),
        )
        .field(
            "motto",
            Schema::optional(Schema::String),
            |t: &Team| &t.motto,
            Option::<String>::encoder(),
        )
        .build()
        .unwrap()
}

#[test]
fn nested_records_and_containers() {
    let team = Team {
        lead: ada(),
        members: vec![ada(), Person {
            name: "Bob".to_string(),
            age: 40,
        }],
        scores: BTreeMap::from([("wins".to_string(), 3)]),
        motto: None,
    };

    let value = team_encoder().resolve_encoder().unwrap().encode(&team).unwrap();
    let record = value.as_record().unwrap();

    let lead = record.get("lead").unwrap().as_record().unwrap();
    assert_eq!(lead.get("name"), Some(&Value::from("Ada")));

    let members = record.get("members").unwrap().as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(
        members[1].as_record().unwrap().get("age"),
        Some(&Value::Int(40))
    );

    let Value::Map(scores) = record.get("scores").unwrap() else {
        panic!("expected a map");
    };
    assert_eq!(scores.get("wins"), Some(&Value::Long(3)));

    assert_eq!(record.get("motto"), Some(&Value::union(0, Value::Null)));
}

// =============================================================================
// Errors
// =============================================================================

struct Token {
    id: Vec<u8>,
}

#[test]
fn oversized_fixed_field_is_an_extraction_error() {
    let id = Schema::from(FixedSchema::new("Id", "demo", 4).unwrap());
    let encoder = RecordEncoder::<Token>::builder("Token", "demo")
        .field("id", id, |t: &Token| &t.id, primitives::bytes())
        .build()
        .unwrap();

    assert_eq!(
        encoder.encode(&Token { id: vec![1, 2] }).unwrap(),
        encoder.resolve_encoder().unwrap().encode(&Token { id: vec![1, 2] }).unwrap()
    );

    let err = encoder.encode(&Token { id: vec![0; 5] }).unwrap_err();
    match err.kind {
        ErrorKind::ExtractionType {
            record,
            field,
            reason,
        } => {
            assert_eq!(record, "demo.Token");
            assert_eq!(field, "id");
            assert!(reason.contains("5 bytes"));
        }
        other => panic!("expected an extraction error, got {other}"),
    }
}

#[test]
fn incompatible_field_schema_fails_resolution() {
    let encoder = RecordEncoder::<Person>::builder("Person", "demo")
        .field("age", Schema::String, |p: &Person| &p.age, i32::encoder())
        .build()
        .unwrap();

    let err = encoder.resolve_encoder().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SchemaOverride { .. }));
    let context = err.context.unwrap();
    assert_eq!(context.stack, ["demo.Person.age"]);
    assert!(context.source.unwrap().contains("Person"));
}

#[test]
fn invalid_record_name_fails_at_build() {
    let err = RecordEncoder::<Person>::builder("Per son", "demo")
        .field("name", Schema::String, |p: &Person| &p.name, String::encoder())
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SchemaBuild(_)));
}

#[test]
fn empty_field_name_fails_at_build() {
    let err = RecordEncoder::<Person>::builder("Person", "demo")
        .field("", Schema::String, |p: &Person| &p.name, String::encoder())
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SchemaBuild(_)));
}
