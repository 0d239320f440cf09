//! Integration tests for recursive types
//!
//! Tests self-reference, mutual recursion, and definition sharing.

use std::sync::Arc;

use tessera_encode::{DefinitionEnvironment, Encodable, RecordEncoder, SchemaUpdate, TypeKey};
use tessera_schema::{ErrorKind, Record, Schema, Value};

use crate::fixtures::{
    Department, Employee, chain, department_encoder, employee_encoder, node_encoder,
};

/// Follows `next` links from a node record, collecting each level.
fn levels(value: &Value) -> Vec<Record> {
    let mut out = Vec::new();
    let mut current = value;
    while let Some(record) = current.as_record() {
        out.push(record.clone());
        current = record.get("next").unwrap().unwrap_union();
    }
    out
}

// =============================================================================
// Self reference
// =============================================================================

#[test]
fn depth_three_node_nests_three_records() {
    let encoder = node_encoder().resolve_encoder().unwrap();
    let value = encoder.encode(&chain(&[1, 2, 3])).unwrap();

    let levels = levels(&value);
    assert_eq!(levels.len(), 3);
    for (record, expected) in levels.iter().zip([1, 2, 3]) {
        assert_eq!(record.get("value"), Some(&Value::Long(expected)));
    }
    let tail = levels[2].get("next").unwrap();
    assert_eq!(tail, &Value::union(0, Value::Null));
}

#[test]
fn recursive_schema_is_finite() {
    let sf = node_encoder().resolve_encoder().unwrap().schema_for().unwrap();
    assert_eq!(sf.schema().to_string(), "record demo.Node");
    let next = &sf.schema().fields()[1];
    assert_eq!(next.schema.to_string(), "union[null, ref demo.Node]");
}

#[test]
fn nested_levels_share_one_schema() {
    let value = node_encoder()
        .resolve_encoder()
        .unwrap()
        .encode(&chain(&[1, 2, 3]))
        .unwrap();
    let levels = levels(&value);
    assert!(Arc::ptr_eq(levels[0].schema(), levels[2].schema()));
}

#[test]
fn adhoc_path_handles_recursion() {
    let adhoc = node_encoder();
    let resolved = adhoc.resolve_encoder().unwrap();
    let node = chain(&[5, 6, 7, 8]);
    assert_eq!(adhoc.encode(&node).unwrap(), resolved.encode(&node).unwrap());
}

#[test]
fn deep_chains_encode() {
    let values: Vec<i64> = (0..200).collect();
    let value = node_encoder()
        .resolve_encoder()
        .unwrap()
        .encode(&chain(&values))
        .unwrap();
    assert_eq!(levels(&value).len(), 200);
}

// =============================================================================
// Mutual recursion
// =============================================================================

fn engineering() -> Department {
    Department {
        name: "Engineering".to_string(),
        head: Some(Box::new(Employee {
            name: "Ada".to_string(),
            department: Some(Box::new(Department {
                name: "Research".to_string(),
                head: None,
            })),
        })),
    }
}

#[test]
fn mutually_recursive_types_resolve() {
    let encoder = department_encoder().resolve_encoder().unwrap();
    let value = encoder.encode(&engineering()).unwrap();

    let department = value.as_record().unwrap();
    let head = department.get("head").unwrap().unwrap_union().as_record().unwrap();
    assert_eq!(head.schema().name.full_name(), "demo.Employee");
    assert_eq!(head.get("name"), Some(&Value::from("Ada")));

    let research = head.get("department").unwrap().unwrap_union().as_record().unwrap();
    assert_eq!(research.get("name"), Some(&Value::from("Research")));
    assert!(Arc::ptr_eq(research.schema(), department.schema()));
}

#[test]
fn mutual_recursion_on_the_adhoc_path() {
    let adhoc = department_encoder();
    let resolved = adhoc.resolve_encoder().unwrap();
    assert_eq!(
        adhoc.encode(&engineering()).unwrap(),
        resolved.encode(&engineering()).unwrap()
    );
}

#[test]
fn either_side_of_a_cycle_can_be_the_root() {
    let employee = Employee {
        name: "Bob".to_string(),
        department: Some(Box::new(engineering())),
    };
    let value = employee_encoder()
        .resolve_encoder()
        .unwrap()
        .encode(&employee)
        .unwrap();
    let department = value
        .as_record()
        .unwrap()
        .get("department")
        .unwrap()
        .unwrap_union()
        .as_record()
        .unwrap();
    assert_eq!(department.get("name"), Some(&Value::from("Engineering")));
}

// =============================================================================
// Environment behavior
// =============================================================================

#[test]
fn resolution_leaves_callers_environment_untouched() {
    let env = DefinitionEnvironment::new();
    node_encoder()
        .resolve_in(&env, &SchemaUpdate::NoUpdate)
        .unwrap();
    assert!(env.is_empty());
    assert!(!env.contains(&TypeKey::named("demo.Node")));
}

#[test]
fn same_key_for_different_types_conflicts() {
    struct Outer {
        inner: Inner,
    }
    struct Inner {
        flag: bool,
    }

    let inner = RecordEncoder::<Inner>::builder("Shared", "demo")
        .field("flag", Schema::Boolean, |i: &Inner| &i.flag, bool::encoder())
        .build()
        .unwrap();
    let inner_schema = inner.schema_for().unwrap().into_schema();
    let outer = RecordEncoder::<Outer>::builder("Shared", "demo")
        .field("inner", inner_schema, |o: &Outer| &o.inner, inner)
        .build()
        .unwrap();

    let err = outer.resolve_encoder().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConflictingDefinition(_)));
    assert_eq!(err.context.unwrap().stack, ["demo.Shared.inner"]);
}
