//! Integration tests for shared use across threads
//!
//! Tests concurrent encoding through resolved and unresolved encoders.

use std::thread;

use crate::fixtures::{Node, chain, node_encoder};

fn chains() -> Vec<Node> {
    (0..8).map(|i| chain(&[i, i + 1, i + 2])).collect()
}

#[test]
fn resolved_encoder_is_shared_across_threads() {
    let encoder = node_encoder().resolve_encoder().unwrap();
    let nodes = chains();
    let expected: Vec<_> = nodes.iter().map(|n| encoder.encode(n).unwrap()).collect();

    thread::scope(|scope| {
        for (node, expected) in nodes.iter().zip(&expected) {
            let encoder = &encoder;
            scope.spawn(move || {
                for _ in 0..50 {
                    assert_eq!(&encoder.encode(node).unwrap(), expected);
                }
            });
        }
    });
}

#[test]
fn unresolved_encoder_converges_under_concurrent_first_use() {
    let encoder = node_encoder();
    let nodes = chains();

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = nodes
            .iter()
            .map(|node| {
                let encoder = encoder.clone();
                scope.spawn(move || encoder.encode(node).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let reference = node_encoder().resolve_encoder().unwrap();
    for (node, value) in nodes.iter().zip(&results) {
        assert_eq!(value, &reference.encode(node).unwrap());
    }
    // Every caller now sees the same cached instance.
    assert_eq!(
        encoder.schema_for().unwrap(),
        reference.schema_for().unwrap()
    );
}
