/// Scenario 2: Partial vs. create boundary and the strict policies
///
/// For segments [a, b, c] where only a/b exists, each policy resolves the
/// incomplete match differently.
mod common;

use tagtree_core::errors::TagTreeError;
use tagtree_core::ops::node_ops;
use tagtree_core::{place_path, PlacementOutcome, PlacementPolicy};

fn store_with_ab() -> (tagtree_core::Store, String) {
    let mut store = common::new_store();
    let root_id = node_ops::create_node(&mut store, "root");
    place_path(&mut store, &root_id, "a/b", PlacementPolicy::FindOrCreate)
        .expect("Should place a/b");
    (store, root_id)
}

#[test]
fn test_scenario_02_partial_resolves_to_deepest_match() {
    // GIVEN a tree with only a/b
    let (mut store, root_id) = store_with_ab();

    // WHEN asking for a/b/c with FindOrPartial
    let placement = place_path(&mut store, &root_id, "a/b/c", PlacementPolicy::FindOrPartial)
        .expect("Partial placement should not error");

    // THEN the result is Partial at node b, nothing created
    assert_eq!(placement.outcome, PlacementOutcome::Partial);
    assert_eq!(placement.created, 0);
    let node = store.get_node(placement.node_id.as_ref().unwrap()).unwrap();
    assert_eq!(node.attribute_value("text"), Some("b"));
}

#[test]
fn test_scenario_02_create_adds_exactly_the_missing_segment() {
    // GIVEN a tree with only a/b
    let (mut store, root_id) = store_with_ab();
    let before = store.len();

    // WHEN asking for a/b/c with FindOrCreate
    let placement = place_path(&mut store, &root_id, "a/b/c", PlacementPolicy::FindOrCreate)
        .expect("Should create c");

    // THEN exactly one node was created under b
    assert_eq!(placement.outcome, PlacementOutcome::Created);
    assert_eq!(placement.created, 1);
    assert_eq!(store.len(), before + 1);

    let leaf = store.get_node(placement.node_id.as_ref().unwrap()).unwrap();
    assert_eq!(leaf.attribute_value("text"), Some("c"));
    let parent = store.get_node(leaf.parent_id.as_ref().unwrap()).unwrap();
    assert_eq!(parent.attribute_value("text"), Some("b"));
}

#[test]
fn test_scenario_02_throw_is_catchable() {
    // GIVEN a tree with only a/b
    let (mut store, root_id) = store_with_ab();

    // WHEN asking for a/b/c with FindOrThrow
    let result = place_path(&mut store, &root_id, "a/b/c", PlacementPolicy::FindOrThrow);

    // THEN a recoverable PathNotFound error reports the matched depth
    match result {
        Err(TagTreeError::PathNotFound {
            path,
            matched_depth,
        }) => {
            assert_eq!(path, "a/b/c");
            assert_eq!(matched_depth, 2);
        }
        other => panic!("Expected PathNotFound, got {:?}", other),
    }
    // Nothing was created
    assert_eq!(store.len(), 3);
}

#[test]
fn test_scenario_02_assert_returns_null_resolution() {
    // GIVEN a tree with only a/b
    let (mut store, root_id) = store_with_ab();

    // WHEN asking for a/b/c with FindOrAssert
    let placement = place_path(&mut store, &root_id, "a/b/c", PlacementPolicy::FindOrAssert)
        .expect("Assert policy should not return a recoverable error");

    // THEN the outcome is AssertFailed with no node and no creation
    assert_eq!(placement.outcome, PlacementOutcome::AssertFailed);
    assert!(placement.node_id.is_none());
    assert_eq!(placement.created, 0);
    assert_eq!(store.len(), 3);
}

#[test]
fn test_scenario_02_not_found_when_no_segment_matches() {
    // GIVEN a tree with only a/b
    let (mut store, root_id) = store_with_ab();

    // WHEN asking for x/y with FindOrPartial
    let placement = place_path(&mut store, &root_id, "x/y", PlacementPolicy::FindOrPartial)
        .expect("Partial placement should not error");

    // THEN no node was reached at all
    assert_eq!(placement.outcome, PlacementOutcome::NotFound);
    assert!(placement.node_id.is_none());
}

#[test]
fn test_scenario_02_error_duplicate_sibling_match() {
    // GIVEN a root with two children both carrying text=dup
    let mut store = common::new_store();
    let root_id = node_ops::create_node(&mut store, "root");
    for _ in 0..2 {
        let child = common::create_test_node(&mut store, "dup");
        node_ops::attach_child(&mut store, &root_id, &child).unwrap();
    }

    // WHEN traversing through the ambiguous level
    let result = place_path(&mut store, &root_id, "dup/below", PlacementPolicy::FindOrCreate);

    // THEN the duplicate is a fatal traversal error, not a first-match pick
    assert!(matches!(
        result,
        Err(TagTreeError::DuplicateSegmentMatch { count: 2, .. })
    ));
}
