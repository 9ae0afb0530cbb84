/// Scenario 5: Bidirectional key ↔ node index
///
/// Round-trip, eviction on reassignment, and the equal-cardinality
/// property under random operation sequences.
use std::collections::HashMap;

use proptest::prelude::*;
use tagtree_core::errors::TagTreeError;
use tagtree_core::DualKeyLookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
    K1,
    K2,
    K3,
}

#[test]
fn test_scenario_05_happy_round_trip() {
    // GIVEN a pair registered both ways
    let mut lookup = DualKeyLookup::new();
    lookup.set_node(Key::K1, Some("n1"));

    // THEN both directions agree
    assert_eq!(lookup.node_for(&Key::K1), Some("n1"));
    assert_eq!(lookup.key_for("n1"), Some(&Key::K1));

    // WHEN the pair is cleared via None
    lookup.set_node(Key::K1, None);

    // THEN both directions report absent
    assert_eq!(lookup.node_for(&Key::K1), None);
    assert_eq!(lookup.key_for("n1"), None);
}

#[test]
fn test_scenario_05_reassignment_evicts_stale_pair() {
    // GIVEN K1 -> N1
    let mut lookup = DualKeyLookup::new();
    lookup.set_node(Key::K1, Some("n1"));

    // WHEN K1 is reassigned to N2
    lookup.set_node(Key::K1, Some("n2"));

    // THEN K1 -> N2 and N1 is no longer mapped
    assert_eq!(lookup.node_for(&Key::K1), Some("n2"));
    assert_eq!(lookup.key_for("n1"), None);
    assert_eq!(lookup.key_for("n2"), Some(&Key::K1));
    assert_eq!(lookup.len(), 1);
}

#[test]
fn test_scenario_05_cross_reassignment_keeps_one_pair_per_side() {
    // GIVEN K1 -> N1 and K2 -> N2
    let mut lookup = DualKeyLookup::new();
    lookup.set_node(Key::K1, Some("n1"));
    lookup.set_node(Key::K2, Some("n2"));

    // WHEN K1 is pointed at N2 (both sides had pairs)
    lookup.set_node(Key::K1, Some("n2"));

    // THEN both stale pairs are gone and one pair remains
    assert_eq!(lookup.len(), 1);
    assert_eq!(lookup.node_for(&Key::K1), Some("n2"));
    assert_eq!(lookup.node_for(&Key::K2), None);
    assert_eq!(lookup.key_for("n1"), None);
}

#[test]
fn test_scenario_05_strict_accessors() {
    let mut lookup = DualKeyLookup::new();
    lookup.set_node(Key::K3, Some("n3"));

    assert_eq!(lookup.require_node_for(&Key::K3).unwrap(), "n3");
    assert!(matches!(
        lookup.require_node_for(&Key::K1),
        Err(TagTreeError::KeyNotMapped { .. })
    ));
    assert!(matches!(
        lookup.require_key_for("n9"),
        Err(TagTreeError::NodeNotMapped { .. })
    ));
}

// Oracle model: the same semantics over two plain maps, checked after
// every operation.
#[derive(Default)]
struct Oracle {
    forward: HashMap<u8, String>,
    backward: HashMap<String, u8>,
}

impl Oracle {
    fn set(&mut self, key: u8, node: Option<String>) {
        match node {
            Some(node) => {
                if self.forward.get(&key) == Some(&node) {
                    return;
                }
                if let Some(stale) = self.forward.remove(&key) {
                    self.backward.remove(&stale);
                }
                if let Some(stale) = self.backward.remove(&node) {
                    self.forward.remove(&stale);
                }
                self.forward.insert(key, node.clone());
                self.backward.insert(node, key);
            }
            None => {
                if let Some(stale) = self.forward.remove(&key) {
                    self.backward.remove(&stale);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_scenario_05_directions_never_diverge(
        ops in prop::collection::vec((0u8..8, prop::option::of(0u8..8)), 0..64)
    ) {
        let mut lookup: DualKeyLookup<u8> = DualKeyLookup::new();
        let mut oracle = Oracle::default();

        for (key, node) in ops {
            let node_id = node.map(|n| format!("n{}", n));
            lookup.set_node(key, node_id.as_deref());
            oracle.set(key, node_id);

            // Cardinality equal in both the model and the real structure
            prop_assert_eq!(lookup.len(), oracle.forward.len());
            prop_assert_eq!(oracle.forward.len(), oracle.backward.len());

            // Every oracle pair round-trips through the lookup
            for (k, n) in &oracle.forward {
                prop_assert_eq!(lookup.node_for(k), Some(n.as_str()));
                prop_assert_eq!(lookup.key_for(n), Some(k));
            }
        }
    }
}
