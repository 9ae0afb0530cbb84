use std::collections::{HashMap, HashSet};

use crate::ops::Store;

/// Check if a node is part of a cycle
///
/// Uses the visited-set walk over the parent chain.
pub fn has_cycle(store: &Store, node_id: &str) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(node_id.to_string());

    while let Some(id) = current {
        if !visited.insert(id.clone()) {
            // We've seen this node before - cycle detected
            return true;
        }

        // Move to parent
        if let Ok(node) = store.get_node(&id) {
            current = node.parent_id.clone();
        } else {
            // Node not found - stop traversal
            break;
        }
    }

    false
}

/// Find nodes whose parent_id points to a node that doesn't exist
///
/// Returns list of (child_id, parent_id) tuples
pub fn find_orphans(store: &Store) -> Vec<(String, String)> {
    let mut orphans = Vec::new();

    for node in store.list_nodes() {
        if let Some(ref parent_id) = node.parent_id {
            if store.get_node(parent_id).is_err() {
                orphans.push((node.id.clone(), parent_id.clone()));
            }
        }
    }

    orphans
}

/// Find parent/child links where the two sides disagree
///
/// Reports nodes whose parent_id names a parent that doesn't list them,
/// and nodes listed as children by a parent they don't point back to.
///
/// Returns list of (node_id, reason) tuples
pub fn find_inconsistent_links(store: &Store) -> Vec<(String, String)> {
    let mut inconsistent = Vec::new();

    for node in store.list_nodes() {
        if let Some(ref parent_id) = node.parent_id {
            let parent = match store.get_node(parent_id) {
                Ok(p) => p,
                Err(_) => continue, // Reported by find_orphans
            };

            if !parent.child_ids.iter().any(|id| id == &node.id) {
                inconsistent.push((
                    node.id.clone(),
                    format!("parent {} does not list it as a child", parent_id),
                ));
            }
        }

        for child_id in &node.child_ids {
            match store.get_node(child_id) {
                Ok(child) => {
                    if child.parent_id.as_deref() != Some(node.id.as_str()) {
                        inconsistent.push((
                            child.id.clone(),
                            format!("listed by {} but points elsewhere", node.id),
                        ));
                    }
                }
                Err(_) => {
                    inconsistent.push((
                        node.id.clone(),
                        format!("child list names unknown node {}", child_id),
                    ));
                }
            }
        }
    }

    inconsistent
}

/// Find nodes listed as children by more than one parent
///
/// Returns list of (child_id, vec![parent_ids]) tuples
pub fn find_multi_parent_children(store: &Store) -> Vec<(String, Vec<String>)> {
    let mut child_to_parents: HashMap<String, Vec<String>> = HashMap::new();

    for node in store.list_nodes() {
        for child_id in &node.child_ids {
            child_to_parents
                .entry(child_id.clone())
                .or_default()
                .push(node.id.clone());
        }
    }

    let mut multi: Vec<(String, Vec<String>)> = child_to_parents
        .into_iter()
        .filter(|(_, parents)| parents.len() > 1)
        .collect();

    // Deterministic report order
    multi.sort_by(|a, b| a.0.cmp(&b.0));
    for (_, parents) in &mut multi {
        parents.sort();
    }
    multi
}

/// Find sibling groups violating the unique-match-value contract
///
/// A placement traversal requires at most one child per parent matching a
/// given value of the match attribute.
///
/// Returns list of (parent_id, duplicated_value) tuples
pub fn find_duplicate_sibling_matches(store: &Store, attribute: &str) -> Vec<(String, String)> {
    let mut duplicates = Vec::new();

    for node in store.list_nodes() {
        let mut value_counts: HashMap<&str, usize> = HashMap::new();

        for child_id in &node.child_ids {
            if let Ok(child) = store.get_node(child_id) {
                if let Some(value) = child.attribute_value(attribute) {
                    *value_counts.entry(value).or_insert(0) += 1;
                }
            }
        }

        for (value, count) in value_counts {
            if count > 1 {
                duplicates.push((node.id.clone(), value.to_string()));
            }
        }
    }

    duplicates.sort();
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, Node};

    #[test]
    fn test_no_cycle_in_chain() {
        let mut store = Store::new();
        let mut a = Node::new("a".to_string(), "A".to_string());
        let mut b = Node::new("b".to_string(), "B".to_string());
        a.add_child_id("b".to_string());
        b.parent_id = Some("a".to_string());
        store.insert_node(a);
        store.insert_node(b);

        assert!(!has_cycle(&store, "b"));
    }

    #[test]
    fn test_cycle_detected() {
        let mut store = Store::new();
        let mut a = Node::new("a".to_string(), "A".to_string());
        let mut b = Node::new("b".to_string(), "B".to_string());
        a.parent_id = Some("b".to_string());
        b.parent_id = Some("a".to_string());
        store.insert_node(a);
        store.insert_node(b);

        assert!(has_cycle(&store, "a"));
    }

    #[test]
    fn test_find_orphans() {
        let mut store = Store::new();
        let mut lost = Node::new("lost".to_string(), "Lost".to_string());
        lost.parent_id = Some("gone".to_string());
        store.insert_node(lost);

        let orphans = find_orphans(&store);
        assert_eq!(orphans, vec![("lost".to_string(), "gone".to_string())]);
    }

    #[test]
    fn test_find_inconsistent_links() {
        let mut store = Store::new();
        // Parent lists child, but child points elsewhere
        let mut parent = Node::new("p".to_string(), "P".to_string());
        parent.add_child_id("c".to_string());
        let mut child = Node::new("c".to_string(), "C".to_string());
        child.parent_id = Some("other".to_string());
        store.insert_node(parent);
        store.insert_node(child);
        store.insert_node(Node::new("other".to_string(), "O".to_string()));

        let report = find_inconsistent_links(&store);
        assert!(report.iter().any(|(id, _)| id == "c"));
    }

    #[test]
    fn test_find_multi_parent_children() {
        let mut store = Store::new();
        let mut p1 = Node::new("p1".to_string(), "P1".to_string());
        let mut p2 = Node::new("p2".to_string(), "P2".to_string());
        p1.add_child_id("c".to_string());
        p2.add_child_id("c".to_string());
        let mut c = Node::new("c".to_string(), "C".to_string());
        c.parent_id = Some("p1".to_string());
        store.insert_node(p1);
        store.insert_node(p2);
        store.insert_node(c);

        let report = find_multi_parent_children(&store);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].0, "c");
        assert_eq!(report[0].1, vec!["p1".to_string(), "p2".to_string()]);
    }

    #[test]
    fn test_find_duplicate_sibling_matches() {
        let mut store = Store::new();
        let mut parent = Node::new("p".to_string(), "P".to_string());
        for id in ["c1", "c2"] {
            parent.add_child_id(id.to_string());
            let mut child = Node::new(id.to_string(), "C".to_string());
            child.parent_id = Some("p".to_string());
            child.set_attribute(Attribute::plain("text", "same"));
            store.insert_node(child);
        }
        store.insert_node(parent);

        let report = find_duplicate_sibling_matches(&store, "text");
        assert_eq!(report, vec![("p".to_string(), "same".to_string())]);
    }
}
