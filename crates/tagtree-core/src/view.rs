//! Visibility and expansion projection
//!
//! A derived layer over the tag machinery: each node may carry a
//! `Visible` flag and a four-state `Expansion` indicator, both stored as
//! ordinary typed tags. Setting visibility true propagates up the parent
//! chain, recomputing each ancestor's expansion from its direct children
//! only; false never propagates. The transient "Auto" compute-request is
//! the [`recompute_expansion`] operation, never a stored state.

use std::any::Any;

use crate::errors::{Result, TagTreeError};
use crate::model::{EnumTag, TagValue};
use crate::ops::{tag_ops, Store};
use crate::queries::{enum_value, query, EnumLookup, EnumMatch, TagMatch};

/// Per-node visibility flag, stored as a typed tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible(pub bool);

impl TagValue for Visible {
    fn type_label(&self) -> &'static str {
        "visible"
    }

    fn display_text(&self) -> String {
        self.0.to_string()
    }

    fn clone_value(&self) -> Box<dyn TagValue> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Per-node expansion indicator, stored as a typed tag
///
/// There is intentionally no Auto variant: a compute request is transient
/// and must never be stored, so it is an operation instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// No visible children
    Collapsed,
    /// Some but not all children visible
    Partial,
    /// All children visible
    Expanded,
    /// No children at all
    Leaf,
}

impl TagValue for Expansion {
    fn type_label(&self) -> &'static str {
        Self::LABEL
    }

    fn display_text(&self) -> String {
        self.descriptor()
    }

    fn clone_value(&self) -> Box<dyn TagValue> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl EnumTag for Expansion {
    const LABEL: &'static str = "expansion";
    const PLAIN_ATTRIBUTE: bool = true;

    fn variants() -> &'static [Self] {
        &[
            Expansion::Collapsed,
            Expansion::Partial,
            Expansion::Expanded,
            Expansion::Leaf,
        ]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Expansion::Collapsed => "Collapsed",
            Expansion::Partial => "Partial",
            Expansion::Expanded => "Expanded",
            Expansion::Leaf => "Leaf",
        }
    }
}

/// Check a node's visibility flag
///
/// A node with no flag is not visible.
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
/// * `AmbiguousTag` - If multiple Visible tags were bound to the node
pub fn is_visible(store: &Store, node_id: &str) -> Result<bool> {
    let node = store.get_node(node_id)?;
    match query::<Visible>(node) {
        TagMatch::One(v) => Ok(v.0),
        TagMatch::None => Ok(false),
        TagMatch::Many { count } => Err(TagTreeError::AmbiguousTag {
            node_id: node_id.to_string(),
            type_label: "visible".to_string(),
            count,
        }),
    }
}

/// Set a node's visibility flag
///
/// Setting true makes every ancestor visible too and recomputes each
/// ancestor's expansion from its own direct children. Setting false
/// touches only this node.
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
pub fn set_visible(store: &mut Store, node_id: &str, visible: bool) -> Result<()> {
    tag_ops::attach(store, node_id, Visible(visible), None, None)?;

    if !visible {
        return Ok(());
    }

    let mut current = store.get_node(node_id)?.parent_id.clone();
    while let Some(parent_id) = current {
        tag_ops::attach(store, &parent_id, Visible(true), None, None)?;
        recompute_expansion(store, &parent_id)?;
        current = store.get_node(&parent_id)?.parent_id.clone();
    }

    Ok(())
}

/// Store an explicit expansion state on a node
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
pub fn set_expansion(store: &mut Store, node_id: &str, expansion: Expansion) -> Result<()> {
    tag_ops::attach(store, node_id, expansion, None, None)?;
    Ok(())
}

/// Recompute a node's expansion from its direct children (the Auto path)
///
/// Census over direct children only, never ascending: no children means
/// Leaf, all visible means Expanded, none visible means Collapsed,
/// otherwise Partial. The computed state is stored and returned.
///
/// # Errors
/// * `NodeNotFound` - If the node (or a listed child) doesn't exist
pub fn recompute_expansion(store: &mut Store, node_id: &str) -> Result<Expansion> {
    let child_ids = store.get_node(node_id)?.child_ids.clone();

    let state = if child_ids.is_empty() {
        Expansion::Leaf
    } else {
        let mut visible = 0usize;
        for child_id in &child_ids {
            if is_visible(store, child_id)? {
                visible += 1;
            }
        }
        if visible == child_ids.len() {
            Expansion::Expanded
        } else if visible == 0 {
            Expansion::Collapsed
        } else {
            Expansion::Partial
        }
    };

    set_expansion(store, node_id, state)?;
    Ok(state)
}

/// Read a node's current expansion state, if one is stored
///
/// Accepts the plain-attribute representation via the loose enum lookup.
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
/// * `AmbiguousTag` - If multiple Expansion tags were bound to the node
pub fn expansion(store: &Store, node_id: &str) -> Result<Option<Expansion>> {
    let node = store.get_node(node_id)?;
    match enum_value::<Expansion>(node, EnumLookup::Loose) {
        EnumMatch::One(e) => Ok(Some(e)),
        EnumMatch::None => Ok(None),
        EnumMatch::Many { count } => Err(TagTreeError::AmbiguousTag {
            node_id: node_id.to_string(),
            type_label: Expansion::LABEL.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::node_ops::{attach_child, create_node};

    fn tree(store: &mut Store) -> (String, String, String) {
        let root = create_node(store, "root");
        let mid = create_node(store, "mid");
        let leaf = create_node(store, "leaf");
        attach_child(store, &root, &mid).unwrap();
        attach_child(store, &mid, &leaf).unwrap();
        (root, mid, leaf)
    }

    #[test]
    fn test_unset_visibility_is_false() {
        let mut store = Store::new();
        let (root, _, _) = tree(&mut store);
        assert!(!is_visible(&store, &root).unwrap());
    }

    #[test]
    fn test_set_visible_true_propagates_to_ancestors() {
        let mut store = Store::new();
        let (root, mid, leaf) = tree(&mut store);

        set_visible(&mut store, &leaf, true).unwrap();

        assert!(is_visible(&store, &leaf).unwrap());
        assert!(is_visible(&store, &mid).unwrap());
        assert!(is_visible(&store, &root).unwrap());
        // Each ancestor saw its single child visible
        assert_eq!(expansion(&store, &mid).unwrap(), Some(Expansion::Expanded));
        assert_eq!(expansion(&store, &root).unwrap(), Some(Expansion::Expanded));
        // The leaf's own expansion was not touched
        assert_eq!(expansion(&store, &leaf).unwrap(), None);
    }

    #[test]
    fn test_set_visible_false_does_not_propagate() {
        let mut store = Store::new();
        let (root, mid, leaf) = tree(&mut store);

        set_visible(&mut store, &leaf, true).unwrap();
        set_visible(&mut store, &mid, false).unwrap();

        assert!(!is_visible(&store, &mid).unwrap());
        // Root keeps the visibility it gained earlier
        assert!(is_visible(&store, &root).unwrap());
    }

    #[test]
    fn test_recompute_census() {
        let mut store = Store::new();
        let root = create_node(&mut store, "root");
        let a = create_node(&mut store, "a");
        let b = create_node(&mut store, "b");
        attach_child(&mut store, &root, &a).unwrap();
        attach_child(&mut store, &root, &b).unwrap();

        assert_eq!(
            recompute_expansion(&mut store, &root).unwrap(),
            Expansion::Collapsed
        );

        set_visible(&mut store, &a, true).unwrap();
        assert_eq!(
            recompute_expansion(&mut store, &root).unwrap(),
            Expansion::Partial
        );

        set_visible(&mut store, &b, true).unwrap();
        assert_eq!(
            recompute_expansion(&mut store, &root).unwrap(),
            Expansion::Expanded
        );

        assert_eq!(recompute_expansion(&mut store, &a).unwrap(), Expansion::Leaf);
    }

    #[test]
    fn test_expansion_plain_attribute_round_trip() {
        let mut store = Store::new();
        let root = create_node(&mut store, "root");
        tag_ops::set_attribute(&mut store, &root, "expansion", "expanded").unwrap();

        // Loose lookup parses the plain text representation
        assert_eq!(expansion(&store, &root).unwrap(), Some(Expansion::Expanded));
    }
}
