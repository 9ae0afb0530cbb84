use std::cmp::Ordering;

use chrono::Utc;
use uuid::Uuid;

use super::store::Store;
use crate::errors::{Result, TagTreeError};
use crate::model::Node;

/// Create a new detached Node in the store
///
/// Automatically generates a UUID v7 for the node ID. The node starts with
/// no parent; use [`attach_child`] to link it into a tree.
///
/// # Arguments
/// * `store` - Mutable reference to the Store
/// * `name` - Node name
///
/// # Returns
/// The ID of the newly created Node
pub fn create_node(store: &mut Store, name: impl Into<String>) -> String {
    let node = Node::new(Uuid::now_v7().to_string(), name.into());
    let id = node.id.clone();
    store.insert_node(node);
    id
}

/// Attach a child Node under a parent, appending at the end
///
/// # Errors
/// * `NodeNotFound` - If parent or child doesn't exist
/// * `AlreadyParented` - If the child already has a parent
/// * `CycleDetected` - If the parent is the child or one of its descendants
pub fn attach_child(store: &mut Store, parent_id: &str, child_id: &str) -> Result<()> {
    attach_child_inner(store, parent_id, child_id, None)
}

/// Attach a child Node under a parent, before the child currently at `index`
///
/// An out-of-range index appends at the end.
///
/// # Errors
/// Same as [`attach_child`].
pub fn attach_child_at(
    store: &mut Store,
    parent_id: &str,
    child_id: &str,
    index: usize,
) -> Result<()> {
    attach_child_inner(store, parent_id, child_id, Some(index))
}

fn attach_child_inner(
    store: &mut Store,
    parent_id: &str,
    child_id: &str,
    index: Option<usize>,
) -> Result<()> {
    store.get_node(parent_id)?;
    let child = store.get_node(child_id)?;

    if let Some(ref existing) = child.parent_id {
        return Err(TagTreeError::AlreadyParented {
            child_id: child_id.to_string(),
            parent_id: existing.clone(),
        });
    }

    // Walking up from the parent must not reach the child
    if would_cycle(store, parent_id, child_id) {
        return Err(TagTreeError::CycleDetected {
            parent_id: parent_id.to_string(),
            child_id: child_id.to_string(),
        });
    }

    let parent = store.get_node_mut(parent_id)?;
    match index {
        Some(idx) => parent.insert_child_id(child_id.to_string(), idx),
        None => parent.add_child_id(child_id.to_string()),
    }
    parent.updated_at = Utc::now();

    let child = store.get_node_mut(child_id)?;
    child.parent_id = Some(parent_id.to_string());
    child.updated_at = Utc::now();

    store.notify_structure_changed(parent_id);
    Ok(())
}

fn would_cycle(store: &Store, parent_id: &str, child_id: &str) -> bool {
    let mut current = Some(parent_id.to_string());
    while let Some(id) = current {
        if id == child_id {
            return true;
        }
        current = store
            .get_node(&id)
            .ok()
            .and_then(|n| n.parent_id.clone());
    }
    false
}

/// Detach a child Node from its parent
///
/// The child stays in the store as a detached root.
///
/// # Errors
/// * `NodeNotFound` - If parent or child doesn't exist
/// * `ChildNotFound` - If the child is not listed under the parent
pub fn detach_child(store: &mut Store, parent_id: &str, child_id: &str) -> Result<()> {
    store.get_node(child_id)?;
    let parent = store.get_node(parent_id)?;

    if !parent.child_ids.iter().any(|id| id == child_id) {
        return Err(TagTreeError::ChildNotFound {
            parent_id: parent_id.to_string(),
            child_id: child_id.to_string(),
        });
    }

    let parent = store.get_node_mut(parent_id)?;
    parent.remove_child_id(child_id);
    parent.updated_at = Utc::now();

    let child = store.get_node_mut(child_id)?;
    child.parent_id = None;
    child.updated_at = Utc::now();

    store.notify_structure_changed(parent_id);
    Ok(())
}

/// Sort a node's children with the given comparator
///
/// Structure notifications are suppressed for the duration of the sort so
/// observers never see transient intermediate orders; a single
/// `structure_changed` is delivered after the sort completes.
///
/// # Errors
/// * `NodeNotFound` - If the node (or a listed child) doesn't exist
pub fn sort_children_by<F>(store: &mut Store, node_id: &str, mut compare: F) -> Result<()>
where
    F: FnMut(&Node, &Node) -> Ordering,
{
    {
        let mut guard = store.suppress_notifications();

        let child_ids = guard.get_node(node_id)?.child_ids.clone();
        let mut children: Vec<Node> = Vec::with_capacity(child_ids.len());
        for child_id in &child_ids {
            children.push(guard.get_node(child_id)?.clone());
        }
        children.sort_by(|a, b| compare(a, b));
        let sorted: Vec<String> = children.into_iter().map(|n| n.id).collect();

        let node = guard.get_node_mut(node_id)?;
        node.child_ids = sorted;
        node.updated_at = Utc::now();
    }

    store.notify_structure_changed(node_id);
    Ok(())
}

/// Sort a node's attributes by name
///
/// Runs under the same suppression regime as [`sort_children_by`].
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
pub fn sort_attributes(store: &mut Store, node_id: &str) -> Result<()> {
    {
        let mut guard = store.suppress_notifications();
        let node = guard.get_node_mut(node_id)?;
        node.attributes.sort_by(|a, b| a.name.cmp(&b.name));
        node.updated_at = Utc::now();
    }

    store.notify_structure_changed(node_id);
    Ok(())
}
