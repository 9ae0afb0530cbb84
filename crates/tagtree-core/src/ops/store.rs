use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::errors::{Result, TagTreeError};
use crate::model::Node;

/// Handle returned by [`Store::subscribe`], used to unsubscribe
pub type SubscriberId = usize;

/// Observer of tree mutations
///
/// Notifications are delivered synchronously on the mutating thread, after
/// the mutation has completed. Observers must not mutate the store from a
/// callback.
pub trait TreeObserver {
    /// A typed tag was bound to a node
    fn tag_bound(&self, _node_id: &str, _attribute: &str) {}

    /// A node's children or position changed
    fn structure_changed(&self, _node_id: &str) {}
}

/// In-memory store for tree Nodes
///
/// This is a simple HashMap-based storage implementation. Not thread-safe
/// (no Arc/RwLock) - designed for single-threaded use by one logical owner.
/// All storage access is encapsulated here.
#[derive(Clone, Default)]
pub struct Store {
    /// Map of Node ID to Node
    pub(crate) nodes: HashMap<String, Node>,
    /// Explicit subscriber registry (subscribe/unsubscribe, no GC assistance)
    observers: Vec<(SubscriberId, Rc<dyn TreeObserver>)>,
    next_subscriber: SubscriberId,
    /// Suppression depth for structure notifications
    muted: u32,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("nodes", &self.nodes)
            .field("observers", &self.observers.len())
            .field("muted", &self.muted)
            .finish()
    }
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            observers: Vec::new(),
            next_subscriber: 0,
            muted: 0,
        }
    }

    /// Get a Node by ID
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the node doesn't exist.
    pub fn get_node(&self, id: &str) -> Result<&Node> {
        self.nodes.get(id).ok_or_else(|| TagTreeError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    /// Get a mutable reference to a Node by ID
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the node doesn't exist.
    pub fn get_node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TagTreeError::NodeNotFound {
                node_id: id.to_string(),
            })
    }

    /// Insert a Node into the store
    ///
    /// This is an internal method used by node operations and test helpers.
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Remove a Node and its whole subtree from the store
    ///
    /// Detaches the node from its parent's child list first, then removes
    /// every node reachable from it. Emits one `structure_changed` for the
    /// former parent (or the removed node itself for roots).
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the node doesn't exist.
    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        let parent_id = self.get_node(id)?.parent_id.clone();

        if let Some(ref pid) = parent_id {
            if let Some(parent) = self.nodes.get_mut(pid) {
                parent.remove_child_id(id);
            }
        }

        // Collect the subtree before removing anything
        let mut doomed = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.child_ids.iter().cloned());
            }
            doomed.push(current);
        }

        for nid in doomed {
            self.nodes.remove(&nid);
        }

        self.notify_structure_changed(parent_id.as_deref().unwrap_or(id));
        Ok(())
    }

    /// List all Nodes
    pub fn list_nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }

    /// Check if a Node exists
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the store
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register an observer; returns a handle for [`Store::unsubscribe`]
    pub fn subscribe(&mut self, observer: Rc<dyn TreeObserver>) -> SubscriberId {
        let id = self.next_subscriber;
        self.next_subscriber += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove a previously registered observer
    ///
    /// Returns true if the subscriber was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Enter a scoped region in which `structure_changed` is not delivered
    ///
    /// The returned guard dereferences to the Store; suppression ends when
    /// the guard drops, on every exit path including unwinding.
    pub fn suppress_notifications(&mut self) -> SuppressionGuard<'_> {
        self.muted += 1;
        SuppressionGuard { store: self }
    }

    /// Deliver a `tag_bound` notification to all observers
    pub(crate) fn notify_tag_bound(&self, node_id: &str, attribute: &str) {
        for (_, observer) in &self.observers {
            observer.tag_bound(node_id, attribute);
        }
    }

    /// Deliver a `structure_changed` notification unless suppressed
    pub(crate) fn notify_structure_changed(&self, node_id: &str) {
        if self.muted > 0 {
            return;
        }
        for (_, observer) in &self.observers {
            observer.structure_changed(node_id);
        }
    }
}

/// Scoped suppression of structure notifications
///
/// Dereferences to the underlying Store so mutations can continue inside
/// the region.
pub struct SuppressionGuard<'a> {
    store: &'a mut Store,
}

impl Deref for SuppressionGuard<'_> {
    type Target = Store;

    fn deref(&self) -> &Store {
        self.store
    }
}

impl DerefMut for SuppressionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Store {
        self.store
    }
}

impl Drop for SuppressionGuard<'_> {
    fn drop(&mut self) {
        self.store.muted = self.store.muted.saturating_sub(1);
    }
}
