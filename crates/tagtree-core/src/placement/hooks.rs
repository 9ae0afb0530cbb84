//! Placement hook slots
//!
//! Three optional callback slots let callers intervene mid-traversal and
//! mid-creation. Hooks run synchronously on the calling thread, once per
//! segment, and any error raised inside a hook propagates out of the
//! placement call unmodified. A hook must not mutate the sibling list the
//! traversal is currently iterating; the engine matches against a
//! point-in-time snapshot.

use crate::errors::Result;
use crate::model::Node;

/// Event delivered to the `iterate` hook at every traversal step
#[derive(Debug)]
pub struct IterateEvent<'a> {
    /// Node reached by this step
    pub node_id: &'a str,
    /// Cumulative path up to and including this step
    pub path: &'a str,
    /// Whether this step completes the whole requested path
    pub is_full_match: bool,
}

/// Event delivered to the `before_add` hook for a node about to be inserted
///
/// The candidate node is still detached; the hook may replace it wholesale,
/// add attributes to it, mark the insertion handled (suppressing the
/// default parent link), or pick an explicit insertion index among the
/// parent's existing children (absent or out-of-range means append).
#[derive(Debug)]
pub struct AddEvent {
    /// Parent the new node will be linked under
    pub parent_id: String,
    /// Cumulative path up to and including the new segment
    pub path: String,
    /// Whether the new segment is the path's final (leaf) segment
    pub is_final: bool,
    /// The candidate node, replaceable before insertion
    pub node: Node,
    /// When set, the engine skips the default parent link
    pub handled: bool,
    /// Insert before the child currently at this index
    pub insert_index: Option<usize>,
}

/// Event delivered to the `after_add` hook once a node is inserted
#[derive(Debug)]
pub struct AddedEvent<'a> {
    /// Parent the node was linked under
    pub parent_id: &'a str,
    /// The inserted node
    pub node_id: &'a str,
    /// Cumulative path up to and including the new segment
    pub path: &'a str,
    /// Whether the new segment is the path's final (leaf) segment
    pub is_final: bool,
}

/// Optional callback slots for one placement call
#[derive(Default)]
pub struct PlacementHooks<'a> {
    /// Runs before each created node is linked to its parent
    pub before_add: Option<Box<dyn FnMut(&mut AddEvent) -> Result<()> + 'a>>,
    /// Runs after each created node is linked and its match attribute set
    pub after_add: Option<Box<dyn FnMut(&AddedEvent<'_>) -> Result<()> + 'a>>,
    /// Runs at every traversal step, matched or created
    pub iterate: Option<Box<dyn FnMut(&IterateEvent<'_>) -> Result<()> + 'a>>,
}

impl<'a> PlacementHooks<'a> {
    /// No hooks
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the `before_add` slot
    pub fn on_before_add(mut self, hook: impl FnMut(&mut AddEvent) -> Result<()> + 'a) -> Self {
        self.before_add = Some(Box::new(hook));
        self
    }

    /// Set the `after_add` slot
    pub fn on_after_add(
        mut self,
        hook: impl FnMut(&AddedEvent<'_>) -> Result<()> + 'a,
    ) -> Self {
        self.after_add = Some(Box::new(hook));
        self
    }

    /// Set the `iterate` slot
    pub fn on_iterate(
        mut self,
        hook: impl FnMut(&IterateEvent<'_>) -> Result<()> + 'a,
    ) -> Self {
        self.iterate = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for PlacementHooks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementHooks")
            .field("before_add", &self.before_add.is_some())
            .field("after_add", &self.after_add.is_some())
            .field("iterate", &self.iterate.is_some())
            .finish()
    }
}
