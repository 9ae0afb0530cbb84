use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attribute::Attribute;

/// Node - the fundamental unit of tree structure
///
/// A Node is a mutable, ordered, named container. Nodes form a tree through
/// parent-child relationships; a node has at most one parent, set on
/// insertion and cleared on removal. Each node carries an ordered set of
/// attributes with unique names (last write wins on conflict).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this Node (UUID v7)
    pub id: String,

    /// Node name (structural, not used for path matching)
    pub name: String,

    /// Optional parent Node ID (None for root nodes)
    pub parent_id: Option<String>,

    /// Ordered list of child Node IDs
    pub child_ids: Vec<String>,

    /// Ordered attribute set (unique names)
    pub attributes: Vec<Attribute>,

    /// Timestamp when this Node was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this Node was last updated
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Create a new Node with the given ID and name
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically UUID v7)
    /// * `name` - Node name
    ///
    /// # Returns
    /// A new Node with no parent, no children, no attributes, and current
    /// timestamps
    pub fn new(id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            parent_id: None,
            child_ids: Vec::new(),
            attributes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this Node is a root (has no parent)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this Node has children
    pub fn has_children(&self) -> bool {
        !self.child_ids.is_empty()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.child_ids.len()
    }

    /// Get an attribute by exact name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Get an attribute by name, ignoring ASCII case
    pub fn attribute_ignore_case(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Get an attribute's string value by exact name
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(|a| a.value.as_str())
    }

    /// Check whether the named attribute equals the given value
    ///
    /// This is the segment-match test used by the placement engine.
    pub fn matches(&self, attribute: &str, value: &str) -> bool {
        self.attribute_value(attribute) == Some(value)
    }

    /// Install an attribute, replacing any same-named one (last write wins)
    ///
    /// Replacement keeps the original position in the ordered set; a new
    /// name appends at the end. Updates the `updated_at` timestamp.
    pub fn set_attribute(&mut self, attribute: Attribute) {
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
        self.updated_at = Utc::now();
    }

    /// Remove an attribute by name, returning it if present
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let idx = self.attributes.iter().position(|a| a.name == name)?;
        self.updated_at = Utc::now();
        Some(self.attributes.remove(idx))
    }

    /// Iterate over attributes that carry typed payloads
    pub fn tags(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.is_tag())
    }

    /// Add a child ID at the end of the child list
    ///
    /// Links are managed by node ops; this only touches the list and is
    /// deduplicating.
    pub(crate) fn add_child_id(&mut self, child_id: String) {
        if !self.child_ids.contains(&child_id) {
            self.child_ids.push(child_id);
        }
    }

    /// Insert a child ID before the child currently at `index`
    ///
    /// An out-of-range index appends at the end.
    pub(crate) fn insert_child_id(&mut self, child_id: String, index: usize) {
        if self.child_ids.contains(&child_id) {
            return;
        }
        let index = index.min(self.child_ids.len());
        self.child_ids.insert(index, child_id);
    }

    /// Remove a child ID from the child list
    pub(crate) fn remove_child_id(&mut self, child_id: &str) {
        self.child_ids.retain(|id| id != child_id);
    }
}
