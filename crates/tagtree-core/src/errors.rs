use tagtree_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using TagTreeError
pub type Result<T> = std::result::Result<T, TagTreeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the TagTree engine. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and external API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    CycleDetected,
    MultipleParents,
    ConstraintViolation,
    AlreadySet,

    // Traversal
    PathNotFound,
    DuplicateMatch,

    // Tags
    TagNotFound,
    AmbiguousTag,

    // Lookup
    MissingMapping,

    // Internal
    Serialization,
    Internal,
}

impl TtErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            TtErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            TtErrorKind::NotFound => "ERR_NOT_FOUND",
            TtErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            TtErrorKind::MultipleParents => "ERR_MULTIPLE_PARENTS",
            TtErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            TtErrorKind::AlreadySet => "ERR_ALREADY_SET",
            TtErrorKind::PathNotFound => "ERR_PATH_NOT_FOUND",
            TtErrorKind::DuplicateMatch => "ERR_DUPLICATE_MATCH",
            TtErrorKind::TagNotFound => "ERR_TAG_NOT_FOUND",
            TtErrorKind::AmbiguousTag => "ERR_AMBIGUOUS_TAG",
            TtErrorKind::MissingMapping => "ERR_MISSING_MAPPING",
            TtErrorKind::Serialization => "ERR_SERIALIZATION",
            TtErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for
/// debugging.
#[derive(Debug, Clone)]
pub struct TtError {
    kind: TtErrorKind,
    op: Option<String>,
    node_id: Option<String>,
    attribute: Option<String>,
    path: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<TtError>>,
    candidates: Option<Vec<String>>,
}

impl TtError {
    /// Create a new error with the specified kind
    pub fn new(kind: TtErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            attribute: None,
            path: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node ID context
    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    /// Add attribute name context
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = Some(name.into());
        self
    }

    /// Add path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: TtError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Add candidate node ids (used for AmbiguousTag/DuplicateMatch reports)
    pub fn with_candidates(mut self, ids: Vec<String>) -> Self {
        self.candidates = Some(ids);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> TtErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the node ID context, if any
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Get the attribute name context, if any
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&TtError> {
        self.source.as_deref()
    }

    /// Get candidate node ids, if any
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for TtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node_id) = &self.node_id {
            write!(f, " (node_id: {})", node_id)?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, " (attribute: {})", attribute)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for TtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Comprehensive error taxonomy for TagTree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TagTreeError {
    // ===== Structural Errors =====
    /// Node not found in store
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// Child is not listed under the given parent
    #[error("Node {child_id} is not a child of {parent_id}")]
    ChildNotFound {
        parent_id: String,
        child_id: String,
    },

    /// Node already has a parent (a node is owned by at most one parent)
    #[error("Node {child_id} already has parent {parent_id}")]
    AlreadyParented {
        child_id: String,
        parent_id: String,
    },

    /// Attaching would create a cycle in the tree
    #[error("Cycle detected: attaching {child_id} under {parent_id} would create a cycle")]
    CycleDetected {
        parent_id: String,
        child_id: String,
    },

    /// A node's parent pointer and the parent's child list disagree
    #[error("Inconsistent link at node {node_id}: {reason}")]
    LinkInconsistent { node_id: String, reason: String },

    // ===== Input Contract Violations =====
    /// Placement path is empty or whitespace-only
    #[error("Placement path is empty")]
    EmptyPath,

    /// Tag name or display text is empty or whitespace-only
    #[error("Invalid tag name: {reason}")]
    InvalidTagName { reason: String },

    /// Process-wide engine defaults were already installed
    #[error("Engine defaults already set")]
    DefaultsAlreadySet,

    // ===== Traversal Errors =====
    /// More than one sibling matched a path segment (unique-match contract violated)
    #[error("Duplicate sibling match for segment '{segment}' at '{path}' ({count} matches)")]
    DuplicateSegmentMatch {
        path: String,
        segment: String,
        count: usize,
    },

    /// Path did not fully resolve under a strict policy
    #[error("Path not found: '{path}' (matched {matched_depth} segment(s))")]
    PathNotFound { path: String, matched_depth: usize },

    // ===== Tag Errors =====
    /// No tag of the requested type on the node (strict query)
    #[error("No tag of type '{type_label}' on node {node_id}")]
    TagNotFound {
        node_id: String,
        type_label: String,
    },

    /// More than one tag of the requested type on the node
    #[error("Ambiguous tag query: {count} tags of type '{type_label}' on node {node_id}")]
    AmbiguousTag {
        node_id: String,
        type_label: String,
        count: usize,
    },

    /// Plain-attribute text did not parse as a member of the enumerated type
    #[error("Cannot parse '{text}' as a member of '{type_label}'")]
    EnumParse { type_label: String, text: String },

    // ===== Lookup Errors =====
    /// Key has no mapped node (strict lookup)
    #[error("Key not mapped: {key}")]
    KeyNotMapped { key: String },

    /// Node has no mapped key (strict lookup)
    #[error("Node not mapped: {node_id}")]
    NodeNotMapped { node_id: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from TagTreeError to TtError
///
/// This maps every domain error onto the canonical error facility so callers
/// can handle errors by stable kind/code without matching enum variants.
impl From<TagTreeError> for TtError {
    fn from(err: TagTreeError) -> Self {
        match err {
            TagTreeError::NodeNotFound { node_id } => TtError::new(TtErrorKind::NotFound)
                .with_node_id(node_id)
                .with_message("Node not found"),

            TagTreeError::ChildNotFound {
                parent_id,
                child_id,
            } => TtError::new(TtErrorKind::NotFound)
                .with_node_id(child_id)
                .with_message(format!("Not a child of {}", parent_id)),

            TagTreeError::AlreadyParented {
                child_id,
                parent_id,
            } => TtError::new(TtErrorKind::MultipleParents)
                .with_node_id(child_id)
                .with_message(format!("Already has parent {}", parent_id)),

            TagTreeError::CycleDetected {
                parent_id,
                child_id,
            } => TtError::new(TtErrorKind::CycleDetected)
                .with_node_id(child_id)
                .with_message(format!("Attaching under {} would create a cycle", parent_id)),

            TagTreeError::LinkInconsistent { node_id, reason } => {
                TtError::new(TtErrorKind::ConstraintViolation)
                    .with_node_id(node_id)
                    .with_message(format!("Inconsistent link: {}", reason))
            }

            TagTreeError::EmptyPath => TtError::new(TtErrorKind::InvalidInput)
                .with_op("place")
                .with_message("Placement path is empty"),

            TagTreeError::InvalidTagName { reason } => TtError::new(TtErrorKind::InvalidInput)
                .with_message(format!("Invalid tag name: {}", reason)),

            TagTreeError::DefaultsAlreadySet => TtError::new(TtErrorKind::AlreadySet)
                .with_op("set_defaults")
                .with_message("Engine defaults already set"),

            TagTreeError::DuplicateSegmentMatch {
                path,
                segment,
                count,
            } => TtError::new(TtErrorKind::DuplicateMatch)
                .with_path(path)
                .with_message(format!(
                    "{} siblings match segment '{}'",
                    count, segment
                )),

            TagTreeError::PathNotFound {
                path,
                matched_depth,
            } => TtError::new(TtErrorKind::PathNotFound)
                .with_path(path)
                .with_message(format!("Matched {} segment(s)", matched_depth)),

            TagTreeError::TagNotFound {
                node_id,
                type_label,
            } => TtError::new(TtErrorKind::TagNotFound)
                .with_node_id(node_id)
                .with_attribute(type_label)
                .with_message("No tag of requested type"),

            TagTreeError::AmbiguousTag {
                node_id,
                type_label,
                count,
            } => TtError::new(TtErrorKind::AmbiguousTag)
                .with_node_id(node_id)
                .with_attribute(type_label)
                .with_message(format!("{} tags of requested type", count)),

            TagTreeError::EnumParse { type_label, text } => {
                TtError::new(TtErrorKind::InvalidInput)
                    .with_attribute(type_label)
                    .with_message(format!("Cannot parse '{}'", text))
            }

            TagTreeError::KeyNotMapped { key } => TtError::new(TtErrorKind::MissingMapping)
                .with_message(format!("Key not mapped: {}", key)),

            TagTreeError::NodeNotMapped { node_id } => TtError::new(TtErrorKind::MissingMapping)
                .with_node_id(node_id)
                .with_message("Node not mapped"),

            TagTreeError::Serialization { message } => {
                TtError::new(TtErrorKind::Serialization).with_message(message)
            }

            TagTreeError::Internal { message } => {
                TtError::new(TtErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to TagTreeError
impl From<serde_json::Error> for TagTreeError {
    fn from(err: serde_json::Error) -> Self {
        TagTreeError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (TtErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (TtErrorKind::NotFound, "ERR_NOT_FOUND"),
            (TtErrorKind::PathNotFound, "ERR_PATH_NOT_FOUND"),
            (TtErrorKind::DuplicateMatch, "ERR_DUPLICATE_MATCH"),
            (TtErrorKind::AmbiguousTag, "ERR_AMBIGUOUS_TAG"),
            (TtErrorKind::MissingMapping, "ERR_MISSING_MAPPING"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_tt_error_candidates_field() {
        let err = TtError::new(TtErrorKind::AmbiguousTag)
            .with_candidates(vec!["node:a".into(), "node:b".into()]);
        let candidates = err.candidates().expect("candidates should be Some");
        assert_eq!(candidates, &["node:a".to_string(), "node:b".to_string()]);
    }

    #[test]
    fn test_tt_error_candidates_none_by_default() {
        let err = TtError::new(TtErrorKind::NotFound);
        assert!(err.candidates().is_none());
    }

    #[test]
    fn test_conversion_preserves_path_context() {
        let err = TagTreeError::PathNotFound {
            path: "a/b/c".to_string(),
            matched_depth: 2,
        };
        let tt: TtError = err.into();
        assert_eq!(tt.kind(), TtErrorKind::PathNotFound);
        assert_eq!(tt.path(), Some("a/b/c"));
    }
}
