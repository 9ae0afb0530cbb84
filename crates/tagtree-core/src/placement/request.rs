use serde::{Deserialize, Serialize};

use crate::config;
use crate::errors::{Result, TagTreeError};

/// Behavior when traversal stops short of the full path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPolicy {
    /// Stop; report how far the path resolved
    FindOrPartial,
    /// Create the remaining segments
    FindOrCreate,
    /// Surface a recoverable not-found error
    FindOrThrow,
    /// Signal a programming diagnostic; create nothing
    FindOrAssert,
}

/// Terminal state of a placement call
///
/// Callers must handle all six states; none is folded into another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    /// No segment matched at all
    NotFound,
    /// A proper prefix of the path matched
    Partial,
    /// The full path matched without creating anything
    Exists,
    /// The full path now exists; at least one segment was created
    Created,
    /// `FindOrAssert` stopped short of the full path
    AssertFailed,
    /// `FindOrThrow` stopped short of the full path
    ThrowRequested,
}

/// A single placement call's input
///
/// Transient: constructed per call, discarded after producing a result.
/// Overrides left as `None` fall back to the process-wide
/// [`EngineDefaults`](crate::config::EngineDefaults) at the API boundary.
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    /// Ordered path segments
    pub segments: Vec<String>,
    /// Resolution policy
    pub policy: PlacementPolicy,
    /// Per-call override of the attribute matched against segments
    pub match_attribute: Option<String>,
    /// Per-call override of the name given to created nodes
    pub node_name: Option<String>,
}

impl PlacementRequest {
    /// Create a request from explicit segments
    ///
    /// Blank segments are discarded, mirroring the delimited-string
    /// constructor.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` if no non-blank segment remains.
    pub fn new(segments: Vec<String>, policy: PlacementPolicy) -> Result<Self> {
        let segments: Vec<String> = segments
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        if segments.is_empty() {
            return Err(TagTreeError::EmptyPath);
        }

        Ok(Self {
            segments,
            policy,
            match_attribute: None,
            node_name: None,
        })
    }

    /// Create a request from a delimited path string
    ///
    /// Splits on the configured separator and discards empty segments
    /// (e.g. trailing separators).
    ///
    /// # Errors
    ///
    /// Returns `EmptyPath` if the path is empty or whitespace-only.
    pub fn from_path(path: &str, policy: PlacementPolicy) -> Result<Self> {
        if path.trim().is_empty() {
            return Err(TagTreeError::EmptyPath);
        }

        let separator = config::defaults().separator;
        Self::new(path.split(separator).map(str::to_string).collect(), policy)
    }

    /// Override the attribute matched against segments for this call
    pub fn with_match_attribute(mut self, name: impl Into<String>) -> Self {
        self.match_attribute = Some(name.into());
        self
    }

    /// Override the name given to created nodes for this call
    pub fn with_node_name(mut self, name: impl Into<String>) -> Self {
        self.node_name = Some(name.into());
        self
    }

    /// The full path joined with the configured separator (for reporting)
    pub fn path_string(&self) -> String {
        self.segments
            .join(&config::defaults().separator.to_string())
    }
}

/// Result of one placement call; immutable once produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Terminal state
    pub outcome: PlacementOutcome,
    /// Resolved node, when one was reached
    pub node_id: Option<String>,
    /// Number of newly created segments
    pub created: usize,
}

impl Placement {
    /// The conventional boolean coercion of a placement outcome
    ///
    /// True only when the call succeeded as a pure lookup, i.e. nothing had
    /// to be created.
    pub fn is_pure_match(&self) -> bool {
        self.outcome == PlacementOutcome::Exists
    }
}
