//! TagTree Core - In-memory ordered tree engine with typed node tags
//!
//! This crate provides the foundational data structures and operations for
//! TagTree, including:
//! - Node model: a mutable, ordered, named container with unique-name attributes
//! - Path placement: deterministic find-or-create traversal with policies and hooks
//! - Typed tags: attach/query with explicit found none/one/many outcomes
//! - DualKeyLookup: bidirectional key ↔ node index with eviction semantics
//! - View projection: per-node visibility and expansion state
//! - Invariant audits over parent/child link consistency
//!
//! All state is in-memory; a tree instance has one logical owner and no
//! internal locking.

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod lookup;
pub mod model;
pub mod ops;
pub mod placement;
pub mod queries;
pub mod render;
pub mod rules;
pub mod view;

// Re-export commonly used types
pub use config::EngineDefaults;
pub use errors::{Result, TagTreeError, TtError, TtErrorKind};
pub use lookup::DualKeyLookup;
pub use model::{Attribute, EnumTag, Node, TagValue};
pub use ops::{Store, TreeObserver};
pub use placement::{
    place, place_path, Placement, PlacementHooks, PlacementOutcome, PlacementPolicy,
    PlacementRequest,
};
pub use queries::{enum_value, has, query, require, tag_named, EnumLookup, EnumMatch, TagMatch};
