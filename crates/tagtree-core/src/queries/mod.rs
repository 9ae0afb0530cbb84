//! Query module for read-only operations
//!
//! Read-only retrieval over nodes and their typed tags. Queries never
//! mutate the store and report ambiguity as an explicit outcome instead of
//! picking a winner.

pub mod tag_queries;

pub use tag_queries::{
    enum_value, has, query, require, require_enum, tag_named, EnumLookup, EnumMatch, TagMatch,
};
