//! Process-wide engine defaults
//!
//! Placement calls thread their own overrides through `PlacementRequest`;
//! this module only supplies the values used when a call does not override
//! them. The process-wide default is an explicit, single-writer
//! configuration object: `set_defaults` succeeds exactly once, before the
//! first read, and `defaults()` installs the built-ins lazily otherwise.

use std::sync::OnceLock;

use crate::errors::{Result, TagTreeError};

/// Default values threaded into placement calls at the API boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineDefaults {
    /// Attribute name matched against path segments
    pub match_attribute: String,
    /// Name given to nodes created during placement
    pub node_name: String,
    /// Separator used when splitting delimited path strings
    pub separator: char,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            match_attribute: "text".to_string(),
            node_name: "xnode".to_string(),
            separator: '/',
        }
    }
}

static DEFAULTS: OnceLock<EngineDefaults> = OnceLock::new();

/// Install process-wide defaults
///
/// Single-writer: the first call wins; later calls (or a call after the
/// built-ins were lazily installed by `defaults()`) fail.
///
/// # Errors
///
/// Returns `DefaultsAlreadySet` if defaults were already installed.
pub fn set_defaults(defaults: EngineDefaults) -> Result<()> {
    DEFAULTS
        .set(defaults)
        .map_err(|_| TagTreeError::DefaultsAlreadySet)
}

/// Get the process-wide defaults, installing the built-ins on first read
pub fn defaults() -> &'static EngineDefaults {
    DEFAULTS.get_or_init(EngineDefaults::default)
}
