//! Typed tag retrieval
//!
//! Queries scan a node's tag attributes for values of a requested type and
//! report an explicit three-way outcome: found none, found one, or found
//! many. Ambiguity is never resolved by arbitrary selection - a `Many`
//! result carries only the match count, so callers must disambiguate by
//! attribute name (`tag_named`) instead of relying on ordering.

use crate::errors::{Result, TagTreeError};
use crate::model::{EnumTag, Node, TagValue};

/// Outcome of a typed tag query
#[derive(Debug)]
pub enum TagMatch<'a, T> {
    /// No tag of the requested type
    None,
    /// Exactly one tag of the requested type
    One(&'a T),
    /// Two or more tags of the requested type (ambiguous)
    Many { count: usize },
}

impl<'a, T> TagMatch<'a, T> {
    /// True iff the query found exactly one match
    pub fn is_one(&self) -> bool {
        matches!(self, TagMatch::One(_))
    }

    /// The single match, if the query found exactly one
    pub fn into_one(self) -> Option<&'a T> {
        match self {
            TagMatch::One(value) => Some(value),
            _ => None,
        }
    }
}

/// Outcome of an enumerated tag query (owned, since loose matches are
/// parsed from attribute text rather than borrowed from a payload)
#[derive(Debug, Clone, PartialEq)]
pub enum EnumMatch<E> {
    /// No tag and no parseable plain attribute
    None,
    /// Exactly one match
    One(E),
    /// Two or more typed tags of the requested type (ambiguous)
    Many { count: usize },
}

/// Lookup strategy for enumerated types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumLookup {
    /// Member names must match exactly
    Strict,
    /// Member names match ignoring ASCII case
    Loose,
}

/// Query a node for tags of type `T`
///
/// Scans the node's tag attributes and reports found none / one / many.
pub fn query<T: TagValue>(node: &Node) -> TagMatch<'_, T> {
    let mut matches = node.tags().filter_map(|a| a.tag_as::<T>());
    match (matches.next(), matches.next()) {
        (None, _) => TagMatch::None,
        (Some(one), None) => TagMatch::One(one),
        (Some(_), Some(_)) => TagMatch::Many {
            count: 2 + matches.count(),
        },
    }
}

/// Strict variant of [`query`]: exactly one match or an error
///
/// # Errors
/// * `TagNotFound` - No tag of the requested type
/// * `AmbiguousTag` - More than one tag of the requested type
pub fn require<T: TagValue>(node: &Node) -> Result<&T> {
    match query::<T>(node) {
        TagMatch::One(value) => Ok(value),
        TagMatch::None => Err(TagTreeError::TagNotFound {
            node_id: node.id.clone(),
            type_label: std::any::type_name::<T>().to_string(),
        }),
        TagMatch::Many { count } => Err(TagTreeError::AmbiguousTag {
            node_id: node.id.clone(),
            type_label: std::any::type_name::<T>().to_string(),
            count,
        }),
    }
}

/// Check whether a node carries exactly one tag of type `T`
pub fn has<T: TagValue>(node: &Node) -> bool {
    query::<T>(node).is_one()
}

/// Get the tag of type `T` bound under a specific attribute name
///
/// This is the disambiguation path when [`query`] reports `Many`.
pub fn tag_named<'a, T: TagValue>(node: &'a Node, name: &str) -> Option<&'a T> {
    node.attribute(name).and_then(|a| a.tag_as::<T>())
}

/// Query a node for an enumerated value with plain-attribute fallback
///
/// The typed form always takes priority: a typed tag of `E` wins, and an
/// ambiguous typed result is reported as `Many` without consulting the
/// fallback. When no typed tag matches and `E::PLAIN_ATTRIBUTE` marks the
/// type as representable via plain text, the node's attribute named
/// `E::LABEL` (attribute-name match ignoring ASCII case) is parsed against
/// the member table; `Loose` lookup also ignores case in member names.
pub fn enum_value<E: EnumTag>(node: &Node, lookup: EnumLookup) -> EnumMatch<E> {
    match query::<E>(node) {
        TagMatch::One(value) => return EnumMatch::One(value.clone()),
        TagMatch::Many { count } => return EnumMatch::Many { count },
        TagMatch::None => {}
    }

    if !E::PLAIN_ATTRIBUTE {
        return EnumMatch::None;
    }

    let attr = match node.attribute_ignore_case(E::LABEL) {
        Some(a) if !a.is_tag() => a,
        _ => return EnumMatch::None,
    };

    match E::parse(&attr.value, lookup == EnumLookup::Loose) {
        Some(value) => EnumMatch::One(value),
        None => EnumMatch::None,
    }
}

/// Strict variant of [`enum_value`]: exactly one match or an error
///
/// # Errors
/// * `TagNotFound` - No typed tag and no plain attribute named after the type
/// * `EnumParse` - A plain attribute exists but its text is not a member name
/// * `AmbiguousTag` - More than one typed tag of the requested type
pub fn require_enum<E: EnumTag>(node: &Node, lookup: EnumLookup) -> Result<E> {
    match query::<E>(node) {
        TagMatch::One(value) => return Ok(value.clone()),
        TagMatch::Many { count } => {
            return Err(TagTreeError::AmbiguousTag {
                node_id: node.id.clone(),
                type_label: E::LABEL.to_string(),
                count,
            })
        }
        TagMatch::None => {}
    }

    let attr = if E::PLAIN_ATTRIBUTE {
        node.attribute_ignore_case(E::LABEL).filter(|a| !a.is_tag())
    } else {
        None
    };

    match attr {
        Some(attr) => E::parse(&attr.value, lookup == EnumLookup::Loose).ok_or_else(|| {
            TagTreeError::EnumParse {
                type_label: E::LABEL.to_string(),
                text: attr.value.clone(),
            }
        }),
        None => Err(TagTreeError::TagNotFound {
            node_id: node.id.clone(),
            type_label: E::LABEL.to_string(),
        }),
    }
}
