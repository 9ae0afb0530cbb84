//! The placement engine: path traversal with find-or-create semantics
//!
//! A placement call is a state machine over a single path: traverse as far
//! as sibling matches allow, then resolve the incomplete match according to
//! the request's policy, optionally creating the remaining segments.

use std::time::Instant;

use uuid::Uuid;

use crate::config;
use crate::errors::{Result, TagTreeError};
use crate::model::{Attribute, Node};
use crate::ops::{node_ops, Store};
use crate::placement::hooks::{AddEvent, AddedEvent, IterateEvent, PlacementHooks};
use crate::placement::request::{Placement, PlacementOutcome, PlacementPolicy, PlacementRequest};
use crate::{log_op_end, log_op_error, log_op_start};

/// Locate the node at the request's path under `root_id`
///
/// Traverses from the root matching each segment against exactly one child
/// attribute (the first segment may match the root itself), then resolves
/// an incomplete match per the request's policy, creating the remaining
/// segments under `FindOrCreate`.
///
/// A placement call runs to a terminal state on the calling thread; hooks
/// execute in-line and their errors propagate unmodified.
///
/// # Arguments
/// * `store` - Mutable reference to the Store
/// * `root_id` - Node the traversal starts from
/// * `request` - Path segments, policy, and per-call overrides
/// * `hooks` - Optional callback slots (use `PlacementHooks::none()`)
///
/// # Returns
/// The terminal [`Placement`]: outcome, resolved node, created count
///
/// # Errors
/// * `NodeNotFound` - If the root doesn't exist
/// * `DuplicateSegmentMatch` - If two or more siblings match one segment
/// * `PathNotFound` - Under `FindOrThrow`, if the path doesn't fully resolve
/// * Any error returned by a hook, unmodified
pub fn place(
    store: &mut Store,
    root_id: &str,
    request: &PlacementRequest,
    hooks: &mut PlacementHooks<'_>,
) -> Result<Placement> {
    log_op_start!(
        "place",
        path = %request.path_string(),
        policy = ?request.policy
    );
    let start = Instant::now();

    let result = place_inner(store, root_id, request, hooks);
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(placement) => log_op_end!(
            "place",
            duration_ms = duration_ms,
            outcome = ?placement.outcome,
            created = placement.created as u64
        ),
        Err(e) => log_op_error!("place", e.clone(), duration_ms = duration_ms),
    }

    result
}

/// Convenience wrapper: place a delimited path string without hooks
///
/// # Errors
/// As [`place`], plus `EmptyPath` for a blank path string.
pub fn place_path(
    store: &mut Store,
    root_id: &str,
    path: &str,
    policy: PlacementPolicy,
) -> Result<Placement> {
    let request = PlacementRequest::from_path(path, policy)?;
    place(store, root_id, &request, &mut PlacementHooks::none())
}

fn place_inner(
    store: &mut Store,
    root_id: &str,
    request: &PlacementRequest,
    hooks: &mut PlacementHooks<'_>,
) -> Result<Placement> {
    let defaults = config::defaults();
    let match_attribute = request
        .match_attribute
        .clone()
        .unwrap_or_else(|| defaults.match_attribute.clone());
    let node_name = request
        .node_name
        .clone()
        .unwrap_or_else(|| defaults.node_name.clone());
    let separator = defaults.separator;

    store.get_node(root_id)?;

    let segments = &request.segments;
    let mut current = root_id.to_string();
    let mut matched = 0usize;
    let mut path_so_far = String::new();

    // Segment 0 may match the root itself when the root already carries the
    // match-attribute value: a benign explicit match, consumed without
    // descending.
    if store.get_node(root_id)?.matches(&match_attribute, &segments[0]) {
        matched = 1;
        path_so_far.push_str(&segments[0]);
        run_iterate(hooks, &current, &path_so_far, matched == segments.len())?;
    }

    // Phase 1: traverse existing children
    while matched < segments.len() {
        let segment = &segments[matched];

        // Point-in-time snapshot of the sibling list
        let child_ids = store.get_node(&current)?.child_ids.clone();
        let hits: Vec<&String> = child_ids
            .iter()
            .filter(|cid| {
                store
                    .get_node(cid)
                    .map(|c| c.matches(&match_attribute, segment))
                    .unwrap_or(false)
            })
            .collect();

        if hits.len() > 1 {
            // Unique-attribute-value-per-sibling-group contract violated;
            // surfaced, never resolved by picking the first.
            return Err(TagTreeError::DuplicateSegmentMatch {
                path: join_path(&path_so_far, segment, separator),
                segment: segment.clone(),
                count: hits.len(),
            });
        }

        match hits.first() {
            Some(&hit) => {
                current = hit.clone();
                matched += 1;
                path_so_far = join_path(&path_so_far, segment, separator);
                run_iterate(hooks, &current, &path_so_far, matched == segments.len())?;
            }
            None => break,
        }
    }

    // Phase 2: resolve the (in)complete match
    if matched == segments.len() {
        return Ok(Placement {
            outcome: PlacementOutcome::Exists,
            node_id: Some(current),
            created: 0,
        });
    }

    let placement = match request.policy {
        PlacementPolicy::FindOrPartial => resolve_partial(current, matched),
        PlacementPolicy::FindOrThrow => Placement {
            outcome: PlacementOutcome::ThrowRequested,
            node_id: None,
            created: 0,
        },
        PlacementPolicy::FindOrAssert => {
            // Programming diagnostic, not a recoverable error: emit an
            // error-level event and return a null resolution.
            tracing::error!(
                component = module_path!(),
                op = "placement_assert",
                event = tagtree_core_types::schema::EVENT_END_ERROR,
                path = %request.path_string(),
                matched_depth = matched as u64,
            );
            Placement {
                outcome: PlacementOutcome::AssertFailed,
                node_id: None,
                created: 0,
            }
        }
        PlacementPolicy::FindOrCreate => {
            return create_remaining(
                store,
                hooks,
                segments,
                matched,
                current,
                path_so_far,
                &match_attribute,
                &node_name,
                separator,
            )
        }
    };

    // The throw policy demands a recoverable error, not a value
    if placement.outcome == PlacementOutcome::ThrowRequested {
        return Err(TagTreeError::PathNotFound {
            path: request.path_string(),
            matched_depth: matched,
        });
    }

    Ok(placement)
}

fn resolve_partial(current: String, matched: usize) -> Placement {
    if matched > 0 {
        Placement {
            outcome: PlacementOutcome::Partial,
            node_id: Some(current),
            created: 0,
        }
    } else {
        Placement {
            outcome: PlacementOutcome::NotFound,
            node_id: None,
            created: 0,
        }
    }
}

// Phase 3: create the remaining segments
#[allow(clippy::too_many_arguments)]
fn create_remaining(
    store: &mut Store,
    hooks: &mut PlacementHooks<'_>,
    segments: &[String],
    mut matched: usize,
    mut current: String,
    mut path_so_far: String,
    match_attribute: &str,
    node_name: &str,
    separator: char,
) -> Result<Placement> {
    let mut created = 0usize;

    while matched < segments.len() {
        let segment = segments[matched].clone();
        let is_final = matched + 1 == segments.len();
        let child_path = join_path(&path_so_far, &segment, separator);

        let mut event = AddEvent {
            parent_id: current.clone(),
            path: child_path.clone(),
            is_final,
            node: Node::new(Uuid::now_v7().to_string(), node_name.to_string()),
            handled: false,
            insert_index: None,
        };

        if let Some(hook) = hooks.before_add.as_mut() {
            hook(&mut event)?;
        }

        let AddEvent {
            node: new_node,
            handled,
            insert_index,
            ..
        } = event;
        let new_id = new_node.id.clone();
        store.insert_node(new_node);

        if !handled {
            match insert_index {
                Some(index) => node_ops::attach_child_at(store, &current, &new_id, index)?,
                None => node_ops::attach_child(store, &current, &new_id)?,
            }
        }

        store
            .get_node_mut(&new_id)?
            .set_attribute(Attribute::plain(match_attribute, segment));

        if let Some(hook) = hooks.after_add.as_mut() {
            hook(&AddedEvent {
                parent_id: &current,
                node_id: &new_id,
                path: &child_path,
                is_final,
            })?;
        }
        run_iterate(hooks, &new_id, &child_path, is_final)?;

        current = new_id;
        path_so_far = child_path;
        matched += 1;
        created += 1;
    }

    Ok(Placement {
        outcome: PlacementOutcome::Created,
        node_id: Some(current),
        created,
    })
}

fn run_iterate(
    hooks: &mut PlacementHooks<'_>,
    node_id: &str,
    path: &str,
    is_full_match: bool,
) -> Result<()> {
    if let Some(hook) = hooks.iterate.as_mut() {
        hook(&IterateEvent {
            node_id,
            path,
            is_full_match,
        })?;
    }
    Ok(())
}

fn join_path(prefix: &str, segment: &str, separator: char) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", prefix, separator, segment)
    }
}
