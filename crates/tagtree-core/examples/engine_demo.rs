//! Demo of the TagTree engine
//!
//! This example demonstrates the key features:
//! - Path placement with find-or-create semantics
//! - Placement hooks steering node creation
//! - Typed tag attach and query
//! - Bidirectional key ↔ node lookup
//! - Visibility/expansion projection
//! - Outline rendering

use std::any::Any;

use tagtree_core::{
    logging_facility, lookup::DualKeyLookup, model::TagValue, ops::node_ops, placement,
    queries, render, view, PlacementHooks, PlacementPolicy, PlacementRequest, Store, TagMatch,
};

#[derive(Debug, Clone, PartialEq)]
struct Bookmark {
    hits: u32,
}

impl TagValue for Bookmark {
    fn type_label(&self) -> &'static str {
        "bookmark"
    }

    fn display_text(&self) -> String {
        format!("bookmark(hits={})", self.hits)
    }

    fn clone_value(&self) -> Box<dyn TagValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum WellKnown {
    Downloads,
    Projects,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging_facility::init(logging_facility::Profile::Development);

    let mut store = Store::new();
    let root_id = node_ops::create_node(&mut store, "root");

    // ── Placement: build a small filesystem-like tree ──────────────
    println!("== Placement ==");

    let placement = placement::place_path(
        &mut store,
        &root_id,
        "C:/Projects/tagtree",
        PlacementPolicy::FindOrCreate,
    )?;
    println!(
        "placed C:/Projects/tagtree -> {:?} ({} created)",
        placement.outcome, placement.created
    );

    // A hook decorates every created node with its depth
    let mut hooks = PlacementHooks::none().on_before_add(|event| {
        let depth = event.path.matches('/').count() + 1;
        event
            .node
            .set_attribute(tagtree_core::Attribute::plain("depth", depth.to_string()));
        Ok(())
    });
    let request =
        PlacementRequest::from_path("C:/Downloads", PlacementPolicy::FindOrCreate)?;
    let downloads = placement::place(&mut store, &root_id, &request, &mut hooks)?;
    drop(hooks);

    let downloads_id = downloads.node_id.expect("created node");
    println!(
        "placed C:/Downloads -> {:?}, depth attribute = {:?}",
        downloads.outcome,
        store.get_node(&downloads_id)?.attribute_value("depth")
    );

    // Re-running the same placement is a pure lookup
    let again = placement::place_path(
        &mut store,
        &root_id,
        "C:/Projects/tagtree",
        PlacementPolicy::FindOrCreate,
    )?;
    println!("re-placed -> {:?}, pure match: {}", again.outcome, again.is_pure_match());

    // ── Typed tags ─────────────────────────────────────────────────
    println!("\n== Typed tags ==");

    let project_id = again.node_id.expect("resolved node");
    tagtree_core::ops::tag_ops::attach(&mut store, &project_id, Bookmark { hits: 12 }, None, None)?;

    let project = store.get_node(&project_id)?;
    match queries::query::<Bookmark>(project) {
        TagMatch::One(b) => println!("bookmark on project node: {:?}", b),
        other => println!("unexpected query outcome: {:?}", other),
    }

    // ── Dual-key lookup ────────────────────────────────────────────
    println!("\n== Dual-key lookup ==");

    let mut index: DualKeyLookup<WellKnown> = DualKeyLookup::new();
    index.set_node(WellKnown::Projects, Some(project_id.as_str()));
    index.set_node(WellKnown::Downloads, Some(downloads_id.as_str()));
    println!(
        "Projects -> {:?}, node {} -> {:?}",
        index.node_for(&WellKnown::Projects),
        downloads_id,
        index.key_for(&downloads_id)
    );

    // ── View projection ────────────────────────────────────────────
    println!("\n== View projection ==");

    view::set_visible(&mut store, &project_id, true)?;
    println!(
        "root visible: {}, root expansion: {:?}",
        view::is_visible(&store, &root_id)?,
        view::expansion(&store, &root_id)?
    );

    // ── Outline ────────────────────────────────────────────────────
    println!("\n== Outline ==");
    print!("{}", render::render_outline(&store, &root_id)?);

    Ok(())
}
