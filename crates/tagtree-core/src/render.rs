use crate::config;
use crate::errors::Result;
use crate::ops::Store;

/// Render a subtree as an indented text outline
///
/// One line per node, two spaces of indentation per level, showing the
/// node name and its match-attribute value (when present). Children
/// appear in tree order. Intended for diagnostics and test assertions;
/// pure function of the tree.
///
/// # Arguments
/// * `store` - Reference to the Store
/// * `root_id` - ID of the subtree root to render
///
/// # Returns
/// Text outline, one line per node
///
/// # Errors
/// * `NodeNotFound` - If the root (or a listed child) doesn't exist
pub fn render_outline(store: &Store, root_id: &str) -> Result<String> {
    let match_attribute = &config::defaults().match_attribute;
    let mut output = String::new();
    render_level(store, root_id, match_attribute, 0, &mut output)?;
    Ok(output)
}

fn render_level(
    store: &Store,
    node_id: &str,
    match_attribute: &str,
    depth: usize,
    output: &mut String,
) -> Result<()> {
    let node = store.get_node(node_id)?;

    for _ in 0..depth {
        output.push_str("  ");
    }
    match node.attribute_value(match_attribute) {
        Some(value) => output.push_str(&format!("{} [{}={}]\n", node.name, match_attribute, value)),
        None => output.push_str(&format!("{}\n", node.name)),
    }

    for child_id in &node.child_ids {
        render_level(store, child_id, match_attribute, depth + 1, output)?;
    }

    Ok(())
}
