use tagtree_core::ops::node_ops;
use tagtree_core::ops::tag_ops;
use tagtree_core::Store;

/// Create a new empty Store for testing
#[allow(dead_code)]
pub fn new_store() -> Store {
    Store::new()
}

/// Create a test node carrying the given match-attribute text
///
/// This is a simplified helper - placement tests that exercise creation go
/// through the actual `place` operation instead.
#[allow(dead_code)]
pub fn create_test_node(store: &mut Store, text: &str) -> String {
    let id = node_ops::create_node(store, "xnode");
    tag_ops::set_attribute(store, &id, "text", text).unwrap();
    id
}

/// Setup a simple tree: Root -> Mid -> Leaf
///
/// Returns (root_id, mid_id, leaf_id)
#[allow(dead_code)]
pub fn setup_simple_tree(store: &mut Store) -> (String, String, String) {
    let root_id = node_ops::create_node(store, "root");
    let mid_id = create_test_node(store, "Mid");
    let leaf_id = create_test_node(store, "Leaf");

    node_ops::attach_child(store, &root_id, &mid_id).unwrap();
    node_ops::attach_child(store, &mid_id, &leaf_id).unwrap();

    (root_id, mid_id, leaf_id)
}
