use super::store::Store;
use crate::errors::{Result, TagTreeError};
use crate::model::{Attribute, TagValue};

/// Attach a typed tag to a node
///
/// Creates a tag attribute from `value`. When `name` is omitted it is
/// derived from the value's self-description (`type_label`); when `text`
/// is omitted the value renders itself (`display_text`). The new tag
/// replaces any same-named attribute (last write wins) and a `tag_bound`
/// notification is raised for observers.
///
/// # Arguments
/// * `store` - Mutable reference to the Store
/// * `node_id` - ID of the node to tag
/// * `value` - The typed tag value
/// * `name` - Optional explicit attribute name
/// * `text` - Optional explicit display text
///
/// # Returns
/// The attribute name the tag was bound under
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
/// * `InvalidTagName` - If an explicit name or text is empty or whitespace
pub fn attach<T: TagValue>(
    store: &mut Store,
    node_id: &str,
    value: T,
    name: Option<&str>,
    text: Option<&str>,
) -> Result<String> {
    if let Some(n) = name {
        if n.trim().is_empty() {
            return Err(TagTreeError::InvalidTagName {
                reason: "explicit name is empty".to_string(),
            });
        }
    }
    if let Some(t) = text {
        if t.trim().is_empty() {
            return Err(TagTreeError::InvalidTagName {
                reason: "explicit text is empty".to_string(),
            });
        }
    }

    let name = name.map(str::to_string).unwrap_or_else(|| value.type_label().to_string());
    let text = text.map(str::to_string).unwrap_or_else(|| value.display_text());

    let node = store.get_node_mut(node_id)?;
    node.set_attribute(Attribute::tagged(name.clone(), text, Box::new(value)));

    store.notify_tag_bound(node_id, &name);
    Ok(name)
}

/// Set a plain (untyped) attribute on a node
///
/// Last write wins on a name conflict, including replacing a typed tag of
/// the same name with a plain attribute.
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
pub fn set_attribute(
    store: &mut Store,
    node_id: &str,
    name: impl Into<String>,
    value: impl Into<String>,
) -> Result<()> {
    let node = store.get_node_mut(node_id)?;
    node.set_attribute(Attribute::plain(name, value));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use std::any::Any;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        size: u32,
    }

    impl TagValue for Widget {
        fn type_label(&self) -> &'static str {
            "widget"
        }

        fn display_text(&self) -> String {
            format!("widget(size={})", self.size)
        }

        fn clone_value(&self) -> Box<dyn TagValue> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn store_with_node(id: &str) -> Store {
        let mut store = Store::new();
        store.insert_node(Node::new(id.to_string(), "Test".to_string()));
        store
    }

    #[test]
    fn test_attach_derives_name_and_text() {
        let mut store = store_with_node("n1");

        let name = attach(&mut store, "n1", Widget { size: 3 }, None, None).unwrap();
        assert_eq!(name, "widget");

        let node = store.get_node("n1").unwrap();
        let attr = node.attribute("widget").unwrap();
        assert_eq!(attr.value, "widget(size=3)");
        assert!(attr.is_tag());
    }

    #[test]
    fn test_attach_explicit_name_overrides() {
        let mut store = store_with_node("n1");

        let name = attach(
            &mut store,
            "n1",
            Widget { size: 1 },
            Some("primary"),
            Some("the primary widget"),
        )
        .unwrap();
        assert_eq!(name, "primary");

        let node = store.get_node("n1").unwrap();
        assert_eq!(node.attribute_value("primary"), Some("the primary widget"));
    }

    #[test]
    fn test_attach_rejects_blank_name() {
        let mut store = store_with_node("n1");

        let result = attach(&mut store, "n1", Widget { size: 1 }, Some("   "), None);
        assert!(matches!(result, Err(TagTreeError::InvalidTagName { .. })));
    }

    #[test]
    fn test_attach_replaces_same_named_tag() {
        let mut store = store_with_node("n1");

        attach(&mut store, "n1", Widget { size: 1 }, None, None).unwrap();
        attach(&mut store, "n1", Widget { size: 9 }, None, None).unwrap();

        let node = store.get_node("n1").unwrap();
        assert_eq!(node.attributes.len(), 1);
        assert_eq!(
            node.attribute("widget").unwrap().tag_as::<Widget>(),
            Some(&Widget { size: 9 })
        );
    }

    #[test]
    fn test_set_attribute_plain() {
        let mut store = store_with_node("n1");

        set_attribute(&mut store, "n1", "text", "C:").unwrap();
        assert_eq!(store.get_node("n1").unwrap().attribute_value("text"), Some("C:"));
    }
}
