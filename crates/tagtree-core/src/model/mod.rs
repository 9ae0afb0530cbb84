pub mod attribute;
pub mod node;

pub use attribute::{Attribute, EnumTag, TagValue};
pub use node::Node;
