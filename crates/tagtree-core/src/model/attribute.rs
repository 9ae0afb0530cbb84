use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability for values that can be attached to a node as a typed tag
///
/// This trait replaces runtime reflection with explicit self-description:
/// each domain type that wants to be taggable names itself (`type_label`)
/// and renders itself (`display_text`). The label doubles as the default
/// attribute name when a tag is attached without an explicit name.
pub trait TagValue: Any + fmt::Debug {
    /// Stable lower-case type name, used to derive default attribute names
    fn type_label(&self) -> &'static str;

    /// String rendering of the value, used as the attribute's display text
    fn display_text(&self) -> String;

    /// Clone into a fresh boxed value (object-safe Clone)
    fn clone_value(&self) -> Box<dyn TagValue>;

    /// Upcast for downcasting by requested type
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn TagValue> {
    fn clone(&self) -> Self {
        self.clone_value()
    }
}

/// Capability for enumerated tag types
///
/// The member table is built at compile time (`variants`), replacing
/// enum-name reflection. `PLAIN_ATTRIBUTE` is the placement policy marking
/// the type as representable via a plain text attribute named after the
/// type, which enables the loose query fallback.
pub trait EnumTag: TagValue + Sized + Clone {
    /// Type name used for attribute matching and descriptors
    const LABEL: &'static str;

    /// Whether the type may be represented as a plain attribute
    const PLAIN_ATTRIBUTE: bool;

    /// All members, in declaration order
    fn variants() -> &'static [Self];

    /// Name of this member
    fn variant_name(&self) -> &'static str;

    /// Parse a member from its name
    ///
    /// Strict matching compares names exactly; loose matching ignores ASCII
    /// case.
    fn parse(text: &str, case_insensitive: bool) -> Option<Self> {
        Self::variants()
            .iter()
            .find(|v| {
                if case_insensitive {
                    v.variant_name().eq_ignore_ascii_case(text)
                } else {
                    v.variant_name() == text
                }
            })
            .cloned()
    }

    /// `[Label.Member]` descriptor used as display text for enumerated tags
    fn descriptor(&self) -> String {
        format!("[{}.{}]", Self::LABEL, self.variant_name())
    }
}

/// Name/value pair on a node
///
/// A plain attribute carries only its string value. A typed tag is a
/// specialized attribute that additionally carries an opaque typed payload,
/// established once at construction. Tag payloads are in-memory only and
/// are skipped during serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name (unique per node)
    pub name: String,

    /// String-rendered value / display text
    pub value: String,

    /// Typed payload, present iff this attribute is a typed tag
    #[serde(skip)]
    pub tag: Option<Box<dyn TagValue>>,
}

impl Attribute {
    /// Create a plain (untyped) attribute
    pub fn plain(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            tag: None,
        }
    }

    /// Create a typed tag attribute
    pub fn tagged(
        name: impl Into<String>,
        value: impl Into<String>,
        tag: Box<dyn TagValue>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            tag: Some(tag),
        }
    }

    /// Check if this attribute carries a typed payload
    pub fn is_tag(&self) -> bool {
        self.tag.is_some()
    }

    /// Downcast the typed payload to the requested type
    pub fn tag_as<T: TagValue>(&self) -> Option<&T> {
        self.tag
            .as_deref()
            .and_then(|t| t.as_any().downcast_ref::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Marker(u32);

    impl TagValue for Marker {
        fn type_label(&self) -> &'static str {
            "marker"
        }

        fn display_text(&self) -> String {
            format!("marker:{}", self.0)
        }

        fn clone_value(&self) -> Box<dyn TagValue> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tone {
        Bright,
        Dark,
    }

    impl TagValue for Tone {
        fn type_label(&self) -> &'static str {
            Self::LABEL
        }

        fn display_text(&self) -> String {
            self.descriptor()
        }

        fn clone_value(&self) -> Box<dyn TagValue> {
            Box::new(*self)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl EnumTag for Tone {
        const LABEL: &'static str = "tone";
        const PLAIN_ATTRIBUTE: bool = true;

        fn variants() -> &'static [Self] {
            &[Tone::Bright, Tone::Dark]
        }

        fn variant_name(&self) -> &'static str {
            match self {
                Tone::Bright => "Bright",
                Tone::Dark => "Dark",
            }
        }
    }

    #[test]
    fn test_plain_attribute_has_no_tag() {
        let attr = Attribute::plain("text", "hello");
        assert!(!attr.is_tag());
        assert!(attr.tag_as::<Marker>().is_none());
    }

    #[test]
    fn test_tagged_attribute_downcast() {
        let attr = Attribute::tagged("marker", "marker:7", Box::new(Marker(7)));
        assert!(attr.is_tag());
        assert_eq!(attr.tag_as::<Marker>(), Some(&Marker(7)));
        // Wrong type downcast yields nothing
        assert!(attr.tag_as::<Tone>().is_none());
    }

    #[test]
    fn test_enum_parse_strict_and_loose() {
        assert_eq!(Tone::parse("Bright", false), Some(Tone::Bright));
        assert_eq!(Tone::parse("bright", false), None);
        assert_eq!(Tone::parse("bright", true), Some(Tone::Bright));
        assert_eq!(Tone::parse("dim", true), None);
    }

    #[test]
    fn test_enum_descriptor() {
        assert_eq!(Tone::Dark.descriptor(), "[tone.Dark]");
    }

    #[test]
    fn test_clone_preserves_tag_payload() {
        let attr = Attribute::tagged("marker", "marker:3", Box::new(Marker(3)));
        let cloned = attr.clone();
        assert_eq!(cloned.tag_as::<Marker>(), Some(&Marker(3)));
    }
}
