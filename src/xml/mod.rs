//! Generic XML element tree used by the geometry codec.
//!
//! The same type carries both the elements the codec understands and the
//! foreign elements it preserves verbatim, so nothing needs a second
//! representation to survive a round-trip.

mod read;
mod write;

pub use read::{read_document, read_str};
pub use write::{write_compact, write_pretty};

use indexmap::IndexMap;

/// A parsed XML element: tag name, ordered attributes, trimmed text content,
/// and child elements.
///
/// Attributes keep their document order (via `IndexMap`) so a re-serialized
/// element matches the original apart from insignificant whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }
}
