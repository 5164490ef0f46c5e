//! iXML document model
//!
//! An iXML document is decoded into a tree where each element maps a tag
//! name to the ordered list of values written under that name. A value is
//! either text (a leaf element) or a nested element. Recorders repeat tags
//! (`TRACK`, `FILE_SET`), so every lookup yields a list; most fields only
//! use the first entry.

mod parser;

pub use parser::parse_document;

use std::collections::BTreeMap;

/// A value written under a tag
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// Leaf element content (empty for `<TAG/>`)
    Text(String),
    /// Element with child elements
    Element(XmlElement),
}

impl XmlValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(text) => Some(text),
            XmlValue::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlValue::Element(element) => Some(element),
            XmlValue::Text(_) => None,
        }
    }
}

/// Result of looking up a tag on an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tag<'a> {
    /// The tag does not occur
    Absent,
    /// The tag exists with no values
    Empty,
    /// The tag's values in document order
    Present(&'a [XmlValue]),
}

impl<'a> Tag<'a> {
    pub fn first(self) -> Option<&'a XmlValue> {
        match self {
            Tag::Present(values) => values.first(),
            Tag::Absent | Tag::Empty => None,
        }
    }

    pub fn values(self) -> &'a [XmlValue] {
        match self {
            Tag::Present(values) => values,
            Tag::Absent | Tag::Empty => &[],
        }
    }
}

/// Element content: tag name to values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    children: BTreeMap<String, Vec<XmlValue>>,
}

impl XmlElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`
    pub fn push(&mut self, name: impl Into<String>, value: XmlValue) {
        self.children.entry(name.into()).or_default().push(value);
    }

    /// Replace all values under `name`
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<XmlValue>) {
        self.children.insert(name.into(), values);
    }

    /// Builder-style [`XmlElement::push`] of a text value
    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(name, XmlValue::Text(text.into()));
        self
    }

    /// Builder-style [`XmlElement::push`] of a child element
    pub fn with_element(mut self, name: impl Into<String>, element: XmlElement) -> Self {
        self.push(name, XmlValue::Element(element));
        self
    }

    pub fn tag(&self, name: &str) -> Tag<'_> {
        match self.children.get(name) {
            None => Tag::Absent,
            Some(values) if values.is_empty() => Tag::Empty,
            Some(values) => Tag::Present(values),
        }
    }

    /// First value of `name`, trimmed, if it is non-empty text
    pub fn first_text(&self, name: &str) -> Option<&str> {
        let text = self.tag(name).first()?.as_text()?.trim();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First value of `name` if it is an element
    pub fn first_element(&self, name: &str) -> Option<&XmlElement> {
        self.tag(name).first()?.as_element()
    }

    /// All element values of `name`, skipping text values
    pub fn elements<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.tag(name).values().iter().filter_map(XmlValue::as_element)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
