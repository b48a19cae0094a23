//! Generic markup tree for WordprocessingML output.
//!
//! The serialization driver builds an [`XmlNode`] tree (qualified tag
//! names, ordered attributes, ordered children) rather than writing text
//! directly, so callers can inspect or post-process the structure before
//! rendering. [`XmlNode::to_xml_string`] renders a tree to text with the
//! standard entity escaping; packaging the result into an OPC archive is
//! left to the caller.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use longan::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<t>\"x\"</t>"), "&lt;t&gt;&quot;x&quot;&lt;/t&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Child content of an [`XmlNode`]: a nested element or a text chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlContent {
    Element(XmlNode),
    Text(String),
}

/// A markup element: qualified tag name, ordered attributes, ordered
/// children.
///
/// Attribute and child order is significant in WordprocessingML property
/// groups, so both are kept as insertion-ordered lists rather than maps.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    // Property nodes rarely carry more than a handful of attributes
    attrs: SmallVec<[(String, String); 4]>,
    children: Vec<XmlContent>,
}

impl XmlNode {
    /// Create an element with the given qualified tag name (e.g. `w:pPr`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// The qualified tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an attribute, replacing any existing attribute with the same
    /// name in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Builder-style [`set_attr`](Self::set_attr).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Append a child element.
    pub fn append(&mut self, child: XmlNode) {
        self.children.push(XmlContent::Element(child));
    }

    /// Append a text child.
    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlContent::Text(text.into()));
    }

    /// Whether the node has any children (elements or text).
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Iterate child elements in order (text chunks are skipped).
    pub fn children(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|c| match c {
            XmlContent::Element(node) => Some(node),
            XmlContent::Text(_) => None,
        })
    }

    /// Number of child elements.
    pub fn child_count(&self) -> usize {
        self.children().count()
    }

    /// Find the first child element with the given qualified name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children().find(|c| c.name == name)
    }

    /// Concatenated text content of this node's direct text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let XmlContent::Text(t) = child {
                out.push_str(t);
            }
        }
        out
    }

    /// Render the tree to XML text.
    ///
    /// Elements without children render self-closing; text content and
    /// attribute values are entity-escaped.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }

    fn render(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_xml(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlContent::Element(node) => node.render(out),
                XmlContent::Text(text) => out.push_str(&escape_xml(text)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}
