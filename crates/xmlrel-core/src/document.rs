//! Owned XML element tree
//!
//! Uploaded bytes are transcoded to UTF-8 (see [`crate::encoding`]), parsed
//! with `roxmltree` and copied into an owned
//! [`Element`] tree so the decomposer can hold it across store awaits.
//! Only element nodes survive: text, comments and processing instructions
//! carry nothing the relational form records.

use crate::encoding;
use crate::error::{XmlError, XmlResult};

/// Parser limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest element nesting accepted; the root is depth 1
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 1024 }
    }
}

/// One element with its attributes and element children in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a complete document with default limits
    pub fn parse(bytes: &[u8]) -> XmlResult<Self> {
        Self::parse_with(bytes, &ParseOptions::default())
    }

    /// Parse a complete document and return its root element
    pub fn parse_with(bytes: &[u8], options: &ParseOptions) -> XmlResult<Self> {
        let text = encoding::decode(bytes)?;

        // DOCTYPE declarations are accepted; entity expansion stays bounded
        // by roxmltree's own limits
        let parsing = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let doc = roxmltree::Document::parse_with_options(&text, parsing)
            .map_err(|e| XmlError::MalformedInput(e.to_string()))?;

        from_node(doc.root_element(), 1, options.max_depth)
    }

    /// Pre-order iterator over this element and all of its descendants
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of elements in this subtree, including `self`
    pub fn element_count(&self) -> usize {
        self.pre_order().count()
    }

    /// Number of attributes across this subtree
    pub fn attribute_count(&self) -> usize {
        self.pre_order().map(|e| e.attributes.len()).sum()
    }
}

/// Depth-first pre-order traversal using an explicit stack
pub struct PreOrder<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        // Reversed so the first child is popped next
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

fn from_node(node: roxmltree::Node<'_, '_>, depth: usize, max_depth: usize) -> XmlResult<Element> {
    if depth > max_depth {
        return Err(XmlError::MalformedInput(format!(
            "element nesting exceeds {max_depth} levels"
        )));
    }

    let attributes = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();

    let children = node
        .children()
        .filter(|child| child.is_element())
        .map(|child| from_node(child, depth + 1, max_depth))
        .collect::<XmlResult<Vec<_>>>()?;

    Ok(Element {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
    })
}
