//! XML tree types
//!
//! This module defines the in-memory XML tree shared by the serializer and
//! the reformatter:
//! - XmlElement: an element with a namespace-qualified name, attributes,
//!   namespace declarations and children
//! - XmlNode: element, text or comment content
//! - XmlDocument: a tree with a single root element

/// A namespace-qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlName {
    /// Namespace URI, `None` for names in no namespace
    pub namespace: Option<String>,
    /// Prefix used when writing, `None` for unprefixed names
    pub prefix: Option<String>,
    /// Local part of the name
    pub local: String,
}

impl XmlName {
    /// Create a name in a namespace, without a prefix assigned yet
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            prefix: None,
            local: local.into(),
        }
    }

    /// Create a name in no namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local: local.into(),
        }
    }

    /// Set the prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The name as written, `prefix:local` or `local`
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }

    /// Check namespace and local name, ignoring the prefix
    pub fn matches(&self, namespace: Option<&str>, local: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local == local
    }
}

/// An attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Attribute name
    pub name: XmlName,
    /// Unescaped attribute value
    pub value: String,
}

impl XmlAttribute {
    /// Create a new attribute
    pub fn new(name: XmlName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// A namespace declaration (`xmlns` or `xmlns:prefix`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Declared prefix, `None` for the default namespace
    pub prefix: Option<String>,
    /// Namespace URI
    pub uri: String,
}

impl NamespaceDecl {
    /// Attribute name of the declaration
    pub fn attribute_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        }
    }
}

/// An element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name
    pub name: XmlName,
    /// Attributes, in document order
    pub attributes: Vec<XmlAttribute>,
    /// Namespace declarations carried by this element
    pub namespaces: Vec<NamespaceDecl>,
    /// Child nodes
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create a new element
    pub fn new(name: XmlName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            namespaces: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element containing only text
    pub fn with_text(name: XmlName, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.push_text(text);
        element
    }

    /// Add an attribute, replacing one with the same namespace and local name
    pub fn set_attribute(&mut self, name: XmlName, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self
            .attributes
            .iter_mut()
            .find(|a| a.name.matches(name.namespace.as_deref(), &name.local))
        {
            existing.value = value;
            return;
        }
        self.attributes.push(XmlAttribute::new(name, value));
    }

    /// Get an attribute value
    pub fn attribute(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.matches(namespace, local))
            .map(|a| a.value.as_str())
    }

    /// Declare a namespace on this element
    ///
    /// Declaring the same prefix again replaces its URI; returns whether
    /// the declarations changed.
    pub fn declare(&mut self, prefix: Option<&str>, uri: &str) -> bool {
        if let Some(existing) = self
            .namespaces
            .iter_mut()
            .find(|d| d.prefix.as_deref() == prefix)
        {
            if existing.uri == uri {
                return false;
            }
            existing.uri = uri.to_string();
            return true;
        }
        self.namespaces.push(NamespaceDecl {
            prefix: prefix.map(str::to_string),
            uri: uri.to_string(),
        });
        true
    }

    /// Append a child element
    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Append text, merging with a preceding text node
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
            return;
        }
        self.children.push(XmlNode::Text(text));
    }

    /// Concatenated text content of direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                XmlNode::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Child elements
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given namespace and local name
    pub fn find(&self, namespace: &str, local: &str) -> Option<&XmlElement> {
        self.elements()
            .find(|e| e.name.matches(Some(namespace), local))
    }

    /// All child elements with the given namespace and local name
    pub fn find_all<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements()
            .filter(move |e| e.name.matches(Some(namespace), local))
    }

    /// Check if the element has neither attributes nor children
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// This element and all descendant elements in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator over an element subtree, driven by an explicit stack
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(element.elements());
        self.stack[start..].reverse();
        Some(element)
    }
}

/// A node in the XML tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// An element node
    Element(XmlElement),
    /// Character data
    Text(String),
    /// A comment
    Comment(String),
}

impl XmlNode {
    /// Check if this is a text node holding only whitespace
    pub fn is_blank_text(&self) -> bool {
        matches!(self, XmlNode::Text(t) if t.trim().is_empty())
    }
}

/// A parsed or constructed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// The document element
    pub root: XmlElement,
}

impl XmlDocument {
    /// Create a document from its root element
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }
}
