//! XML serializer
//!
//! This module renders [`XmlElement`] trees to text. [`XmlSerializer`] takes
//! a tree whose names carry namespace URIs only, assigns prefixes from the
//! [`NamespaceRegistry`] and declares the default namespace plus every
//! registry entry on the root. [`write_document`] writes any tree as-is,
//! adding a local declaration only where a name would otherwise be unbound.

use crate::core::error::{ConvertError, ConvertResult};
use crate::core::namespace::{is_reserved, ns, NamespaceRegistry};
use crate::core::node::{NamespaceDecl, XmlDocument, XmlElement, XmlName, XmlNode};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::sync::Arc;

/// Marker leading element names that must be renamed before writing
pub const DELETE_MARKER: &str = "_DELETE_";

/// Remove the leading [`DELETE_MARKER`] from every element name in the tree
///
/// Only element local names are touched; text and attribute values are kept.
pub fn strip_deletion_markers(root: &mut XmlElement) {
    let mut stack: Vec<&mut XmlElement> = vec![root];
    while let Some(element) = stack.pop() {
        if let Some(local) = element.name.local.strip_prefix(DELETE_MARKER).map(str::to_string) {
            element.name.local = local;
        }
        for child in element.children.iter_mut() {
            if let XmlNode::Element(child) = child {
                stack.push(child);
            }
        }
    }
}

/// Options for the XML declaration and layout
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    /// Value of the `standalone` pseudo-attribute, if any
    pub standalone: Option<&'static str>,
    /// Spaces per nesting level
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            standalone: None,
            indent: 2,
        }
    }
}

/// Serializer for record trees
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    registry: Arc<NamespaceRegistry>,
    default_namespace: Option<String>,
    options: WriteOptions,
}

impl XmlSerializer {
    /// Create a serializer without a default namespace
    pub fn new(registry: Arc<NamespaceRegistry>) -> Self {
        Self {
            registry,
            default_namespace: None,
            options: WriteOptions::default(),
        }
    }

    /// Use `uri` as the default namespace of the output
    pub fn with_default_namespace(mut self, uri: impl Into<String>) -> Self {
        self.default_namespace = Some(uri.into());
        self
    }

    /// Set the layout options
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// The registry used for prefixes
    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    /// Serialize a tree to XML text
    ///
    /// Declarations already present on `root` are kept and written first.
    /// Marked element names lose their [`DELETE_MARKER`].
    pub fn serialize(&self, root: &XmlElement) -> ConvertResult<String> {
        let mut root = root.clone();
        strip_deletion_markers(&mut root);
        self.assign_prefixes(&mut root)?;

        if let Some(default_ns) = &self.default_namespace {
            root.namespaces.retain(|d| d.prefix.is_some());
            root.namespaces.insert(
                0,
                NamespaceDecl {
                    prefix: None,
                    uri: default_ns.clone(),
                },
            );
        }
        for (uri, prefix) in self.registry.declarable() {
            if root.namespaces.iter().all(|d| d.prefix.as_deref() != Some(prefix)) {
                root.declare(Some(prefix), uri);
            }
        }

        write_document(&XmlDocument::new(root), self.options)
    }

    /// Give every name in the tree its output prefix
    fn assign_prefixes(&self, root: &mut XmlElement) -> ConvertResult<()> {
        let mut stack: Vec<&mut XmlElement> = vec![root];
        while let Some(element) = stack.pop() {
            element.name.prefix = self.element_prefix(&element.name)?;
            for attr in &mut element.attributes {
                attr.name.prefix = match &attr.name.namespace {
                    Some(uri) => Some(self.registered_prefix(uri)?.to_string()),
                    None => None,
                };
            }
            for child in element.children.iter_mut() {
                if let XmlNode::Element(child) = child {
                    stack.push(child);
                }
            }
        }
        Ok(())
    }

    fn element_prefix(&self, name: &XmlName) -> ConvertResult<Option<String>> {
        match &name.namespace {
            None => Ok(None),
            Some(uri) if self.default_namespace.as_deref() == Some(uri.as_str()) => Ok(None),
            Some(uri) => Ok(Some(self.registered_prefix(uri)?.to_string())),
        }
    }

    fn registered_prefix(&self, uri: &str) -> ConvertResult<&str> {
        if uri == ns::XML {
            return Ok(ns::XML_PREFIX);
        }
        self.registry
            .get_prefix(uri)
            .ok_or_else(|| ConvertError::UnknownNamespace(uri.to_string()))
    }
}

/// In-scope namespace bindings while writing
struct Scopes {
    frames: Vec<Vec<NamespaceDecl>>,
}

impl Scopes {
    fn new() -> Self {
        Self { frames: Vec::new() }
    }

    fn lookup(&self, prefix: Option<&str>) -> Option<&str> {
        if prefix == Some(ns::XML_PREFIX) {
            return Some(ns::XML);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|d| d.prefix.as_deref() == prefix)
            .map(|d| d.uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    /// Declarations `element` must carry, including fixups for unbound names
    fn declarations_for(&self, element: &XmlElement) -> ConvertResult<Vec<NamespaceDecl>> {
        let mut decls: Vec<NamespaceDecl> = Vec::new();
        let bound = |decls: &[NamespaceDecl], prefix: Option<&str>| -> Option<String> {
            decls
                .iter()
                .find(|d| d.prefix.as_deref() == prefix)
                .map(|d| d.uri.clone())
                .or_else(|| self.lookup(prefix).map(str::to_string))
                .filter(|uri| !uri.is_empty())
        };

        for decl in &element.namespaces {
            if is_reserved(&decl.uri) {
                continue;
            }
            if self.lookup(decl.prefix.as_deref()) != Some(decl.uri.as_str()) {
                decls.push(decl.clone());
            }
        }

        let name = &element.name;
        let current = bound(&decls, name.prefix.as_deref());
        if current.as_deref() != name.namespace.as_deref() {
            match (&name.prefix, &name.namespace) {
                (None, None) => decls.push(NamespaceDecl {
                    prefix: None,
                    uri: String::new(),
                }),
                (prefix, Some(uri)) => decls.push(NamespaceDecl {
                    prefix: prefix.clone(),
                    uri: uri.clone(),
                }),
                (Some(prefix), None) => {
                    return Err(ConvertError::Transform(format!(
                        "Prefixed element '{}:{}' has no namespace",
                        prefix, name.local
                    )))
                }
            }
        }

        for attr in &element.attributes {
            match (&attr.name.prefix, &attr.name.namespace) {
                (None, None) => {}
                (Some(prefix), Some(uri)) => {
                    if uri == ns::XML {
                        continue;
                    }
                    if bound(&decls, Some(prefix)).as_deref() != Some(uri.as_str()) {
                        decls.push(NamespaceDecl {
                            prefix: Some(prefix.clone()),
                            uri: uri.clone(),
                        });
                    }
                }
                _ => {
                    return Err(ConvertError::Transform(format!(
                        "Attribute '{}' has a namespace but no prefix",
                        attr.name.local
                    )))
                }
            }
        }

        Ok(decls)
    }
}

enum Frame<'a> {
    Element(&'a XmlElement),
    Text(&'a str),
    Comment(&'a str),
    End(String),
}

/// Write a tree to XML text with an XML declaration
///
/// Whitespace-only text nodes are dropped; the writer indents instead.
/// Text escapes only `<`, `>` and `&`.
pub fn write_document(doc: &XmlDocument, options: WriteOptions) -> ConvertResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', options.indent);
    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        options.standalone,
    )))?;

    let mut scopes = Scopes::new();
    let mut stack = vec![Frame::Element(&doc.root)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Element(element) => {
                let decls = scopes.declarations_for(element)?;
                let qname = element.name.qualified();
                let mut start = BytesStart::new(qname.as_str());
                for decl in &decls {
                    start.push_attribute((decl.attribute_name().as_str(), decl.uri.as_str()));
                }
                for attr in &element.attributes {
                    start.push_attribute((attr.name.qualified().as_str(), attr.value.as_str()));
                }

                let content: Vec<&XmlNode> = element
                    .children
                    .iter()
                    .filter(|c| !c.is_blank_text())
                    .collect();

                if content.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                    continue;
                }

                writer.write_event(Event::Start(start))?;
                scopes.frames.push(decls);
                stack.push(Frame::End(qname));
                for child in content.into_iter().rev() {
                    stack.push(match child {
                        XmlNode::Element(e) => Frame::Element(e),
                        XmlNode::Text(t) => Frame::Text(t),
                        XmlNode::Comment(c) => Frame::Comment(c),
                    });
                }
            }
            Frame::Text(text) => {
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
            }
            Frame::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment)))?;
            }
            Frame::End(qname) => {
                scopes.frames.pop();
                writer.write_event(Event::End(BytesEnd::new(qname)))?;
            }
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| ConvertError::Transform(format!("UTF-8 encoding error: {}", e)))
}
