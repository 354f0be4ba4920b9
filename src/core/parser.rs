//! XML parser
//!
//! This module builds an [`XmlDocument`] tree from XML text with every
//! element and attribute name resolved to its namespace URI. The tree is
//! built with an explicit element stack, and nesting depth is bounded.

use crate::core::error::{ConvertError, ConvertResult};
use crate::core::namespace::ns;
use crate::core::node::{XmlAttribute, XmlDocument, XmlElement, XmlName, XmlNode};
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, QName, ResolveResult};
use quick_xml::NsReader;

/// Default limit for element nesting
pub const MAX_DEPTH: usize = 4096;

/// Parser for namespace-aware XML trees
#[derive(Debug, Clone)]
pub struct XmlParser {
    max_depth: usize,
}

impl XmlParser {
    /// Create a new parser with the default depth limit
    pub fn new() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }

    /// Set the maximum element nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse XML text into a tree
    pub fn parse(&self, xml: &str) -> ConvertResult<XmlDocument> {
        let mut reader = NsReader::from_str(xml);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                ConvertError::XmlParse(format!(
                    "XML parsing error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(e) => {
                    if stack.len() >= self.max_depth {
                        return Err(ConvertError::DepthLimit(self.max_depth));
                    }
                    let element = Self::element_from(&reader, &e)?;
                    stack.push(element);
                }
                Event::Empty(e) => {
                    if stack.len() >= self.max_depth {
                        return Err(ConvertError::DepthLimit(self.max_depth));
                    }
                    let element = Self::element_from(&reader, &e)?;
                    Self::attach(element, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    // quick-xml has already matched the end tag against its start
                    let Some(element) = stack.pop() else {
                        return Err(ConvertError::XmlParse("Unexpected end tag".to_string()));
                    };
                    Self::attach(element, &mut stack, &mut root)?;
                }
                Event::Text(e) => {
                    let raw = String::from_utf8_lossy(&e);
                    let text = match unescape(&raw) {
                        Ok(unescaped) => unescaped.to_string(),
                        Err(_) => raw.to_string(),
                    };
                    Self::push_text(text, &mut stack)?;
                }
                Event::GeneralRef(e) => {
                    let name = String::from_utf8_lossy(&e).to_string();
                    let text = Self::resolve_reference(&name)?;
                    Self::push_text(text, &mut stack)?;
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).to_string();
                    Self::push_text(text, &mut stack)?;
                }
                Event::Comment(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e).to_string();
                        parent.children.push(XmlNode::Comment(text));
                    }
                }
                Event::Eof => break,
                // Declarations, processing instructions and doctypes are not kept
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ConvertError::XmlParse(format!(
                "Unclosed element '{}'",
                open.name.qualified()
            )));
        }

        root.map(XmlDocument::new)
            .ok_or_else(|| ConvertError::XmlParse("No root element".to_string()))
    }

    /// Hand a completed element to its parent, or make it the root
    fn attach(
        element: XmlElement,
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
    ) -> ConvertResult<()> {
        if let Some(parent) = stack.last_mut() {
            parent.push_element(element);
            return Ok(());
        }
        if root.is_some() {
            return Err(ConvertError::XmlParse(
                "Multiple root elements".to_string(),
            ));
        }
        *root = Some(element);
        Ok(())
    }

    fn push_text(text: String, stack: &mut [XmlElement]) -> ConvertResult<()> {
        match stack.last_mut() {
            Some(parent) => {
                parent.push_text(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(ConvertError::XmlParse(
                "Text outside of the root element".to_string(),
            )),
        }
    }

    /// Resolve `&name;` to its replacement text
    fn resolve_reference(name: &str) -> ConvertResult<String> {
        if let Some(code) = name.strip_prefix('#') {
            let parsed = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => code.parse::<u32>(),
            };
            return parsed
                .ok()
                .and_then(char::from_u32)
                .map(|c| c.to_string())
                .ok_or_else(|| {
                    ConvertError::XmlParse(format!("Invalid character reference '&{};'", name))
                });
        }
        resolve_predefined_entity(name)
            .map(str::to_string)
            .ok_or_else(|| ConvertError::XmlParse(format!("Unknown entity '&{};'", name)))
    }

    /// Build an element from a start tag, resolving all names
    fn element_from(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> ConvertResult<XmlElement> {
        let (resolved, local) = reader.resolve_element(start.name());
        let name = XmlName {
            namespace: Self::namespace_of(resolved, start.name())?,
            prefix: Self::prefix_of(start.name()),
            local: String::from_utf8_lossy(local.as_ref()).to_string(),
        };
        let mut element = XmlElement::new(name);

        for attr in start.attributes() {
            let attr = attr
                .map_err(|e| ConvertError::XmlParse(format!("Invalid attribute: {}", e)))?;
            let raw_value = String::from_utf8_lossy(attr.value.as_ref());
            let value = match unescape(&raw_value) {
                Ok(unescaped) => unescaped.to_string(),
                Err(_) => raw_value.to_string(),
            };

            if let Some(binding) = attr.key.as_namespace_binding() {
                match binding {
                    PrefixDeclaration::Default => element.declare(None, &value),
                    PrefixDeclaration::Named(prefix) => {
                        element.declare(Some(String::from_utf8_lossy(prefix).as_ref()), &value)
                    }
                };
                continue;
            }

            let (resolved, local) = reader.resolve_attribute(attr.key);
            let name = XmlName {
                namespace: Self::namespace_of(resolved, attr.key)?,
                prefix: Self::prefix_of(attr.key),
                local: String::from_utf8_lossy(local.as_ref()).to_string(),
            };
            element.attributes.push(XmlAttribute::new(name, value));
        }

        Ok(element)
    }

    fn prefix_of(name: QName<'_>) -> Option<String> {
        name.prefix()
            .map(|p| String::from_utf8_lossy(p.as_ref()).to_string())
    }

    fn namespace_of(resolved: ResolveResult<'_>, name: QName<'_>) -> ConvertResult<Option<String>> {
        match resolved {
            ResolveResult::Bound(namespace) => {
                let uri = String::from_utf8_lossy(namespace.as_ref()).to_string();
                Ok((!uri.is_empty()).then_some(uri))
            }
            ResolveResult::Unbound => Ok(None),
            ResolveResult::Unknown(prefix) if prefix == ns::XML_PREFIX.as_bytes() => {
                Ok(Some(ns::XML.to_string()))
            }
            ResolveResult::Unknown(prefix) => Err(ConvertError::XmlParse(format!(
                "Unbound namespace prefix '{}' in '{}'",
                String::from_utf8_lossy(&prefix),
                String::from_utf8_lossy(name.as_ref())
            ))),
        }
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}
