//! Namespace minimization
//!
//! The reformatter rewrites an XML document so that the root declares
//! exactly the namespaces the document uses, each under its canonical
//! prefix, and no other element declares anything.
//!
//! It runs two passes over the parsed tree:
//!
//! 1. **Discovery** records, for every prefixed element, the namespace URI
//!    and its prefix. A URI found in the [`NamespaceRegistry`] always takes
//!    the canonical prefix. Attributes only contribute when their namespace
//!    is in the registry.
//! 2. **Rewrite** renames every element and attribute whose namespace was
//!    discovered to the assigned prefix, drops all existing declarations and
//!    collects one root declaration per assigned prefix.
//!
//! Names whose namespace was not discovered keep their prefix; their binding
//! is hoisted to the root unless it would clash with a root binding. A
//! default namespace stays where it is while any element is in no namespace.

use crate::core::error::{ConvertError, ConvertResult};
use crate::core::namespace::{is_reserved, NamespaceRegistry};
use crate::core::node::{NamespaceDecl, XmlElement, XmlNode};
use crate::core::parser::XmlParser;
use crate::core::serializer::{strip_deletion_markers, write_document, WriteOptions};
use std::collections::HashMap;
use std::sync::Arc;

/// Namespace URI to prefix assignments, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceAssignments {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NamespaceAssignments {
    /// Record `prefix` for `uri`, replacing an earlier prefix
    pub fn assign(&mut self, uri: &str, prefix: &str) {
        match self.index.get(uri) {
            Some(&i) => self.entries[i].1 = prefix.to_string(),
            None => {
                self.index.insert(uri.to_string(), self.entries.len());
                self.entries.push((uri.to_string(), prefix.to_string()));
            }
        }
    }

    /// Prefix assigned to `uri`
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.index.get(uri).map(|&i| self.entries[i].1.as_str())
    }

    /// Iterate (uri, prefix) pairs in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Number of assigned namespaces
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was assigned
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rewrites XML to a minimal set of canonical namespace declarations
#[derive(Debug, Clone)]
pub struct Reformatter {
    registry: Arc<NamespaceRegistry>,
    parser: XmlParser,
    options: WriteOptions,
}

impl Reformatter {
    /// Create a reformatter canonicalizing against `registry`
    pub fn new(registry: Arc<NamespaceRegistry>) -> Self {
        Self {
            registry,
            parser: XmlParser::new(),
            options: WriteOptions {
                standalone: Some("yes"),
                indent: 2,
            },
        }
    }

    /// Use a custom parser, e.g. with a different depth limit
    pub fn with_parser(mut self, parser: XmlParser) -> Self {
        self.parser = parser;
        self
    }

    /// Reformat XML text
    ///
    /// Fails with [`ConvertError::XmlParse`] if the input is not well-formed
    /// and with [`ConvertError::Transform`] if the result cannot be written.
    pub fn reformat(&self, xml: &str) -> ConvertResult<String> {
        let mut doc = self.parser.parse(xml)?;

        let assignments = self.discover(&doc.root);
        self.rewrite(&mut doc.root, &assignments);
        hoist_remaining(&mut doc.root);
        strip_deletion_markers(&mut doc.root);

        tracing::debug!(
            namespaces = doc.root.namespaces.len(),
            "reformatted namespace declarations"
        );

        write_document(&doc, self.options).map_err(|e| ConvertError::Transform(e.to_string()))
    }

    /// Pass 1: find the namespaces the tree uses and pick their prefixes
    pub fn discover(&self, root: &XmlElement) -> NamespaceAssignments {
        let mut assignments = NamespaceAssignments::default();

        for element in root.descendants() {
            if let (Some(uri), Some(prefix)) = (&element.name.namespace, &element.name.prefix) {
                assignments.assign(uri, prefix);
            }
            for attr in &element.attributes {
                let Some(uri) = &attr.name.namespace else {
                    continue;
                };
                // Unknown attribute namespaces are left alone
                if let Some(canonical) = self.registry.get_prefix(uri) {
                    assignments.assign(uri, canonical);
                }
            }
        }

        // Canonical prefixes always win
        let canonical: Vec<(String, String)> = assignments
            .iter()
            .filter_map(|(uri, _)| {
                self.registry
                    .get_prefix(uri)
                    .map(|p| (uri.to_string(), p.to_string()))
            })
            .collect();
        for (uri, prefix) in &canonical {
            assignments.assign(uri, prefix);
        }

        self.resolve_collisions(&mut assignments);
        assignments
    }

    /// Give colliding non-canonical namespaces fresh prefixes
    fn resolve_collisions(&self, assignments: &mut NamespaceAssignments) {
        let mut taken: HashMap<String, String> = HashMap::new();
        for (uri, prefix) in assignments.iter() {
            if self.registry.get_prefix(uri) == Some(prefix) {
                taken.insert(prefix.to_string(), uri.to_string());
            }
        }

        let pending: Vec<(String, String)> = assignments
            .iter()
            .filter(|(uri, prefix)| self.registry.get_prefix(uri) != Some(*prefix))
            .map(|(u, p)| (u.to_string(), p.to_string()))
            .collect();

        let mut counter = 0usize;
        for (uri, prefix) in pending {
            let clashes = |p: &str, taken: &HashMap<String, String>| {
                taken.get(p).is_some_and(|owner| owner != &uri)
                    || self.registry.get_uri(p).is_some_and(|owner| owner != uri)
            };
            let mut chosen = prefix.clone();
            while clashes(&chosen, &taken) {
                counter += 1;
                chosen = format!("ns{}", counter);
            }
            if chosen != prefix {
                tracing::trace!(%uri, from = %prefix, to = %chosen, "renamed clashing prefix");
                assignments.assign(&uri, &chosen);
            }
            taken.insert(chosen, uri);
        }
    }

    /// Pass 2: apply the assignments and collect the root declarations
    pub fn rewrite(&self, root: &mut XmlElement, assignments: &NamespaceAssignments) {
        let mut declarations: Vec<NamespaceDecl> = Vec::new();
        let mut declare = |prefix: &str, uri: &str| {
            if is_reserved(uri) {
                return;
            }
            // Repeating a root declaration is a no-op
            if declarations
                .iter()
                .any(|d| d.prefix.as_deref() == Some(prefix))
            {
                return;
            }
            declarations.push(NamespaceDecl {
                prefix: Some(prefix.to_string()),
                uri: uri.to_string(),
            });
        };

        {
            let mut stack: Vec<&mut XmlElement> = vec![&mut *root];
            while let Some(element) = stack.pop() {
                element.namespaces.clear();

                if let Some(uri) = element.name.namespace.as_deref() {
                    if let Some(prefix) = assignments.prefix_for(uri) {
                        element.name.prefix = Some(prefix.to_string());
                        declare(prefix, uri);
                    }
                }
                for attr in &mut element.attributes {
                    let Some(uri) = attr.name.namespace.as_deref() else {
                        continue;
                    };
                    if let Some(prefix) = assignments.prefix_for(uri) {
                        attr.name.prefix = Some(prefix.to_string());
                        declare(prefix, uri);
                    }
                }

                for child in element.children.iter_mut().rev() {
                    if let XmlNode::Element(child) = child {
                        stack.push(child);
                    }
                }
            }
        }

        root.namespaces = declarations;
    }
}

/// Declare on the root the bindings of names the rewrite left untouched
fn hoist_remaining(root: &mut XmlElement) {
    let mut extra: Vec<NamespaceDecl> = Vec::new();
    // A nested default moved to the root would capture elements in no namespace
    let has_unqualified = root.descendants().any(|e| e.name.namespace.is_none());

    for (index, element) in root.descendants().enumerate() {
        let nested = index > 0;
        let element_binding = (element.name.prefix.clone(), element.name.namespace.clone());
        let attr_bindings = element
            .attributes
            .iter()
            .filter(|a| a.name.prefix.is_some())
            .map(|a| (a.name.prefix.clone(), a.name.namespace.clone()));

        for (prefix, namespace) in std::iter::once(element_binding).chain(attr_bindings) {
            let Some(uri) = namespace else {
                continue;
            };
            if is_reserved(&uri) || (prefix.is_none() && nested && has_unqualified) {
                continue;
            }
            let free = root
                .namespaces
                .iter()
                .chain(extra.iter())
                .all(|d| d.prefix != prefix);
            if free {
                extra.push(NamespaceDecl { prefix, uri });
            }
        }
    }

    // The default namespace goes first, as a serializer would write it
    let (defaults, prefixed): (Vec<_>, Vec<_>) = extra.into_iter().partition(|d| d.prefix.is_none());
    let mut namespaces = defaults;
    namespaces.append(&mut root.namespaces);
    namespaces.extend(prefixed);
    root.namespaces = namespaces;
}
