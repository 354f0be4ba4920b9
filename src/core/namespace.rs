//! Namespace registry
//!
//! This module holds the table of canonical namespace URI / prefix pairs used
//! by the serializer to qualify element names and by the reformatter to
//! canonicalize prefixes. A registry is built once and only read afterwards.

use crate::core::error::{ConvertError, ConvertResult};
use std::collections::HashMap;

/// Well-known namespaces
pub mod ns {
    /// XML namespace (for xml:lang)
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// Namespace of namespace declarations
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
    /// XML Schema instance namespace
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
    /// Example namespace
    pub const EX: &str = "http://www.example.org/";
    /// BIBFRAME namespace
    pub const BF: &str = "http://id.loc.gov/ontologies/bibframe/#";
    /// RDF namespace
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// MARC relators namespace
    pub const MARCREL: &str = "http://id.loc.gov/vocabulary/relators/";
    /// DCMI terms namespace
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    /// SKOS namespace
    pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
    /// RDF schema namespace as published by the DDB profile
    pub const RDFS: &str = "http://www.w3schools.com/RDF/rdf-schema.xml";
    /// DCAT namespace
    pub const DCAT: &str = "http://www.w3.org/ns/dcat#";
    /// FOAF namespace
    pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
    /// Dublin Core element set namespace
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    /// Europeana Data Model namespace
    pub const EDM: &str = "http://www.europeana.eu/schemas/edm/";
    /// OAI-PMH namespace
    pub const OAI: &str = "http://www.openarchives.org/OAI/2.0/";
    /// OAI-ORE namespace
    pub const ORE: &str = "http://www.openarchives.org/ore/terms/";
    /// Deutsche Digitale Bibliothek EDM extension namespace
    pub const DDB: &str = "http://www.deutsche-digitale-bibliothek.de/edm/";
    /// WGS84 position namespace
    pub const WGS84_POS: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#";
    /// DDB sector vocabulary namespace
    pub const DDB_SECTOR: &str = "http://ddb.vocnet.org/sparte/";
    /// CIDOC CRM namespace
    pub const CRM: &str = "http://www.cidoc-crm.org/rdfs/cidoc_crm_v5.0.2_english_label.rdfs#";
    /// XOAI document namespace
    pub const DOC: &str = "http://www.lyncode.com/xoai";
    /// Europeana Semantic Elements namespace
    pub const EUROPEANA: &str = "http://www.europeana.eu/schemas/ese/";

    /// XML prefix
    pub const XML_PREFIX: &str = "xml";
    /// Prefix of namespace declarations
    pub const XMLNS_PREFIX: &str = "xmlns";
}

/// Canonical (uri, prefix) pairs in registration order
const BUILTIN: &[(&str, &str)] = &[
    (ns::XML, ns::XML_PREFIX),
    (ns::XSI, "xsi"),
    (ns::EX, "ex"),
    (ns::BF, "bf"),
    (ns::RDF, "rdf"),
    (ns::MARCREL, "marcrel"),
    (ns::DCTERMS, "dcterms"),
    (ns::SKOS, "skos"),
    (ns::RDFS, "rdfs"),
    (ns::DCAT, "dcat"),
    (ns::FOAF, "foaf"),
    (ns::DC, "dc"),
    (ns::EDM, "edm"),
    (ns::OAI, "oai"),
    (ns::ORE, "ore"),
    (ns::DDB, "ddb"),
    (ns::WGS84_POS, "wgs84_pos"),
    (ns::DDB_SECTOR, "ddbsector"),
    (ns::CRM, "crm"),
    (ns::XMLNS, ns::XMLNS_PREFIX),
];

/// Bidirectional map of namespace URI and canonical prefix
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    entries: Vec<(String, String)>,
    uri_to_prefix: HashMap<String, usize>,
    prefix_to_uri: HashMap<String, usize>,
}

impl NamespaceRegistry {
    /// Create a registry with the built-in namespaces registered
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (uri, prefix) in BUILTIN {
            registry.insert(uri, prefix);
        }
        registry
    }

    /// Create a registry without any namespaces
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a namespace URI with a prefix
    ///
    /// Fails if either side is already bound to something else.
    /// Registering an identical pair again is a no-op.
    pub fn register(&mut self, uri: &str, prefix: &str) -> ConvertResult<()> {
        if uri.is_empty() {
            return Err(ConvertError::BadParam("URI cannot be empty".to_string()));
        }
        if prefix.is_empty() {
            return Err(ConvertError::BadParam("Prefix cannot be empty".to_string()));
        }
        if let Some(existing_uri) = self.get_uri(prefix) {
            if existing_uri != uri {
                return Err(ConvertError::BadParam(format!(
                    "Prefix '{}' is already registered to '{}'",
                    prefix, existing_uri
                )));
            }
            return Ok(());
        }
        if let Some(existing_prefix) = self.get_prefix(uri) {
            return Err(ConvertError::BadParam(format!(
                "Namespace '{}' is already registered as '{}'",
                uri, existing_prefix
            )));
        }
        self.insert(uri, prefix);
        Ok(())
    }

    fn insert(&mut self, uri: &str, prefix: &str) {
        let index = self.entries.len();
        self.entries.push((uri.to_string(), prefix.to_string()));
        self.uri_to_prefix.insert(uri.to_string(), index);
        self.prefix_to_uri.insert(prefix.to_string(), index);
    }

    /// Get the canonical prefix for a namespace URI
    pub fn get_prefix(&self, uri: &str) -> Option<&str> {
        self.uri_to_prefix
            .get(uri)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Get the URI for a canonical prefix
    pub fn get_uri(&self, prefix: &str) -> Option<&str> {
        self.prefix_to_uri
            .get(prefix)
            .map(|&i| self.entries[i].0.as_str())
    }

    /// Iterate (uri, prefix) pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(uri, prefix)| (uri.as_str(), prefix.as_str()))
    }

    /// Pairs that may appear as `xmlns:prefix` declarations
    ///
    /// The `xml` and `xmlns` bindings are implicit in every document.
    pub fn declarable(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(uri, _)| !is_reserved(uri))
    }

    /// Number of registered namespaces
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check if a namespace URI is bound implicitly and never declared
pub fn is_reserved(uri: &str) -> bool {
    uri == ns::XML || uri == ns::XMLNS
}
