//! RDF/EDM record
//!
//! `rdf:RDF` holding one `rdf:Description` of the media item, with a nested
//! `dcat:CatalogRecord` describing the metadata record itself.
//!
//! The description ends with an `rdf:type` reference. It is emitted under
//! the marker name `_DELETE_type` and renamed by
//! [`strip_deletion_markers`](crate::core::serializer::strip_deletion_markers)
//! before the tree is written.

use crate::core::namespace::ns;
use crate::core::node::{XmlElement, XmlName};
use crate::records::defaults::RecordDefaults;
use crate::records::mapping::{FieldMapping, FieldValue, MappedRecord, ValueFormat};
use crate::types::{DedupList, TermElement};
use crate::utils::datetime::DatePattern;
use chrono::NaiveDateTime;

const RDF_FIELDS: &[FieldMapping] = &[FieldMapping::element("description", ns::RDF, "Description")];

const DESCRIPTION_FIELDS: &[FieldMapping] = &[
    FieldMapping::attribute("about", ns::RDF, "about"),
    FieldMapping::element("isReferencedBy", ns::DCTERMS, "isReferencedBy"),
    FieldMapping::element("alternative", ns::DCTERMS, "alternative"),
    FieldMapping::element("description", ns::DC, "description"),
    FieldMapping::element("extent", ns::DCTERMS, "extent").with_format(ValueFormat::Duration),
    FieldMapping::element("created", ns::DCTERMS, "created")
        .with_format(ValueFormat::Date(DatePattern::IsoDate)),
    FieldMapping::element("format", ns::DC, "format"),
    FieldMapping::element("isShownAt", ns::EDM, "isShownAt"),
    FieldMapping::element("identifier", ns::DC, "identifier"),
    FieldMapping::element("object", ns::EDM, "object"),
    FieldMapping::element("language", ns::DC, "language"),
    FieldMapping::element("licence", ns::DCTERMS, "licence"),
    FieldMapping::element("subject", ns::DC, "subject"),
    FieldMapping::element("title", ns::DC, "title"),
    FieldMapping::element("type", ns::DC, "type"),
    FieldMapping::element("rdfType", ns::RDF, "_DELETE_type"),
];

const CATALOG_FIELDS: &[FieldMapping] = &[
    FieldMapping::element("identifier", ns::DC, "identifier"),
    FieldMapping::element("creator", ns::DC, "creator"),
    FieldMapping::element("licence", ns::DCTERMS, "licence"),
];

/// The catalog record describing the metadata itself
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CatalogRecord {
    pub identifier: Option<String>,
    pub creator: String,
    pub licence: TermElement,
}

impl CatalogRecord {
    /// Create a catalog record with the fixed creator and licence
    pub fn new(defaults: &RecordDefaults) -> Self {
        Self {
            identifier: None,
            creator: defaults.provider_id.clone(),
            licence: TermElement::resource(defaults.catalog_licence_url.as_str()),
        }
    }
}

impl MappedRecord for CatalogRecord {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::DCAT, "CatalogRecord")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        CATALOG_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "identifier" => self.identifier.as_deref().map(FieldValue::Text).into_iter().collect(),
            "creator" => vec![FieldValue::Text(&self.creator)],
            "licence" => vec![FieldValue::Term(&self.licence)],
            _ => Vec::new(),
        }
    }
}

/// The description of one media item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Description {
    pub about: Option<String>,
    pub is_referenced_by: CatalogRecord,
    pub alternative: DedupList<TermElement>,
    pub description: DedupList<TermElement>,
    /// Duration in seconds
    pub extent: Option<u32>,
    pub created: Option<NaiveDateTime>,
    pub format: String,
    pub is_shown_at: Option<TermElement>,
    /// Values of `bf:Identifier/rdf:value`
    pub identifiers: Vec<String>,
    pub object: Option<TermElement>,
    pub language: String,
    pub licence: TermElement,
    pub subject: Option<TermElement>,
    pub title: DedupList<TermElement>,
    pub dc_type: Option<TermElement>,
    pub rdf_type: TermElement,
}

impl Description {
    /// Create a description holding only the fixed content
    pub fn new(defaults: &RecordDefaults) -> Self {
        Self {
            about: None,
            is_referenced_by: CatalogRecord::new(defaults),
            alternative: DedupList::new(),
            description: DedupList::new(),
            extent: None,
            created: None,
            format: defaults.format.clone(),
            is_shown_at: None,
            identifiers: Vec::new(),
            object: None,
            language: defaults.rdf_language.clone(),
            licence: TermElement::resource(defaults.rights_url.as_str()),
            subject: None,
            title: DedupList::new(),
            dc_type: None,
            rdf_type: TermElement::resource(defaults.rdf_type.as_str()),
        }
    }

    /// `bf:Identifier` holding one `rdf:value` per identifier
    fn bf_identifier(&self) -> XmlElement {
        let mut identifier = XmlElement::new(XmlName::new(ns::BF, "Identifier"));
        for value in &self.identifiers {
            identifier.push_element(XmlElement::with_text(
                XmlName::new(ns::RDF, "value"),
                value.as_str(),
            ));
        }
        identifier
    }
}

impl MappedRecord for Description {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::RDF, "Description")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        DESCRIPTION_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "about" => self.about.as_deref().map(FieldValue::Text).into_iter().collect(),
            "isReferencedBy" => vec![FieldValue::Child(self.is_referenced_by.to_element())],
            "alternative" => self.alternative.iter().map(FieldValue::Term).collect(),
            "description" => self.description.iter().map(FieldValue::Term).collect(),
            "extent" => self.extent.map(FieldValue::Seconds).into_iter().collect(),
            "created" => self.created.map(FieldValue::Date).into_iter().collect(),
            "format" => vec![FieldValue::Text(&self.format)],
            "isShownAt" => self.is_shown_at.iter().map(FieldValue::Term).collect(),
            "identifier" => vec![FieldValue::Child(self.bf_identifier())],
            "object" => self.object.iter().map(FieldValue::Term).collect(),
            "language" => vec![FieldValue::Text(&self.language)],
            "licence" => vec![FieldValue::Term(&self.licence)],
            "subject" => self.subject.iter().map(FieldValue::Term).collect(),
            "title" => self.title.iter().map(FieldValue::Term).collect(),
            "type" => self.dc_type.iter().map(FieldValue::Term).collect(),
            "rdfType" => vec![FieldValue::Term(&self.rdf_type)],
            _ => Vec::new(),
        }
    }
}

/// An RDF record of one media item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RdfRecord {
    pub description: Description,
}

impl RdfRecord {
    /// Create a record holding only the fixed content
    pub fn new(defaults: &RecordDefaults) -> Self {
        Self {
            description: Description::new(defaults),
        }
    }

    /// The catalog identifier, if set and not blank
    pub fn catalog_identifier(&self) -> Option<&str> {
        self.description
            .is_referenced_by
            .identifier
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    /// The `created` date
    pub fn created(&self) -> Option<NaiveDateTime> {
        self.description.created
    }
}

impl Default for RdfRecord {
    fn default() -> Self {
        Self::new(&RecordDefaults::default())
    }
}

impl MappedRecord for RdfRecord {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::RDF, "RDF")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        RDF_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "description" => vec![FieldValue::Record(self.description.to_element())],
            _ => Vec::new(),
        }
    }
}
