//! Dublin Core record
//!
//! A flat `record` element in the OAI-PMH namespace holding DC elements and
//! DCMI terms.

use crate::core::namespace::ns;
use crate::core::node::{XmlElement, XmlName};
use crate::records::defaults::RecordDefaults;
use crate::records::mapping::{FieldMapping, FieldValue, MappedRecord, ValueFormat};
use crate::types::{DedupList, Element, TermElement};
use crate::utils::datetime::DatePattern;
use chrono::NaiveDateTime;

/// `type` of the provider identifier that opens every record
pub const PROVIDER_ID_TYPE: &str = "providerId";

/// Declarations written on every DC record
pub const DC_DECLARATIONS: &[(&str, &str)] = &[
    ("dc", ns::DC),
    ("dcterms", ns::DCTERMS),
    ("doc", ns::DOC),
    ("europeana", ns::EUROPEANA),
];

const DC_FIELDS: &[FieldMapping] = &[
    FieldMapping::element("identifier", ns::DC, "identifier"),
    FieldMapping::element("title", ns::DC, "title"),
    FieldMapping::element("description", ns::DC, "description"),
    FieldMapping::element("subject", ns::DC, "subject"),
    FieldMapping::element("type", ns::DC, "type"),
    FieldMapping::element("alternative", ns::DCTERMS, "alternative"),
    FieldMapping::element("extent", ns::DCTERMS, "extent").with_format(ValueFormat::Duration),
    FieldMapping::element("created", ns::DCTERMS, "created")
        .with_format(ValueFormat::Date(DatePattern::GermanLong)),
    FieldMapping::element("format", ns::DC, "format"),
    FieldMapping::element("language", ns::DC, "language"),
    FieldMapping::element("isPartOf", ns::DCTERMS, "isPartOf"),
    FieldMapping::element("rights", ns::DC, "rights"),
];

/// A Dublin Core record of one media item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DcRecord {
    pub identifier: DedupList<Element>,
    pub title: DedupList<Element>,
    pub description: DedupList<Element>,
    pub subject: DedupList<Element>,
    pub dc_type: DedupList<Element>,
    pub alternative: DedupList<TermElement>,
    /// Duration in seconds
    pub duration: Option<u32>,
    pub editorial_date: Option<NaiveDateTime>,
    pub format: String,
    pub language: String,
    pub is_part_of: Option<String>,
    pub rights: Element,
}

impl DcRecord {
    /// Create a record holding only the fixed content
    pub fn new(defaults: &RecordDefaults) -> Self {
        let mut identifier = DedupList::new();
        identifier.add(Element::new(defaults.provider_id.as_str()).with_type(PROVIDER_ID_TYPE));

        Self {
            identifier,
            title: DedupList::new(),
            description: DedupList::new(),
            subject: DedupList::new(),
            dc_type: DedupList::new(),
            alternative: DedupList::new(),
            duration: None,
            editorial_date: None,
            format: defaults.format.clone(),
            language: defaults.dc_language.clone(),
            is_part_of: None,
            rights: Element::new(defaults.rights_url.as_str()).with_type("binary"),
        }
    }

    /// The mapping table, in output order
    pub fn fields() -> &'static [FieldMapping] {
        DC_FIELDS
    }
}

impl Default for DcRecord {
    fn default() -> Self {
        Self::new(&RecordDefaults::default())
    }
}

impl MappedRecord for DcRecord {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::OAI, "record")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        DC_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "identifier" => self.identifier.iter().map(FieldValue::Element).collect(),
            "title" => self.title.iter().map(FieldValue::Element).collect(),
            "description" => self.description.iter().map(FieldValue::Element).collect(),
            "subject" => self.subject.iter().map(FieldValue::Element).collect(),
            "type" => self.dc_type.iter().map(FieldValue::Element).collect(),
            "alternative" => self.alternative.iter().map(FieldValue::Term).collect(),
            "extent" => self.duration.map(FieldValue::Seconds).into_iter().collect(),
            "created" => self.editorial_date.map(FieldValue::Date).into_iter().collect(),
            "format" => vec![FieldValue::Text(&self.format)],
            "language" => vec![FieldValue::Text(&self.language)],
            "isPartOf" => self.is_part_of.as_deref().map(FieldValue::Text).into_iter().collect(),
            "rights" => vec![FieldValue::Element(&self.rights)],
            _ => Vec::new(),
        }
    }

    fn to_element(&self) -> XmlElement {
        let mut root = crate::records::mapping::render(self);
        for &(prefix, uri) in DC_DECLARATIONS {
            root.declare(Some(prefix), uri);
        }
        root
    }
}

/// A `ListRecords` element holding DC records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DcRecordList {
    records: Vec<DcRecord>,
}

const DC_LIST_FIELDS: &[FieldMapping] = &[FieldMapping::element("record", ns::OAI, "record")];

impl DcRecordList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn push(&mut self, record: DcRecord) {
        self.records.push(record);
    }

    /// The records in insertion order
    pub fn records(&self) -> &[DcRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove all records
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl MappedRecord for DcRecordList {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::OAI, "ListRecords")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        DC_LIST_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "record" => self
                .records
                .iter()
                .map(|r| FieldValue::Record(r.to_element()))
                .collect(),
            _ => Vec::new(),
        }
    }
}
