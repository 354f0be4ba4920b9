//! OAI-PMH envelope
//!
//! Wraps RDF records in an `OAI-PMH` `ListRecords` response. Each record
//! gets a header whose identifier is the catalog identifier of the record
//! and whose datestamp is its `created` date, falling back to a random
//! UUID and the current time.

use crate::core::namespace::ns;
use crate::core::node::{XmlElement, XmlName};
use crate::records::defaults::RecordDefaults;
use crate::records::mapping::{FieldMapping, FieldValue, MappedRecord, ValueFormat};
use crate::records::rdf::RdfRecord;
use crate::utils::datetime::{self, DatePattern};
use chrono::NaiveDateTime;
use uuid::Uuid;

const STAMP: ValueFormat = ValueFormat::Date(DatePattern::OaiDatestamp);

const ENVELOPE_FIELDS: &[FieldMapping] = &[
    FieldMapping::element("responseDate", ns::OAI, "responseDate").with_format(STAMP),
    FieldMapping::element("request", ns::OAI, "request"),
    FieldMapping::element("ListRecords", ns::OAI, "ListRecords"),
];

const REQUEST_FIELDS: &[FieldMapping] = &[
    FieldMapping::attribute("verb", "", "verb"),
    FieldMapping::attribute("metadataPrefix", "", "metadataPrefix"),
    FieldMapping::text("baseUrl"),
];

const RECORD_FIELDS: &[FieldMapping] = &[
    FieldMapping::element("header", ns::OAI, "header"),
    FieldMapping::element("metadata", ns::OAI, "metadata"),
];

const HEADER_FIELDS: &[FieldMapping] = &[
    FieldMapping::element("identifier", ns::OAI, "identifier"),
    FieldMapping::element("datestamp", ns::OAI, "datestamp").with_format(STAMP),
];

/// The `request` element of a response
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OaiRequest {
    pub verb: String,
    pub metadata_prefix: String,
    pub base_url: String,
}

impl MappedRecord for OaiRequest {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::OAI, "request")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        REQUEST_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "verb" => vec![FieldValue::Text(&self.verb)],
            "metadataPrefix" => vec![FieldValue::Text(&self.metadata_prefix)],
            "baseUrl" => vec![FieldValue::Text(&self.base_url)],
            _ => Vec::new(),
        }
    }
}

/// Identifier and datestamp of a harvested record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OaiHeader {
    pub identifier: String,
    pub datestamp: NaiveDateTime,
}

impl MappedRecord for OaiHeader {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::OAI, "header")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        HEADER_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "identifier" => vec![FieldValue::Text(&self.identifier)],
            "datestamp" => vec![FieldValue::Date(self.datestamp)],
            _ => Vec::new(),
        }
    }
}

/// A header plus the RDF record it describes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OaiRecord {
    pub header: OaiHeader,
    pub metadata: RdfRecord,
}

impl OaiRecord {
    /// Wrap `record`, deriving its header
    pub fn new(record: RdfRecord) -> Self {
        let identifier = match record.catalog_identifier() {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        let datestamp = record.created().unwrap_or_else(datetime::now);
        Self {
            header: OaiHeader {
                identifier,
                datestamp,
            },
            metadata: record,
        }
    }
}

impl MappedRecord for OaiRecord {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::OAI, "record")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        RECORD_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "header" => vec![FieldValue::Record(self.header.to_element())],
            "metadata" => vec![FieldValue::Child(self.metadata.to_element())],
            _ => Vec::new(),
        }
    }
}

/// An `OAI-PMH` response listing RDF records
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OaiEnvelope {
    pub response_date: NaiveDateTime,
    pub request: OaiRequest,
    records: Vec<OaiRecord>,
}

impl OaiEnvelope {
    /// Create an empty response dated now
    pub fn new(defaults: &RecordDefaults) -> Self {
        Self {
            response_date: datetime::now(),
            request: OaiRequest {
                verb: defaults.oai_verb.clone(),
                metadata_prefix: defaults.oai_metadata_prefix.clone(),
                base_url: defaults.oai_base_url.clone(),
            },
            records: Vec::new(),
        }
    }

    /// Add a record with a derived header
    pub fn add_record(&mut self, record: RdfRecord) {
        let record = OaiRecord::new(record);
        tracing::debug!(identifier = %record.header.identifier, "added OAI record");
        self.records.push(record);
    }

    /// The records in insertion order
    pub fn records(&self) -> &[OaiRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove all records
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn list_records(&self) -> XmlElement {
        let mut list = XmlElement::new(XmlName::new(ns::OAI, "ListRecords"));
        for record in &self.records {
            list.push_element(record.to_element());
        }
        list
    }
}

impl Default for OaiEnvelope {
    fn default() -> Self {
        Self::new(&RecordDefaults::default())
    }
}

impl MappedRecord for OaiEnvelope {
    fn root_name(&self) -> XmlName {
        XmlName::new(ns::OAI, "OAI-PMH")
    }

    fn mappings(&self) -> &'static [FieldMapping] {
        ENVELOPE_FIELDS
    }

    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
        match field {
            "responseDate" => vec![FieldValue::Date(self.response_date)],
            "request" => vec![FieldValue::Record(self.request.to_element())],
            "ListRecords" => vec![FieldValue::Record(self.list_records())],
            _ => Vec::new(),
        }
    }
}
