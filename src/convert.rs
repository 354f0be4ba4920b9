//! Conversion pipeline
//!
//! [`Converter`] ties the pieces together: it parses a source document,
//! runs the record builders, serializes the records and optionally passes
//! the result through the [`Reformatter`].
//!
//! # Example
//!
//! ```rust
//! use zdf2dc::{Converter, Variant};
//!
//! # fn main() -> Result<(), zdf2dc::ConvertError> {
//! let converter = Converter::new();
//! let xml = converter.convert_str(r#"{"title": "Beispiel"}"#, Variant::Dc)?;
//! assert!(xml.contains("<dc:title xml:lang=\"deu\">Beispiel</dc:title>"));
//! # Ok(())
//! # }
//! ```

use crate::builder::{Built, DcBuilder, RdfBuilder, RecordBuilder};
use crate::core::error::{ConvertError, ConvertResult};
use crate::core::namespace::{ns, NamespaceRegistry};
use crate::core::reformat::Reformatter;
use crate::core::serializer::XmlSerializer;
use crate::records::dc::{DcRecord, DcRecordList};
use crate::records::defaults::RecordDefaults;
use crate::records::mapping::MappedRecord;
use crate::records::oai::OaiEnvelope;
use crate::records::rdf::RdfRecord;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Output schema of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Flat Dublin Core record
    Dc,
    /// RDF/EDM record
    Rdf,
    /// RDF record wrapped in an OAI-PMH response
    Oai,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Dc => "dc",
            Variant::Rdf => "rdf",
            Variant::Oai => "oai",
        })
    }
}

impl FromStr for Variant {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dc" => Ok(Variant::Dc),
            "rdf" | "edm" => Ok(Variant::Rdf),
            "oai" | "oai-pmh" => Ok(Variant::Oai),
            _ => Err(ConvertError::BadParam(format!("unknown output variant: {}", s))),
        }
    }
}

/// Converts source documents into XML metadata
///
/// A converter holds no mutable state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Converter {
    registry: Arc<NamespaceRegistry>,
    defaults: RecordDefaults,
    reformatter: Reformatter,
    reformat: bool,
}

impl Converter {
    /// Create a converter with the built-in namespaces and production defaults
    pub fn new() -> Self {
        let registry = Arc::new(NamespaceRegistry::new());
        Self {
            reformatter: Reformatter::new(Arc::clone(&registry)),
            registry,
            defaults: RecordDefaults::default(),
            reformat: false,
        }
    }

    /// Use other fixed record content
    pub fn with_defaults(mut self, defaults: RecordDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Use another namespace registry for serialization and reformatting
    pub fn with_registry(mut self, registry: Arc<NamespaceRegistry>) -> Self {
        self.reformatter = Reformatter::new(Arc::clone(&registry));
        self.registry = registry;
        self
    }

    /// Pass every result through the namespace reformatter
    pub fn with_reformat(mut self, reformat: bool) -> Self {
        self.reformat = reformat;
        self
    }

    /// The namespace registry
    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    /// The fixed record content
    pub fn defaults(&self) -> &RecordDefaults {
        &self.defaults
    }

    /// Parse a source document
    pub fn parse_json(bytes: &[u8]) -> ConvertResult<Value> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse a source document from text
    pub fn parse_json_str(json: &str) -> ConvertResult<Value> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a DC record
    pub fn dc_record(&self, doc: &Value) -> Built<DcRecord> {
        DcBuilder::new(self.defaults.clone()).build(doc)
    }

    /// Build an RDF record
    pub fn rdf_record(&self, doc: &Value) -> Built<RdfRecord> {
        RdfBuilder::new(self.defaults.clone()).build(doc)
    }

    /// Build an OAI-PMH response holding one RDF record per document
    pub fn oai_envelope<'a, I>(&self, docs: I) -> OaiEnvelope
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let builder = RdfBuilder::new(self.defaults.clone());
        let mut envelope = OaiEnvelope::new(&self.defaults);
        for doc in docs {
            envelope.add_record(builder.build(doc).record);
        }
        envelope
    }

    /// Serialize a DC record
    pub fn dc_xml(&self, record: &DcRecord) -> ConvertResult<String> {
        self.finish(self.dc_serializer().serialize(&record.to_element())?)
    }

    /// Serialize a list of DC records
    pub fn dc_list_xml(&self, list: &DcRecordList) -> ConvertResult<String> {
        self.finish(self.dc_serializer().serialize(&list.to_element())?)
    }

    /// Serialize an RDF record
    pub fn rdf_xml(&self, record: &RdfRecord) -> ConvertResult<String> {
        self.finish(self.serializer().serialize(&record.to_element())?)
    }

    /// Serialize an OAI-PMH response
    pub fn oai_xml(&self, envelope: &OaiEnvelope) -> ConvertResult<String> {
        self.finish(self.serializer().serialize(&envelope.to_element())?)
    }

    /// Convert a parsed document to DC XML
    pub fn to_dc_xml(&self, doc: &Value) -> ConvertResult<String> {
        self.dc_xml(&self.dc_record(doc).record)
    }

    /// Convert a parsed document to RDF XML
    pub fn to_rdf_xml(&self, doc: &Value) -> ConvertResult<String> {
        self.rdf_xml(&self.rdf_record(doc).record)
    }

    /// Convert a parsed document to an OAI-PMH response
    pub fn to_oai_xml(&self, doc: &Value) -> ConvertResult<String> {
        self.oai_xml(&self.oai_envelope([doc]))
    }

    /// Convert a parsed document to `variant`
    pub fn convert_value(&self, doc: &Value, variant: Variant) -> ConvertResult<String> {
        match variant {
            Variant::Dc => self.to_dc_xml(doc),
            Variant::Rdf => self.to_rdf_xml(doc),
            Variant::Oai => self.to_oai_xml(doc),
        }
    }

    /// Convert a raw document to `variant`
    ///
    /// Fails with [`ConvertError::JsonParse`] before any field is read if
    /// `bytes` is not valid JSON.
    pub fn convert(&self, bytes: &[u8], variant: Variant) -> ConvertResult<String> {
        let doc = Self::parse_json(bytes)?;
        self.convert_value(&doc, variant)
    }

    /// Convert a document given as text to `variant`
    pub fn convert_str(&self, json: &str, variant: Variant) -> ConvertResult<String> {
        self.convert(json.as_bytes(), variant)
    }

    /// Reformat any XML text against this converter's registry
    pub fn reformat(&self, xml: &str) -> ConvertResult<String> {
        self.reformatter.reformat(xml)
    }

    /// Read a document from `src` and write the converted XML to `dst`
    pub fn convert_file(
        &self,
        src: impl AsRef<Path>,
        dst: impl AsRef<Path>,
        variant: Variant,
    ) -> ConvertResult<()> {
        let src = src.as_ref();
        let dst = dst.as_ref();
        let bytes = std::fs::read(src)?;
        let xml = self.convert(&bytes, variant)?;
        std::fs::write(dst, xml.as_bytes())?;
        tracing::debug!(
            src = %src.display(),
            dst = %dst.display(),
            %variant,
            bytes = xml.len(),
            "converted file"
        );
        Ok(())
    }

    fn serializer(&self) -> XmlSerializer {
        XmlSerializer::new(Arc::clone(&self.registry))
    }

    fn dc_serializer(&self) -> XmlSerializer {
        self.serializer().with_default_namespace(ns::OAI)
    }

    fn finish(&self, xml: String) -> ConvertResult<String> {
        if self.reformat {
            self.reformatter.reformat(&xml)
        } else {
            Ok(xml)
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_converter_is_send_sync() {
        assert_send_sync::<Converter>();
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("DC".parse::<Variant>().unwrap(), Variant::Dc);
        assert_eq!("edm".parse::<Variant>().unwrap(), Variant::Rdf);
        assert_eq!("oai-pmh".parse::<Variant>().unwrap(), Variant::Oai);
        assert!(matches!("marc".parse::<Variant>(), Err(ConvertError::BadParam(_))));
        assert_eq!(Variant::Oai.to_string(), "oai");
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let converter = Converter::new();
        let err = converter.convert(b"{\"title\": ", Variant::Dc).unwrap_err();
        assert!(matches!(err, ConvertError::JsonParse(_)));
    }

    #[test]
    fn test_dc_output_uses_default_namespace() {
        let xml = Converter::new()
            .to_dc_xml(&json!({"title": "Beispiel"}))
            .unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<record xmlns=\"http://www.openarchives.org/OAI/2.0/\""));
        assert!(xml.contains("xmlns:dc=\"http://purl.org/dc/elements/1.1/\""));
    }

    #[test]
    fn test_rdf_output_has_no_markers() {
        let xml = Converter::new().to_rdf_xml(&json!({"externalId": "SCMS_1"})).unwrap();
        assert!(!xml.contains("_DELETE_"));
        assert!(xml.contains("<rdf:type rdf:resource=\"http://purl.org/dc/dcmitype/MovingImage\"/>"));
        assert!(xml.contains("rdf:about=\"SCMS_1\""));
    }

    #[test]
    fn test_marker_text_in_values_is_kept() {
        let xml = Converter::new()
            .to_rdf_xml(&json!({"title": "Projekt_DELETE_X", "externalId": "a_DELETE_b"}))
            .unwrap();
        assert!(xml.contains(r#"<rdf:Description rdf:about="a_DELETE_b">"#));
        assert!(xml.contains(r#"<dc:title xml:lang="de">Projekt_DELETE_X</dc:title>"#));
        assert!(xml.contains("<rdf:type rdf:resource="));
        assert!(!xml.contains("_DELETE_type"));
    }

    #[test]
    fn test_custom_defaults() {
        let converter =
            Converter::new().with_defaults(RecordDefaults::default().with_provider_id("oid42"));
        let record = converter.dc_record(&json!({})).record;
        assert_eq!(record.identifier.first().map(|e| e.value()), Some("oid42"));
        assert_eq!(converter.defaults().provider_id, "oid42");
    }

    #[test]
    fn test_reformat_step() {
        let converter = Converter::new().with_reformat(true);
        let xml = converter.to_rdf_xml(&json!({"title": "T"})).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        // Only namespaces the record uses survive
        assert!(!xml.contains("xmlns:marcrel"));
        assert!(xml.contains("xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\""));
        assert_eq!(converter.reformat(&xml).unwrap(), xml);
    }

    #[test]
    fn test_oai_envelope_from_documents() {
        let docs = vec![json!({"externalId": "A"}), json!({"externalId": "B"})];
        let converter = Converter::new();
        let envelope = converter.oai_envelope(&docs);
        assert_eq!(envelope.len(), 2);
        let ids: Vec<&str> = envelope
            .records()
            .iter()
            .map(|r| r.header.identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
