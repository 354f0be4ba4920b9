//! Record models
//!
//! The DC, RDF and OAI-PMH record models, their mapping tables and the
//! fixed content every record carries.

pub mod dc;
pub mod defaults;
pub mod mapping;
pub mod oai;
pub mod rdf;

pub use dc::{DcRecord, DcRecordList};
pub use defaults::RecordDefaults;
pub use mapping::{render, FieldMapping, FieldValue, MappedRecord, Placement, ValueFormat};
pub use oai::{OaiEnvelope, OaiHeader, OaiRecord, OaiRequest};
pub use rdf::{CatalogRecord, Description, RdfRecord};
