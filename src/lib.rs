//! # zdf2dc
//!
//! Converts ZDF media documents (JSON) into XML metadata records:
//!
//! - a flat Dublin Core record in the OAI-PMH namespace,
//! - an RDF/EDM record with a nested catalog record,
//! - an OAI-PMH `ListRecords` response wrapping RDF records.
//!
//! It also ships a namespace [`Reformatter`] that rewrites any XML document
//! to canonical prefixes with every used namespace declared once on the root.
//!
//! ## Quick start
//!
//! ```rust
//! use zdf2dc::{Converter, Variant};
//!
//! # fn main() -> Result<(), zdf2dc::ConvertError> {
//! let json = r#"{
//!     "externalId": "SCMS_1234",
//!     "title": "Beispiel",
//!     "mainVideoContent": {
//!         "http://zdf.de/rels/target": { "duration": 2700, "fsk": "none" }
//!     }
//! }"#;
//!
//! let converter = Converter::new();
//! let dc = converter.convert_str(json, Variant::Dc)?;
//! assert!(dc.contains("<dcterms:extent>45:00</dcterms:extent>"));
//!
//! let rdf = converter.convert_str(json, Variant::Rdf)?;
//! assert!(rdf.contains(r#"rdf:about="SCMS_1234""#));
//! # Ok(())
//! # }
//! ```
//!
//! ## Building records by hand
//!
//! ```rust
//! use serde_json::json;
//! use zdf2dc::{DcBuilder, RecordBuilder};
//!
//! let built = DcBuilder::default().build(&json!({ "title": "Beispiel" }));
//! assert!(built.warnings.is_empty());
//! assert_eq!(built.record.title.len(), 1);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Unparsable dates are reported at `warn`, rule and reformat statistics at
//! `debug`, per-field and per-node decisions at `trace`.

pub mod builder;
pub mod convert;
pub mod core;
pub mod records;
pub mod types;
pub mod utils;

pub use crate::builder::{BuildWarning, Built, DcBuilder, RdfBuilder, RecordBuilder};
pub use crate::convert::{Converter, Variant};
pub use crate::core::{
    ns, ConvertError, ConvertResult, FieldExtractor, NamespaceRegistry, Reformatter, XmlElement,
    XmlParser, XmlSerializer,
};
pub use crate::records::{
    DcRecord, DcRecordList, MappedRecord, OaiEnvelope, RdfRecord, RecordDefaults,
};
pub use crate::types::{DedupList, Element, TermElement};
