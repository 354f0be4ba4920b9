//! Core module
//!
//! This module contains the XML and JSON plumbing shared by the record
//! builders: namespaces, the XML tree with its parser and serializer, the
//! namespace reformatter and JSON field extraction.

pub mod error;
pub mod extract;
pub mod jsonpath;
pub mod namespace;
pub mod node;
pub mod parser;
pub mod reformat;
pub mod serializer;

pub use error::{ConvertError, ConvertResult};
pub use extract::{FieldExtractor, Miss};
pub use jsonpath::{parse_path, PathComponent, PathComponents};
pub use namespace::{is_reserved, ns, NamespaceRegistry};
pub use node::{NamespaceDecl, XmlAttribute, XmlDocument, XmlElement, XmlName, XmlNode};
pub use parser::{XmlParser, MAX_DEPTH};
pub use reformat::{NamespaceAssignments, Reformatter};
pub use serializer::{strip_deletion_markers, write_document, WriteOptions, XmlSerializer};
