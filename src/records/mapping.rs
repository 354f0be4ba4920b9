//! Field mapping tables
//!
//! Every record model describes its XML shape as a static table of
//! [`FieldMapping`]s, one per field in output order. [`render`] walks the
//! table, asks the record for the values of each field and builds the
//! element tree, so the shape of each schema is plain data that can be
//! inspected and tested on its own.

use crate::core::namespace::ns;
use crate::core::node::{XmlElement, XmlName};
use crate::types::{Element, TermElement};
use crate::utils::datetime::{format_date, DatePattern};
use crate::utils::format::format_duration;
use chrono::NaiveDateTime;

/// Where a field ends up in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A child element per value
    Element,
    /// An attribute of the record element
    Attribute,
    /// Text content of the record element
    Text,
}

/// How scalar values are turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Used as-is
    Plain,
    /// Seconds rendered as a clock string
    Duration,
    /// Date rendered with a pattern
    Date(DatePattern),
}

/// One row of a mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name, as known to the record model
    pub field: &'static str,
    /// Namespace URI of the element or attribute, empty for none
    pub namespace: &'static str,
    /// Local name of the element or attribute
    pub local: &'static str,
    /// Element, attribute or text
    pub placement: Placement,
    /// Scalar conversion
    pub format: ValueFormat,
}

impl FieldMapping {
    /// A field rendered as child elements
    pub const fn element(field: &'static str, namespace: &'static str, local: &'static str) -> Self {
        Self {
            field,
            namespace,
            local,
            placement: Placement::Element,
            format: ValueFormat::Plain,
        }
    }

    /// A field rendered as an attribute of the record element
    pub const fn attribute(field: &'static str, namespace: &'static str, local: &'static str) -> Self {
        Self {
            field,
            namespace,
            local,
            placement: Placement::Attribute,
            format: ValueFormat::Plain,
        }
    }

    /// A field rendered as the text of the record element
    pub const fn text(field: &'static str) -> Self {
        Self {
            field,
            namespace: "",
            local: "",
            placement: Placement::Text,
            format: ValueFormat::Plain,
        }
    }

    /// Set the scalar conversion
    pub const fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    /// The qualified name of the element or attribute
    pub fn name(&self) -> XmlName {
        if self.namespace.is_empty() {
            XmlName::local(self.local)
        } else {
            XmlName::new(self.namespace, self.local)
        }
    }
}

/// A value handed to [`render`] for one field
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    /// Plain text
    Text(&'a str),
    /// Element with `type` and `xml:lang` attributes
    Element(&'a Element),
    /// Element with `dc:type`, `xml:lang` and `rdf:resource` attributes
    Term(&'a TermElement),
    /// Duration in seconds
    Seconds(u32),
    /// Date/time
    Date(NaiveDateTime),
    /// Element wrapped by the mapped element
    Child(XmlElement),
    /// Rendered sub-record that becomes the mapped element
    Record(XmlElement),
}

/// A record model with a mapping table
pub trait MappedRecord {
    /// Name of the record element
    fn root_name(&self) -> XmlName;

    /// Fields in output order
    fn mappings(&self) -> &'static [FieldMapping];

    /// Values of a field, empty if unset
    fn field_values(&self, field: &str) -> Vec<FieldValue<'_>>;

    /// Render the record to an element tree
    fn to_element(&self) -> XmlElement {
        render(self)
    }
}

/// Build the element tree of a record from its mapping table
///
/// Unset fields and values that would render empty are left out.
pub fn render<R: MappedRecord + ?Sized>(record: &R) -> XmlElement {
    let mut root = XmlElement::new(record.root_name());

    for mapping in record.mappings() {
        for value in record.field_values(mapping.field) {
            match mapping.placement {
                Placement::Attribute => {
                    if let Some(text) = scalar_text(&value, mapping.format) {
                        root.set_attribute(mapping.name(), text);
                    }
                }
                Placement::Text => {
                    if let Some(text) = scalar_text(&value, mapping.format) {
                        root.push_text(text);
                    }
                }
                Placement::Element => {
                    if let Some(element) = value_element(mapping, value) {
                        root.push_element(element);
                    }
                }
            }
        }
    }

    root
}

fn scalar_text(value: &FieldValue<'_>, format: ValueFormat) -> Option<String> {
    match (value, format) {
        (FieldValue::Text(text), _) => Some(text.to_string()),
        (FieldValue::Seconds(seconds), ValueFormat::Duration) => format_duration(Some(*seconds)),
        (FieldValue::Seconds(seconds), _) => Some(seconds.to_string()),
        (FieldValue::Date(dt), ValueFormat::Date(pattern)) => Some(format_date(dt, pattern)),
        (FieldValue::Date(dt), _) => Some(format_date(dt, DatePattern::OaiDatestamp)),
        (FieldValue::Element(element), _) => Some(element.value().to_string()),
        (FieldValue::Term(term), _) => term.value().map(str::to_string),
        (FieldValue::Child(_) | FieldValue::Record(_), _) => None,
    }
}

fn value_element(mapping: &FieldMapping, value: FieldValue<'_>) -> Option<XmlElement> {
    let mut element = XmlElement::new(mapping.name());
    match value {
        FieldValue::Element(item) => {
            if let Some(element_type) = item.element_type() {
                element.set_attribute(XmlName::local("type"), element_type);
            }
            if let Some(lang) = item.language() {
                element.set_attribute(XmlName::new(ns::XML, "lang"), lang);
            }
            element.push_text(item.value());
        }
        FieldValue::Term(term) => {
            if let Some(element_type) = term.element_type() {
                element.set_attribute(XmlName::new(ns::DC, "type"), element_type);
            }
            if let Some(lang) = term.language() {
                element.set_attribute(XmlName::new(ns::XML, "lang"), lang);
            }
            if let Some(resource) = term.resource_uri() {
                element.set_attribute(XmlName::new(ns::RDF, "resource"), resource);
            }
            if let Some(text) = term.value() {
                element.push_text(text);
            }
        }
        FieldValue::Child(child) => {
            if child.is_empty() {
                return None;
            }
            element.push_element(child);
        }
        FieldValue::Record(mut record) => {
            record.name = mapping.name();
            element = record;
        }
        scalar => {
            let text = scalar_text(&scalar, mapping.format)?;
            element.push_text(text);
        }
    }

    (!element.is_empty()).then_some(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::datetime::parse_date;

    struct Sample {
        id: Option<String>,
        titles: Vec<Element>,
        seconds: Option<u32>,
        created: Option<NaiveDateTime>,
        link: TermElement,
    }

    const SAMPLE_FIELDS: &[FieldMapping] = &[
        FieldMapping::attribute("id", ns::RDF, "about"),
        FieldMapping::element("title", ns::DC, "title"),
        FieldMapping::element("extent", ns::DCTERMS, "extent").with_format(ValueFormat::Duration),
        FieldMapping::element("created", ns::DCTERMS, "created")
            .with_format(ValueFormat::Date(DatePattern::IsoDate)),
        FieldMapping::element("link", ns::EDM, "isShownAt"),
    ];

    impl MappedRecord for Sample {
        fn root_name(&self) -> XmlName {
            XmlName::new(ns::RDF, "Description")
        }

        fn mappings(&self) -> &'static [FieldMapping] {
            SAMPLE_FIELDS
        }

        fn field_values(&self, field: &str) -> Vec<FieldValue<'_>> {
            match field {
                "id" => self.id.as_deref().map(FieldValue::Text).into_iter().collect(),
                "title" => self.titles.iter().map(FieldValue::Element).collect(),
                "extent" => self.seconds.map(FieldValue::Seconds).into_iter().collect(),
                "created" => self.created.map(FieldValue::Date).into_iter().collect(),
                "link" => vec![FieldValue::Term(&self.link)],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn test_render_follows_table_order() {
        let sample = Sample {
            id: Some("urn:1".to_string()),
            titles: vec![
                Element::new("\"Eins\"").with_language("de"),
                Element::new("Zwei").with_type("sub"),
            ],
            seconds: Some(3600),
            created: parse_date("2021-05-12T18:00:00").ok(),
            link: TermElement::resource("http://example.com/"),
        };

        let root = sample.to_element();
        assert_eq!(root.attribute(Some(ns::RDF), "about"), Some("urn:1"));

        let names: Vec<&str> = root.elements().map(|e| e.name.local.as_str()).collect();
        assert_eq!(names, vec!["title", "title", "extent", "created", "isShownAt"]);

        let titles: Vec<&XmlElement> = root.find_all(ns::DC, "title").collect();
        assert_eq!(titles[0].text(), "Eins");
        assert_eq!(titles[0].attribute(Some(ns::XML), "lang"), Some("de"));
        assert_eq!(titles[1].attribute(None, "type"), Some("sub"));

        assert_eq!(root.find(ns::DCTERMS, "extent").map(|e| e.text()), Some("01:00:00".to_string()));
        assert_eq!(root.find(ns::DCTERMS, "created").map(|e| e.text()), Some("2021-05-12".to_string()));
        let link = root.find(ns::EDM, "isShownAt").unwrap();
        assert_eq!(link.attribute(Some(ns::RDF), "resource"), Some("http://example.com/"));
        assert!(link.children.is_empty());
    }

    #[test]
    fn test_render_skips_unset_and_empty() {
        let sample = Sample {
            id: None,
            titles: Vec::new(),
            seconds: None,
            created: None,
            link: TermElement::default(),
        };
        let root = sample.to_element();
        assert!(root.is_empty());
    }

    #[test]
    fn test_mapping_names() {
        assert_eq!(SAMPLE_FIELDS[0].name(), XmlName::new(ns::RDF, "about"));
        assert_eq!(
            FieldMapping::attribute("verb", "", "verb").name(),
            XmlName::local("verb")
        );
    }
}
