//! RDF record builder

use crate::builder::{
    aspect_ratio_text, fsk_text, paths, read_date, read_duration, read_text, Built, RecordBuilder,
    Rule,
};
use crate::core::extract::FieldExtractor;
use crate::records::defaults::RecordDefaults;
use crate::records::rdf::RdfRecord;
use crate::types::TermElement;
use serde_json::Value;

/// Field an RDF rule writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfTarget {
    /// `rdf:about` and the catalog identifier
    About,
    /// `dcterms:alternative`
    Alternative,
    /// `dc:description`
    Description,
    /// FSK rating description, defaulted when absent
    Fsk,
    /// Aspect ratio description
    AspectRatio,
    /// `dcterms:extent`
    Extent,
    /// `dcterms:created`
    Created,
    /// `edm:isShownAt` reference
    IsShownAt,
    /// `bf:Identifier/rdf:value`
    Identifier,
    /// `edm:object` reference
    Object,
    /// `dc:subject`
    Subject,
    /// `dc:title`
    Title,
    /// `dc:type`
    Type,
}

/// RDF rules in application order
pub const RDF_RULES: &[Rule<RdfTarget>] = &[
    Rule::new(paths::EXTERNAL_ID, RdfTarget::About),
    Rule::skip_placeholder(paths::TEASER_TITLE, RdfTarget::Alternative),
    Rule::skip_placeholder(paths::TEASER_COPYRIGHT, RdfTarget::Alternative),
    Rule::skip_placeholder(paths::TEASER_SOURCE, RdfTarget::Alternative),
    Rule::skip_placeholder(paths::TEASER_CAPTION, RdfTarget::Alternative),
    Rule::new(paths::LEAD_PARAGRAPH, RdfTarget::Description),
    Rule::new(paths::FSK, RdfTarget::Fsk),
    Rule::new(paths::ASPECT_RATIO, RdfTarget::AspectRatio),
    Rule::new(paths::DURATION, RdfTarget::Extent),
    Rule::new(paths::EDITORIAL_DATE, RdfTarget::Created),
    Rule::new(paths::URI, RdfTarget::IsShownAt),
    Rule::new(paths::ID, RdfTarget::Identifier),
    Rule::skip_placeholder(paths::TEASER_ORIGINAL, RdfTarget::Object),
    Rule::new(paths::BRAND_TITLE, RdfTarget::Subject),
    Rule::new(paths::TITLE, RdfTarget::Title),
    Rule::new(paths::SUBTITLE, RdfTarget::Title),
    Rule::new(paths::CATEGORY_TITLE, RdfTarget::Type),
];

/// Builds [`RdfRecord`]s
#[derive(Debug, Clone, Default)]
pub struct RdfBuilder {
    defaults: RecordDefaults,
}

impl RdfBuilder {
    /// Create a builder using `defaults` for the fixed content
    pub fn new(defaults: RecordDefaults) -> Self {
        Self { defaults }
    }

    fn term(&self, value: String) -> TermElement {
        TermElement::new(value).with_language(self.defaults.rdf_lang_code.as_str())
    }
}

impl RecordBuilder for RdfBuilder {
    type Record = RdfRecord;

    fn build(&self, doc: &Value) -> Built<RdfRecord> {
        let extractor = FieldExtractor::new(doc);
        let mut record = RdfRecord::new(&self.defaults);
        let mut warnings = Vec::new();
        let desc = &mut record.description;

        for rule in RDF_RULES {
            match rule.target {
                RdfTarget::About => {
                    if let Some(value) = read_text(&extractor, rule) {
                        desc.about.get_or_insert_with(|| value.clone());
                        desc.is_referenced_by.identifier.get_or_insert(value);
                    }
                }
                RdfTarget::Alternative => {
                    if let Some(value) = read_text(&extractor, rule) {
                        desc.alternative.add(self.term(value));
                    }
                }
                RdfTarget::Description => {
                    if let Some(value) = read_text(&extractor, rule) {
                        desc.description.add(self.term(value));
                    }
                }
                RdfTarget::Fsk => {
                    let rating = read_text(&extractor, rule);
                    desc.description.add(self.term(fsk_text(rating.as_deref())));
                }
                RdfTarget::AspectRatio => {
                    if let Some(value) = read_text(&extractor, rule) {
                        desc.description.add(self.term(aspect_ratio_text(&value)));
                    }
                }
                RdfTarget::Extent => {
                    if desc.extent.is_none() {
                        desc.extent = read_duration(&extractor, rule.path);
                    }
                }
                RdfTarget::Created => {
                    if desc.created.is_none() {
                        desc.created = read_date(&extractor, rule.path, &mut warnings);
                    }
                }
                RdfTarget::IsShownAt => {
                    if let Some(value) = read_text(&extractor, rule) {
                        desc.is_shown_at
                            .get_or_insert_with(|| TermElement::resource(value));
                    }
                }
                RdfTarget::Identifier => {
                    if let Some(value) = read_text(&extractor, rule) {
                        if !desc.identifiers.contains(&value) {
                            desc.identifiers.push(value);
                        }
                    }
                }
                RdfTarget::Object => {
                    if let Some(value) = read_text(&extractor, rule) {
                        desc.object.get_or_insert_with(|| TermElement::resource(value));
                    }
                }
                RdfTarget::Subject => {
                    if let Some(value) = read_text(&extractor, rule) {
                        if desc.subject.is_none() {
                            desc.subject = Some(self.term(value));
                        }
                    }
                }
                RdfTarget::Title => {
                    if let Some(value) = read_text(&extractor, rule) {
                        desc.title.add(self.term(value));
                    }
                }
                RdfTarget::Type => {
                    if let Some(value) = read_text(&extractor, rule) {
                        if desc.dc_type.is_none() {
                            desc.dc_type = Some(self.term(value));
                        }
                    }
                }
            }
        }

        tracing::debug!(
            about = desc.about.as_deref().unwrap_or(""),
            titles = desc.title.len(),
            warnings = warnings.len(),
            "built RDF record"
        );

        Built { record, warnings }
    }
}
