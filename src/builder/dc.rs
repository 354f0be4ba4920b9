//! Dublin Core record builder

use crate::builder::{
    aspect_ratio_text, fsk_text, paths, read_date, read_duration, read_text, Built, RecordBuilder,
    Rule,
};
use crate::core::extract::FieldExtractor;
use crate::records::dc::DcRecord;
use crate::records::defaults::RecordDefaults;
use crate::types::{Element, TermElement};
use serde_json::Value;

/// `type` of descriptive DC elements
const OBJECT_TYPE: &str = "object";

/// Field a DC rule writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcTarget {
    /// `dc:identifier` with the given `type`
    Identifier(&'static str),
    /// `dcterms:created`
    Created,
    /// `dc:title`
    Title,
    /// `dc:description` with type `object`
    Description,
    /// `dcterms:alternative`
    Alternative,
    /// `dc:type` with type `object`
    Type,
    /// `dc:subject`
    Subject,
    /// `dcterms:extent`
    Extent,
    /// FSK rating description, defaulted when absent
    Fsk,
    /// Aspect ratio description
    AspectRatio,
}

/// DC rules in application order
pub const DC_RULES: &[Rule<DcTarget>] = &[
    Rule::new(paths::EXTERNAL_ID, DcTarget::Identifier("providerItemId")),
    Rule::new(paths::URI, DcTarget::Identifier("uri")),
    Rule::new(paths::EDITORIAL_DATE, DcTarget::Created),
    Rule::new(paths::SHARING_URL, DcTarget::Identifier("url")),
    Rule::new(paths::ID, DcTarget::Identifier("id")),
    Rule::new(paths::TITLE, DcTarget::Title),
    Rule::new(paths::SUBTITLE, DcTarget::Title),
    Rule::new(paths::LEAD_PARAGRAPH, DcTarget::Description),
    Rule::skip_placeholder(paths::TEASER_ORIGINAL, DcTarget::Identifier("binary")),
    Rule::skip_placeholder(paths::TEASER_TITLE, DcTarget::Alternative),
    Rule::skip_placeholder(paths::TEASER_COPYRIGHT, DcTarget::Alternative),
    Rule::skip_placeholder(paths::TEASER_SOURCE, DcTarget::Alternative),
    Rule::skip_placeholder(paths::TEASER_CAPTION, DcTarget::Alternative),
    Rule::new(paths::CATEGORY_TITLE, DcTarget::Type),
    Rule::new(paths::BRAND_TITLE, DcTarget::Subject),
    Rule::new(paths::DURATION, DcTarget::Extent),
    Rule::new(paths::FSK, DcTarget::Fsk),
    Rule::new(paths::ASPECT_RATIO, DcTarget::AspectRatio),
];

/// Builds [`DcRecord`]s
#[derive(Debug, Clone, Default)]
pub struct DcBuilder {
    defaults: RecordDefaults,
}

impl DcBuilder {
    /// Create a builder using `defaults` for the fixed content
    pub fn new(defaults: RecordDefaults) -> Self {
        Self { defaults }
    }

    fn element(&self, value: String) -> Element {
        Element::new(value).with_language(self.defaults.dc_lang_code.as_str())
    }
}

impl RecordBuilder for DcBuilder {
    type Record = DcRecord;

    fn build(&self, doc: &Value) -> Built<DcRecord> {
        let extractor = FieldExtractor::new(doc);
        let mut record = DcRecord::new(&self.defaults);
        let mut warnings = Vec::new();

        for rule in DC_RULES {
            match rule.target {
                DcTarget::Identifier(id_type) => {
                    if let Some(value) = read_text(&extractor, rule) {
                        record.identifier.add(Element::new(value).with_type(id_type));
                    }
                }
                DcTarget::Created => {
                    if record.editorial_date.is_none() {
                        record.editorial_date = read_date(&extractor, rule.path, &mut warnings);
                    }
                }
                DcTarget::Title => {
                    if let Some(value) = read_text(&extractor, rule) {
                        record.title.add(self.element(value));
                    }
                }
                DcTarget::Description => {
                    if let Some(value) = read_text(&extractor, rule) {
                        record
                            .description
                            .add(self.element(value).with_type(OBJECT_TYPE));
                    }
                }
                DcTarget::Alternative => {
                    if let Some(value) = read_text(&extractor, rule) {
                        record.alternative.add(
                            TermElement::new(value)
                                .with_language(self.defaults.dc_lang_code.as_str()),
                        );
                    }
                }
                DcTarget::Type => {
                    if let Some(value) = read_text(&extractor, rule) {
                        record.dc_type.add(self.element(value).with_type(OBJECT_TYPE));
                    }
                }
                DcTarget::Subject => {
                    if let Some(value) = read_text(&extractor, rule) {
                        record.subject.add(self.element(value));
                    }
                }
                DcTarget::Extent => {
                    if record.duration.is_none() {
                        record.duration = read_duration(&extractor, rule.path);
                    }
                }
                DcTarget::Fsk => {
                    let rating = read_text(&extractor, rule);
                    record
                        .description
                        .add(self.element(fsk_text(rating.as_deref())).with_type(OBJECT_TYPE));
                }
                DcTarget::AspectRatio => {
                    if let Some(value) = read_text(&extractor, rule) {
                        record
                            .description
                            .add(self.element(aspect_ratio_text(&value)).with_type(OBJECT_TYPE));
                    }
                }
            }
        }

        tracing::debug!(
            identifiers = record.identifier.len(),
            titles = record.title.len(),
            warnings = warnings.len(),
            "built DC record"
        );

        Built { record, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(doc: Value) -> Built<DcRecord> {
        DcBuilder::default().build(&doc)
    }

    #[test]
    fn test_minimal_document() {
        let built = build(json!({"title": "Beispiel"}));
        let record = built.record;
        assert!(built.warnings.is_empty());

        assert_eq!(record.identifier.len(), 1);
        assert_eq!(record.identifier.first().map(|e| e.value()), Some("oid1616747773566"));

        let titles: Vec<&str> = record.title.iter().map(|e| e.value()).collect();
        assert_eq!(titles, vec!["Beispiel"]);
        assert_eq!(record.title.first().and_then(|e| e.language()), Some("deu"));

        assert!(record.subject.is_empty());
        assert!(record.dc_type.is_empty());
        // Only the FSK default
        let descriptions: Vec<&str> = record.description.iter().map(|e| e.value()).collect();
        assert_eq!(descriptions, vec!["FSK ab 0 freigegeben"]);
    }

    #[test]
    fn test_identifier_order() {
        let built = build(json!({
            "externalId": "SCMS_abc",
            "http://zdf.de/rels/uri": "https://www.zdf.de/doku/film.html",
            "http://zdf.de/rels/sharing-url": "https://zdf.de/s/1",
            "id": "film-100",
            "teaserImageRef": {"layouts": {"original": "https://img/1.jpg"}}
        }));
        let ids: Vec<(Option<&str>, &str)> = built
            .record
            .identifier
            .iter()
            .map(|e| (e.element_type(), e.value()))
            .collect();
        assert_eq!(
            ids,
            vec![
                (Some("providerId"), "oid1616747773566"),
                (Some("providerItemId"), "SCMS_abc"),
                (Some("uri"), "https://www.zdf.de/doku/film.html"),
                (Some("url"), "https://zdf.de/s/1"),
                (Some("id"), "film-100"),
                (Some("binary"), "https://img/1.jpg"),
            ]
        );
    }

    #[test]
    fn test_title_and_subtitle_deduplicated() {
        let built = build(json!({"title": "Gleich", "subtitle": "Gleich"}));
        assert_eq!(built.record.title.len(), 1);

        let built = build(json!({"title": "Haupt", "subtitle": "Unter"}));
        let titles: Vec<&str> = built.record.title.iter().map(|e| e.value()).collect();
        assert_eq!(titles, vec!["Haupt", "Unter"]);
    }

    #[test]
    fn test_descriptions() {
        let built = build(json!({
            "leadParagraph": "Ein Film.",
            "mainVideoContent": {"http://zdf.de/rels/target": {"fsk": "fsk12", "aspectRatio": "16:9"}}
        }));
        let descriptions: Vec<&str> = built.record.description.iter().map(|e| e.value()).collect();
        assert_eq!(
            descriptions,
            vec!["Ein Film.", "FSK ab fsk12 freigegeben", "Seitenverhältnis 16:9"]
        );
        assert!(built
            .record
            .description
            .iter()
            .all(|e| e.element_type() == Some("object")));

        let none = build(json!({
            "mainVideoContent": {"http://zdf.de/rels/target": {"fsk": "none"}}
        }));
        let texts: Vec<&str> = none.record.description.iter().map(|e| e.value()).collect();
        assert_eq!(texts, vec!["FSK ab 0 freigegeben"]);
    }

    #[test]
    fn test_teaser_placeholders_skipped() {
        let built = build(json!({
            "teaserImageRef": {
                "title": "zdf",
                "copyrightNotice": "ZDF/Max Muster",
                "source": "ZDF",
                "caption": "Szene",
                "layouts": {"original": "Zdf"}
            }
        }));
        let alternatives: Vec<Option<&str>> =
            built.record.alternative.iter().map(|e| e.value()).collect();
        assert_eq!(alternatives, vec![Some("ZDF/Max Muster"), Some("Szene")]);
        assert_eq!(built.record.identifier.len(), 1);
    }

    #[test]
    fn test_category_brand_duration() {
        let built = build(json!({
            "http://zdf.de/rels/category": {"http://zdf.de/rels/target": {"title": "Dokumentation"}},
            "http://zdf.de/rels/brand": {"http://zdf.de/rels/target": {"title": "Terra X"}},
            "mainVideoContent": {"http://zdf.de/rels/target": {"duration": 2700}}
        }));
        let record = built.record;
        assert_eq!(record.dc_type.first().map(|e| e.value()), Some("Dokumentation"));
        assert_eq!(record.dc_type.first().and_then(|e| e.element_type()), Some("object"));
        assert_eq!(record.subject.first().map(|e| e.value()), Some("Terra X"));
        assert_eq!(record.subject.first().and_then(|e| e.element_type()), None);
        assert_eq!(record.duration, Some(2700));
    }

    #[test]
    fn test_bad_date_is_a_warning() {
        let built = build(json!({"editorialDate": "12.05.2021", "title": "T"}));
        assert!(built.record.editorial_date.is_none());
        assert_eq!(built.warnings.len(), 1);
        assert_eq!(built.record.title.len(), 1);
    }

    #[test]
    fn test_wrong_types_are_absent() {
        let built = build(json!({"title": 5, "id": ["x"], "mainVideoContent": "n/a"}));
        assert!(built.record.title.is_empty());
        assert_eq!(built.record.identifier.len(), 1);
        assert!(built.record.duration.is_none());
    }
}
