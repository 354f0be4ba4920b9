//! Record builders
//!
//! A builder applies a fixed, ordered table of [`Rule`]s to a parsed source
//! document. Each rule reads one path through the [`FieldExtractor`] and
//! adds the value to one field of the record. Rules never fail: missing
//! values are skipped and unparsable dates are reported as [`BuildWarning`]s.

pub mod dc;
pub mod rdf;

pub use dc::DcBuilder;
pub use rdf::RdfBuilder;

use crate::core::extract::FieldExtractor;
use crate::utils::datetime::parse_date;
use crate::utils::format::is_placeholder;
use chrono::NaiveDateTime;
use serde_json::Value;
use std::fmt;

/// Source paths read from ZDF content documents
pub mod paths {
    pub const EXTERNAL_ID: &str = "$.externalId";
    pub const URI: &str = r#"$.["http://zdf.de/rels/uri"]"#;
    pub const SHARING_URL: &str = r#"$.["http://zdf.de/rels/sharing-url"]"#;
    pub const ID: &str = "$.id";
    pub const TITLE: &str = "$.title";
    pub const SUBTITLE: &str = "$.subtitle";
    pub const LEAD_PARAGRAPH: &str = "$.leadParagraph";
    pub const EDITORIAL_DATE: &str = "$.editorialDate";
    pub const TEASER_ORIGINAL: &str = "$.teaserImageRef.layouts.original";
    pub const TEASER_TITLE: &str = "$.teaserImageRef.title";
    pub const TEASER_COPYRIGHT: &str = "$.teaserImageRef.copyrightNotice";
    pub const TEASER_SOURCE: &str = "$.teaserImageRef.source";
    pub const TEASER_CAPTION: &str = "$.teaserImageRef.caption";
    pub const CATEGORY_TITLE: &str =
        "$.['http://zdf.de/rels/category']['http://zdf.de/rels/target'].title";
    pub const BRAND_TITLE: &str =
        "$.['http://zdf.de/rels/brand']['http://zdf.de/rels/target'].title";
    pub const DURATION: &str =
        "$.['mainVideoContent']['http://zdf.de/rels/target'].duration";
    pub const FSK: &str = "$.['mainVideoContent']['http://zdf.de/rels/target'].fsk";
    pub const ASPECT_RATIO: &str =
        "$.['mainVideoContent']['http://zdf.de/rels/target'].aspectRatio";
}

/// Rating value meaning "no age restriction"
pub const FSK_NONE: &str = "none";

/// Which extracted values a rule accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Every non-blank value
    Any,
    /// Every non-blank value except the `zdf` placeholder
    NotPlaceholder,
}

impl Filter {
    fn accepts(self, value: &str) -> bool {
        match self {
            Filter::Any => true,
            Filter::NotPlaceholder => !is_placeholder(value),
        }
    }
}

/// One mapping rule: read `path`, add to `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<T> {
    pub path: &'static str,
    pub filter: Filter,
    pub target: T,
}

impl<T> Rule<T> {
    /// A rule accepting every value
    pub const fn new(path: &'static str, target: T) -> Self {
        Self {
            path,
            filter: Filter::Any,
            target,
        }
    }

    /// A rule ignoring the `zdf` placeholder
    pub const fn skip_placeholder(path: &'static str, target: T) -> Self {
        Self {
            path,
            filter: Filter::NotPlaceholder,
            target,
        }
    }
}

/// A recovered problem with a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildWarning {
    /// Source path of the field
    pub path: &'static str,
    /// What went wrong
    pub message: String,
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A built record and the warnings raised while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Built<R> {
    pub record: R,
    pub warnings: Vec<BuildWarning>,
}

/// Builds one record type from a source document
pub trait RecordBuilder {
    /// The record produced
    type Record;

    /// Apply all rules to `doc`
    fn build(&self, doc: &Value) -> Built<Self::Record>;
}

/// Read a string for `rule`, applying its filter
pub(crate) fn read_text<T>(extractor: &FieldExtractor<'_>, rule: &Rule<T>) -> Option<String> {
    extractor
        .read_string(rule.path)
        .filter(|value| rule.filter.accepts(value))
}

/// Read a positive duration in seconds; `0` counts as absent
pub(crate) fn read_duration(extractor: &FieldExtractor<'_>, path: &'static str) -> Option<u32> {
    let seconds = extractor.read_int(path);
    if seconds <= 0 {
        return None;
    }
    u32::try_from(seconds).ok()
}

/// Read and parse a date, recording a warning on failure
pub(crate) fn read_date(
    extractor: &FieldExtractor<'_>,
    path: &'static str,
    warnings: &mut Vec<BuildWarning>,
) -> Option<NaiveDateTime> {
    let value = extractor.read_string(path)?;
    match parse_date(&value) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(path, error = %e, "could not parse date");
            warnings.push(BuildWarning {
                path,
                message: e.to_string(),
            });
            None
        }
    }
}

/// Description text for an FSK rating
///
/// A missing rating and `none` both mean "approved for all ages".
pub fn fsk_text(rating: Option<&str>) -> String {
    match rating {
        Some(rating) if rating != FSK_NONE => format!("FSK ab {} freigegeben", rating),
        _ => "FSK ab 0 freigegeben".to_string(),
    }
}

/// Description text for an aspect ratio
pub fn aspect_ratio_text(ratio: &str) -> String {
    format!("Seitenverhältnis {}", ratio)
}
