//! Date/time utilities
//!
//! This module parses the `editorialDate` values of the source documents and
//! formats them for the three output schemas.
//!
//! Input dates look like `2021-05-12T18:00:00.000+02:00`. Only the leading
//! `YYYY-MM-DDThh:mm:ss` part is read; fractional seconds and offsets that
//! follow are ignored and the wall-clock time is kept as-is.

use crate::core::error::{ConvertError, ConvertResult};
use chrono::{Locale, NaiveDateTime, Utc};

/// Pattern of the leading date/time part of an input value
pub const INPUT_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// Output formats for dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePattern {
    /// `2021-05-12T18:00:00Z`, used for OAI datestamps and response dates
    OaiDatestamp,
    /// `2021-05-12`, used for RDF `created`
    IsoDate,
    /// `12. Mai 2021`, used for DC `created`
    GermanLong,
}

impl DatePattern {
    /// The strftime pattern
    pub fn pattern(self) -> &'static str {
        match self {
            DatePattern::OaiDatestamp => "%Y-%m-%dT%H:%M:%SZ",
            DatePattern::IsoDate => "%Y-%m-%d",
            DatePattern::GermanLong => "%-d. %B %Y",
        }
    }
}

/// Parse an input date/time value
///
/// # Example
///
/// ```rust
/// use zdf2dc::utils::datetime::{format_date, parse_date, DatePattern};
///
/// let dt = parse_date("2021-05-12T18:00:00.000+02:00").unwrap();
/// assert_eq!(format_date(&dt, DatePattern::IsoDate), "2021-05-12");
/// ```
pub fn parse_date(value: &str) -> ConvertResult<NaiveDateTime> {
    NaiveDateTime::parse_and_remainder(value.trim(), INPUT_PATTERN)
        .map(|(dt, _)| dt)
        .map_err(|e| ConvertError::BadDate(format!("'{}': {}", value, e)))
}

/// Format a date/time value
pub fn format_date(dt: &NaiveDateTime, pattern: DatePattern) -> String {
    match pattern {
        DatePattern::GermanLong => dt
            .date()
            .format_localized(pattern.pattern(), Locale::de_DE)
            .to_string(),
        _ => dt.format(pattern.pattern()).to_string(),
    }
}

/// The current UTC time
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
