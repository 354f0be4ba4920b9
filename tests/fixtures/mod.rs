//! Shared test documents

#![allow(dead_code)]

use serde_json::Value;

/// A complete Terra X film document
pub const FILM_JSON: &str = include_str!("film.json");

/// [`FILM_JSON`] parsed
pub fn film() -> Value {
    serde_json::from_str(FILM_JSON).unwrap()
}

/// The shortest document that still yields a titled record
pub const MINIMAL_JSON: &str = r#"{"title": "Beispiel"}"#;

/// Count non-overlapping occurrences of `needle` in `haystack`
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
