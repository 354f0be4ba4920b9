//! Field extraction from the source JSON document
//!
//! Lookups never fail: a path that does not resolve, resolves to the wrong
//! type or to a blank string simply yields no value. [`FieldExtractor::lookup`]
//! reports which of these happened for callers that care.

use crate::core::jsonpath::{parse_path, PathComponents};
use serde_json::Value;
use std::fmt;

/// Why a lookup produced no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Miss {
    /// The path does not resolve
    Absent,
    /// The path resolves to a value of another type
    WrongType,
    /// The path resolves to a string that is empty after trimming
    Blank,
    /// The path expression itself is malformed
    BadPath,
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Miss::Absent => "absent",
            Miss::WrongType => "wrong type",
            Miss::Blank => "blank",
            Miss::BadPath => "bad path",
        };
        f.write_str(text)
    }
}

/// Reads optional string and integer values from a parsed document
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor<'a> {
    doc: &'a Value,
}

impl<'a> FieldExtractor<'a> {
    /// Create an extractor over `doc`
    pub fn new(doc: &'a Value) -> Self {
        Self { doc }
    }

    /// The underlying document
    pub fn document(&self) -> &'a Value {
        self.doc
    }

    /// Resolve `path` to a non-blank string
    ///
    /// The returned string is not trimmed.
    pub fn lookup(&self, path: &str) -> Result<&'a str, Miss> {
        let value = self.resolve(path)?;
        let text = value.as_str().ok_or(Miss::WrongType)?;
        if text.trim().is_empty() {
            return Err(Miss::Blank);
        }
        Ok(text)
    }

    /// Resolve `path` to an integer
    pub fn lookup_int(&self, path: &str) -> Result<i64, Miss> {
        self.resolve(path)?.as_i64().ok_or(Miss::WrongType)
    }

    /// Read a string, `None` on any miss
    pub fn read_string(&self, path: &str) -> Option<String> {
        match self.lookup(path) {
            Ok(text) => Some(text.to_string()),
            Err(miss) => {
                tracing::trace!(path, %miss, "no string value");
                None
            }
        }
    }

    /// Read an integer, `0` on any miss
    ///
    /// A stored `0` cannot be told apart from a missing value.
    pub fn read_int(&self, path: &str) -> i64 {
        match self.lookup_int(path) {
            Ok(value) => value,
            Err(miss) => {
                tracing::trace!(path, %miss, "no integer value");
                0
            }
        }
    }

    fn resolve(&self, path: &str) -> Result<&'a Value, Miss> {
        let components: PathComponents = parse_path(path).map_err(|_| Miss::BadPath)?;
        match components.resolve(self.doc) {
            Some(Value::Null) | None => Err(Miss::Absent),
            Some(value) => Ok(value),
        }
    }
}
