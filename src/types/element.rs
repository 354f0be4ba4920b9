//! Metadata element values
//!
//! This module defines the two value shapes every record field is built
//! from: a plain [`Element`] with optional `type` and `lang` attributes,
//! and a [`TermElement`] that may instead point at a resource.

use crate::utils::format::unwrap_quoted;

/// A metadata value with optional type and language
///
/// Equality compares the stored value, so two elements that only differ
/// in surrounding quotes are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    value: String,
    element_type: Option<String>,
    language: Option<String>,
}

impl Element {
    /// Create an element without attributes
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            element_type: None,
            language: None,
        }
    }

    /// Set the `type` attribute
    pub fn with_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// Set the `xml:lang` attribute
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// The value as written, with one level of enclosing quotes removed
    pub fn value(&self) -> &str {
        unwrap_quoted(&self.value)
    }

    /// The value exactly as stored
    pub fn raw_value(&self) -> &str {
        &self.value
    }

    /// The `type` attribute
    pub fn element_type(&self) -> Option<&str> {
        self.element_type.as_deref()
    }

    /// The `xml:lang` attribute
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// An element that may carry a resource reference instead of text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TermElement {
    value: Option<String>,
    element_type: Option<String>,
    language: Option<String>,
    resource: Option<String>,
}

impl TermElement {
    /// Create a text element
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Create a pure reference, `<x rdf:resource="..."/>`
    pub fn resource(resource: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..Self::default()
        }
    }

    /// Set the `type` attribute
    pub fn with_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    /// Set the `xml:lang` attribute
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// The text value with one level of enclosing quotes removed
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().map(unwrap_quoted)
    }

    /// The text value exactly as stored
    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The `type` attribute
    pub fn element_type(&self) -> Option<&str> {
        self.element_type.as_deref()
    }

    /// The `xml:lang` attribute
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The referenced resource
    pub fn resource_uri(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}
