//! Error types for conversion operations
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Error types for conversion operations
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Bad parameter provided to a function
    #[error("Bad parameter: {0}")]
    BadParam(String),

    /// Malformed JSON path expression
    #[error("Bad JSON path: {0}")]
    BadJsonPath(String),

    /// The source JSON document could not be parsed
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The XML handed to the reformatter is not well-formed
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A serialization or reformatting step could not be executed
    #[error("Transform error: {0}")]
    Transform(String),

    /// A namespace URI has no registered prefix
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    /// A date value does not match the expected pattern
    #[error("Bad date: {0}")]
    BadDate(String),

    /// XML nesting exceeds the supported depth
    #[error("Nesting deeper than {0} elements")]
    DepthLimit(usize),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::UnknownNamespace("http://example.com/".to_string());
        assert!(err.to_string().contains("Unknown namespace: http://example.com/"));
        assert_eq!(
            ConvertError::DepthLimit(4096).to_string(),
            "Nesting deeper than 4096 elements"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConvertError = io_err.into();
        assert!(matches!(err, ConvertError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConvertError = json_err.into();
        assert!(matches!(err, ConvertError::JsonParse(_)));
    }
}
