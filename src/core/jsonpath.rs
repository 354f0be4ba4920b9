//! JSON path handling
//!
//! This module parses the small JSON-path dialect used by the field mapping
//! tables and evaluates it against a `serde_json::Value`.
//!
//! Supported syntax:
//! - `$` - the document root (optional)
//! - `.name` - object member
//! - `['name']` / `["name"]` - object member with arbitrary characters
//! - `[2]` - array item (0-based)
//!
//! A dot directly before a bracket is allowed, so `$.["a"]` and `$["a"]`
//! are the same path.

use crate::core::error::{ConvertError, ConvertResult};
use serde_json::Value;

/// Parse a path expression
pub fn parse_path(path: &str) -> ConvertResult<PathComponents> {
    let mut components = Vec::new();
    let mut chars = path.trim().chars().peekable();

    if chars.peek() == Some(&'$') {
        chars.next();
    }

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if chars.peek() == Some(&'[') {
                    continue;
                }
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '.' || c == '[' {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(ConvertError::BadJsonPath(format!(
                        "Empty member name in '{}'",
                        path
                    )));
                }
                components.push(PathComponent::Name(name));
            }
            '[' => match chars.peek().copied() {
                Some(quote @ ('\'' | '"')) => {
                    chars.next();
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some(c) if c == quote => break,
                            Some(c) => name.push(c),
                            None => {
                                return Err(ConvertError::BadJsonPath(format!(
                                    "Unterminated quote in '{}'",
                                    path
                                )))
                            }
                        }
                    }
                    if chars.next() != Some(']') {
                        return Err(ConvertError::BadJsonPath(format!(
                            "Expected ']' after member name in '{}'",
                            path
                        )));
                    }
                    components.push(PathComponent::Name(name));
                }
                _ => {
                    let mut index = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(c) if c.is_ascii_digit() => index.push(c),
                            Some(c) => {
                                return Err(ConvertError::BadJsonPath(format!(
                                    "Invalid character in index: {}",
                                    c
                                )))
                            }
                            None => {
                                return Err(ConvertError::BadJsonPath(
                                    "Unclosed bracket".to_string(),
                                ))
                            }
                        }
                    }
                    let index = index.parse::<usize>().map_err(|_| {
                        ConvertError::BadJsonPath(format!("Invalid array index: {}", index))
                    })?;
                    components.push(PathComponent::Index(index));
                }
            },
            ']' => return Err(ConvertError::BadJsonPath("Unexpected ']'".to_string())),
            _ if components.is_empty() && !path.trim_start().starts_with('$') => {
                // Bare leading member, e.g. `title.text`
                let mut name = String::from(ch);
                while let Some(&c) = chars.peek() {
                    if c == '.' || c == '[' {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                components.push(PathComponent::Name(name));
            }
            _ => {
                return Err(ConvertError::BadJsonPath(format!(
                    "Unexpected character '{}' in '{}'",
                    ch, path
                )))
            }
        }
    }

    if components.is_empty() {
        return Err(ConvertError::BadJsonPath("Empty path".to_string()));
    }

    Ok(PathComponents { components })
}

/// A component of a JSON path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// An object member name
    Name(String),
    /// An array index, 0-based
    Index(usize),
}

/// Parsed path components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathComponents {
    pub components: Vec<PathComponent>,
}

impl PathComponents {
    /// Walk `value` along the path
    ///
    /// Returns `None` as soon as a member or index does not exist.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.components
            .iter()
            .try_fold(value, |current, comp| match comp {
                PathComponent::Name(name) => current.as_object()?.get(name),
                PathComponent::Index(idx) => current.as_array()?.get(*idx),
            })
    }
}
