//! Utility functions
//!
//! Date handling and value formatting shared by the record models.

pub mod datetime;
pub mod format;

pub use datetime::{format_date, parse_date, DatePattern};
pub use format::{format_duration, is_placeholder, unwrap_quoted};
