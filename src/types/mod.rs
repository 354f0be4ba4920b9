//! Record value types
//!
//! This module defines the values stored in record fields.

pub mod dedup;
pub mod element;

pub use dedup::DedupList;
pub use element::{Element, TermElement};
