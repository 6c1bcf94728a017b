//! Utility types for formulator.
//!
//! This module provides:
//! - [`FieldMap`]: An insertion-ordered map of submitted form fields.

mod field_map;

pub use field_map::FieldMap;
