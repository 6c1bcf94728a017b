//! # formulator-forms
//!
//! Submission processing for formulator: the [`normalize`] step that cleans
//! and restricts a decoded submission, the individual [`validators`], and the
//! ordered [`pipeline`] that runs them.
//!
//! ## Modules
//!
//! - [`normalize`] - Empty-value cleaning and allow-list restriction
//! - [`validators`] - Honeypot, required-field, and email-format stages
//! - [`pipeline`] - Ordered stage list with first-failure short-circuit

pub mod normalize;
pub mod pipeline;
pub mod validators;

pub use normalize::normalize;
pub use pipeline::{validate, Rejection, StageInput};
