//! # formulator
//!
//! A stateless form-submission handler. Requests are checked against the
//! configured path and method, decoded, validated by an ordered pipeline
//! (honeypot, required fields, email format), forwarded to Discord and Slack
//! webhooks on success, and answered with a JSON envelope carrying CORS
//! headers.
//!
//! This is the facade crate that re-exports the sub-crates and hosts the
//! `formulator` binary's command-line handling.

/// Core types, settings, response codes, checks, and logging.
pub use formulator_core as core;

/// Request decoding and the JSON response envelope.
pub use formulator_http as http;

/// Normalization and the validation pipeline.
pub use formulator_forms as forms;

/// Discord and Slack webhook delivery.
pub use formulator_notify as notify;

/// Routing, CORS handling, and the Axum server.
pub use formulator_views as views;

/// Test client and webhook mocks.
#[cfg(feature = "testing")]
pub use formulator_test as test;

pub mod cli;

pub use formulator_core::{FormulatorError, FormulatorResult, Settings};
pub use formulator_views::FormulatorApp;
