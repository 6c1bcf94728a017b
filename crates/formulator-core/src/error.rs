//! Core error types for formulator.
//!
//! This module provides [`FieldError`], the per-field validation record that
//! is echoed back to clients, and [`FormulatorError`], the crate-wide error
//! enum for faults that are not validation outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codes::ErrorKind;

/// A single field-level validation failure.
///
/// Serialized into the `errors` list of a validation-failure response as
/// `{code, field?, value?, detail}`. `field` and `value` are omitted when
/// absent.
///
/// # Examples
///
/// ```
/// use formulator_core::error::FieldError;
///
/// let err = FieldError::missing_required("email");
/// assert_eq!(err.field.as_deref(), Some("email"));
/// assert_eq!(err.detail, "Field email is required.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The kind of failure.
    pub code: ErrorKind,
    /// The name of the offending field, if the error is tied to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The offending value, only when it is safe to echo back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// A human-readable description.
    pub detail: String,
}

impl FieldError {
    /// Creates a new `FieldError` with a code and detail and no field.
    pub fn new(code: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            code,
            field: None,
            value: None,
            detail: detail.into(),
        }
    }

    /// Attaches the offending field name.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attaches the offending value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The honeypot error. Never carries the field or its value.
    pub fn invalid_honeypot() -> Self {
        Self::new(ErrorKind::InvalidHoneypotField, "Honeypot field is invalid.")
    }

    /// A missing required field.
    pub fn missing_required(field: &str) -> Self {
        Self::new(
            ErrorKind::MissingRequiredField,
            format!("Field {field} is required."),
        )
        .with_field(field)
    }

    /// A malformed email field. `value` is `None` when the field was absent.
    pub fn invalid_email(field: &str, value: Option<&str>) -> Self {
        let err = Self::new(ErrorKind::InvalidEmail, "Invalid email address.").with_field(field);
        match value {
            Some(v) => err.with_value(v),
            None => err,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.detail),
            None => write!(f, "{}", self.detail),
        }
    }
}

impl std::error::Error for FieldError {}

/// The primary error type for formulator.
///
/// Request outcomes are never errors; they are [`ResponseCode`]s. This type
/// covers startup, configuration, and serving faults.
///
/// [`ResponseCode`]: crate::codes::ResponseCode
#[derive(Error, Debug)]
pub enum FormulatorError {
    /// The server failed while running.
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The handler is improperly configured and cannot start.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

}

/// A convenience type alias for `Result<T, FormulatorError>`.
pub type FormulatorResult<T> = Result<T, FormulatorError>;
