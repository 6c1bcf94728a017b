//! Machine-readable codes used in response envelopes.
//!
//! [`ResponseCode`] is the top-level `code` of every JSON response, and
//! [`ErrorKind`] is the `code` of each entry in a response's `errors` list.
//! Both serialize as `snake_case` strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The top-level outcome of a request.
///
/// Each code carries its HTTP status and the default `detail` text rendered
/// into the response envelope.
///
/// # Examples
///
/// ```
/// use formulator_core::codes::ResponseCode;
///
/// assert_eq!(ResponseCode::PathNotFound.status_code(), 404);
/// assert_eq!(ResponseCode::FormSubmitted.as_str(), "form_submitted");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCode {
    /// The request path does not match the configured path.
    PathNotFound,
    /// The path matches but the method does not.
    MethodNotAllowed,
    /// The honeypot check failed. Deliberately generic.
    InvalidRequest,
    /// One or more required fields are missing.
    MissingRequiredFields,
    /// One or more email fields are malformed.
    InvalidEmailFields,
    /// The submission passed validation.
    FormSubmitted,
    /// An unexpected fault occurred while handling the request.
    InternalError,
}

impl ResponseCode {
    /// Returns the wire representation of this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PathNotFound => "path_not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::InvalidRequest => "invalid_request",
            Self::MissingRequiredFields => "missing_required_fields",
            Self::InvalidEmailFields => "invalid_email_fields",
            Self::FormSubmitted => "form_submitted",
            Self::InternalError => "internal_error",
        }
    }

    /// Returns the HTTP status code for this outcome.
    ///
    /// Validation failures and method mismatches are client errors (400),
    /// a path mismatch is 404, success is 200.
    pub const fn status_code(self) -> u16 {
        match self {
            Self::PathNotFound => 404,
            Self::MethodNotAllowed
            | Self::InvalidRequest
            | Self::MissingRequiredFields
            | Self::InvalidEmailFields => 400,
            Self::FormSubmitted => 200,
            Self::InternalError => 500,
        }
    }

    /// Returns the default human-readable detail for this outcome.
    ///
    /// `MethodNotAllowed` has a method-specific detail built by the router;
    /// this is only its fallback.
    pub const fn detail(self) -> &'static str {
        match self {
            Self::PathNotFound => "Path not found.",
            Self::MethodNotAllowed => "Method not allowed.",
            Self::InvalidRequest => "Invalid request.",
            Self::MissingRequiredFields => "Some required fields are missing.",
            Self::InvalidEmailFields => "Some email fields are invalid.",
            Self::FormSubmitted => "Form submitted.",
            Self::InternalError => "Internal server error.",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a single field-level validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The honeypot field was filled in or missing.
    InvalidHoneypotField,
    /// A required field is absent or empty.
    MissingRequiredField,
    /// An email field does not look like an email address.
    InvalidEmail,
}

impl ErrorKind {
    /// Returns the wire representation of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidHoneypotField => "invalid_honeypot_field",
            Self::MissingRequiredField => "missing_required_field",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
