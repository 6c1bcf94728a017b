//! Validation stages.
//!
//! Each stage has the uniform signature
//! `fn(&StageInput, &Settings) -> Vec<FieldError>` and returns every error it
//! finds; an empty list means the stage passed. Stages never short-circuit
//! internally.

use once_cell::sync::Lazy;
use regex::Regex;

use formulator_core::{FieldError, Settings};

use crate::pipeline::StageInput;

/// Email shape: a dot-atom or quoted local part, `@`, then either a bracketed
/// IPv4 literal or a dotted domain whose last label is at least two letters.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-z\-0-9]+\.)+[a-z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

/// Returns `true` if `value` has the shape of an email address.
///
/// # Examples
///
/// ```
/// use formulator_forms::validators::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Honeypot stage, over the RAW submission.
///
/// Passes when no honeypot is configured. Otherwise the field must be present
/// with a value of exactly `""`; a filled-in or absent field yields a single
/// error that names neither the field nor its value.
pub fn honeypot(input: &StageInput<'_>, settings: &Settings) -> Vec<FieldError> {
    let Some(field) = settings.honeypot() else {
        return Vec::new();
    };

    match input.raw.get(field) {
        Some("") => Vec::new(),
        Some(_) => {
            tracing::debug!(field, "honeypot field filled in");
            vec![FieldError::invalid_honeypot()]
        }
        None => {
            tracing::debug!(field, "honeypot field absent");
            vec![FieldError::invalid_honeypot()]
        }
    }
}

/// Required-fields stage, over the NORMALIZED submission.
///
/// Reports every configured field that is absent, in configured order.
/// Normalization has already removed empty values, so absent covers empty.
pub fn required_fields(input: &StageInput<'_>, settings: &Settings) -> Vec<FieldError> {
    settings
        .required_fields
        .iter()
        .filter(|name| input.cleaned.get(name).map_or(true, str::is_empty))
        .map(|name| FieldError::missing_required(name))
        .collect()
}

/// Email-format stage, over the NORMALIZED submission.
///
/// Every configured field must hold an email-shaped value. An absent field
/// fails without a `value`; a malformed one echoes the offending value.
pub fn email_fields(input: &StageInput<'_>, settings: &Settings) -> Vec<FieldError> {
    settings
        .email_fields
        .iter()
        .filter_map(|name| match input.cleaned.get(name) {
            Some(value) if is_valid_email(value) => None,
            value => Some(FieldError::invalid_email(name, value)),
        })
        .collect()
}
