//! Settings loading from configuration files and the environment.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `REQUEST_PATH` | `request_path` |
//! | `REQUEST_METHOD` | `request_method` |
//! | `HONEYPOT_FIELD` | `honeypot_field` |
//! | `FORM_FIELDS` | `form_fields` (comma-separated) |
//! | `REQUIRED_FIELDS` | `required_fields` (comma-separated) |
//! | `EMAIL_FIELDS` | `email_fields` (comma-separated) |
//! | `DISCORD_WEBHOOK_URL` | `discord_webhook_url` |
//! | `SLACK_WEBHOOK_URL` | `slack_webhook_url` |
//! | `FORMULATOR_DEBUG` | `debug` |
//! | `FORMULATOR_LOG_LEVEL` | `log_level` |
//! | `FORMULATOR_BIND_ADDRESS` | `bind_address` |
//! | `FORMULATOR_WEBHOOK_TIMEOUT_SECS` | `webhook_timeout_secs` |
//! | `FORMULATOR_MAX_BODY_BYTES` | `max_body_bytes` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formulator_core::settings_loader;
//!
//! // Environment only
//! let settings = settings_loader::from_env().unwrap();
//!
//! // TOML with environment overrides
//! let settings = settings_loader::from_toml_file_with_env("formulator.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::FormulatorError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormulatorError> {
    toml::from_str(toml_str)
        .map_err(|e| FormulatorError::ConfigurationError(format!("Failed to parse TOML: {e}")))
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormulatorError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        FormulatorError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML is malformed, or an
/// environment override is invalid.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormulatorError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings)?;
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
///
/// # Errors
///
/// Returns an error if a numeric variable does not parse.
pub fn from_env() -> Result<Settings, FormulatorError> {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings)?;
    Ok(settings)
}

/// Applies overrides from the process environment.
///
/// See the module docs for the variable names.
pub fn apply_env_overrides(settings: &mut Settings) -> Result<(), FormulatorError> {
    apply_overrides_from(settings, |key| std::env::var(key).ok())
}

/// Applies overrides read through `lookup`, which maps a variable name to
/// its value.
///
/// Empty values for optional settings are treated as unset. A numeric value
/// that fails to parse is a [`FormulatorError::ConfigurationError`].
pub fn apply_overrides_from<F>(settings: &mut Settings, lookup: F) -> Result<(), FormulatorError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("REQUEST_PATH") {
        settings.request_path = val;
    }

    if let Some(val) = lookup("REQUEST_METHOD") {
        settings.request_method = val;
    }

    if let Some(val) = lookup("HONEYPOT_FIELD") {
        settings.honeypot_field = non_empty(val);
    }

    if let Some(val) = lookup("FORM_FIELDS") {
        settings.form_fields = split_list(&val);
    }

    if let Some(val) = lookup("REQUIRED_FIELDS") {
        settings.required_fields = split_list(&val);
    }

    if let Some(val) = lookup("EMAIL_FIELDS") {
        settings.email_fields = split_list(&val);
    }

    if let Some(val) = lookup("DISCORD_WEBHOOK_URL") {
        settings.discord_webhook_url = non_empty(val);
    }

    if let Some(val) = lookup("SLACK_WEBHOOK_URL") {
        settings.slack_webhook_url = non_empty(val);
    }

    if let Some(val) = lookup("FORMULATOR_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("FORMULATOR_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("FORMULATOR_BIND_ADDRESS") {
        settings.bind_address = val;
    }

    if let Some(val) = lookup("FORMULATOR_WEBHOOK_TIMEOUT_SECS") {
        settings.webhook_timeout_secs = parse_number("FORMULATOR_WEBHOOK_TIMEOUT_SECS", &val)?;
    }

    if let Some(val) = lookup("FORMULATOR_MAX_BODY_BYTES") {
        settings.max_body_bytes = parse_number("FORMULATOR_MAX_BODY_BYTES", &val)?;
    }

    Ok(())
}

// ============================================================
// Helpers
// ============================================================

fn parse_number<T>(name: &str, value: &str) -> Result<T, FormulatorError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        FormulatorError::ConfigurationError(format!(
            "{name} must be a non-negative integer, got '{value}': {e}"
        ))
    })
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
