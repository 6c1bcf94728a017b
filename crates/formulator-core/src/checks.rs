//! Startup checks for a loaded configuration.
//!
//! Settings come from loosely-typed sources (environment, TOML), so a few
//! mistakes can only be caught once they are assembled: a webhook URL that
//! does not parse, a path without a leading slash, a required field that the
//! allow-list would always strip. [`run_checks`] reports these as
//! [`CheckMessage`]s; [`ensure_no_errors`] turns error-level messages into a
//! startup failure.
//!
//! ```
//! use formulator_core::checks::{run_checks, CheckLevel};
//! use formulator_core::settings::Settings;
//!
//! let settings = Settings {
//!     request_path: "contact".into(),
//!     ..Settings::default()
//! };
//! let messages = run_checks(&settings);
//! assert!(messages.iter().any(|m| m.level == CheckLevel::Error));
//! ```

use crate::error::FormulatorError;
use crate::settings::Settings;

/// Severity level for a check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// A potential problem; the handler still starts.
    Warning = 1,
    /// A definite problem; the handler refuses to start.
    Error = 2,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A diagnostic message produced by a check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// The severity level.
    pub level: CheckLevel,
    /// The human-readable message describing the issue.
    pub msg: String,
    /// An optional hint on how to fix the issue.
    pub hint: Option<String>,
    /// The setting the issue relates to.
    pub obj: Option<String>,
    /// A unique identifier for this check message (e.g. "formulator.E001").
    pub id: Option<String>,
}

impl CheckMessage {
    /// Creates a new `CheckMessage` with the given level and details.
    pub fn new(
        level: CheckLevel,
        msg: impl Into<String>,
        hint: Option<&str>,
        obj: Option<&str>,
        id: Option<&str>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(String::from),
            obj: obj.map(String::from),
            id: id.map(String::from),
        }
    }

    /// Creates a warning-level message.
    pub fn warning(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Warning, msg, hint, obj, id)
    }

    /// Creates an error-level message.
    pub fn error(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Error, msg, hint, obj, id)
    }
}

impl std::fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.id {
            write!(f, "({id}) ")?;
        }
        write!(f, "{}: {}", self.level, self.msg)?;
        if let Some(ref hint) = self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        if let Some(ref obj) = self.obj {
            write!(f, "\n\tObject: {obj}")?;
        }
        Ok(())
    }
}

/// A check function that receives settings and returns diagnostic messages.
pub type CheckFn = fn(&Settings) -> Vec<CheckMessage>;

/// The built-in checks, run in this order.
const BUILTIN_CHECKS: &[CheckFn] = &[
    check_request_path,
    check_request_method,
    check_webhook_urls,
    check_fields_reachable,
    check_webhook_timeout,
];

/// Runs every built-in check and collects the resulting messages.
pub fn run_checks(settings: &Settings) -> Vec<CheckMessage> {
    BUILTIN_CHECKS
        .iter()
        .flat_map(|check| check(settings))
        .collect()
}

/// Fails with [`FormulatorError::ImproperlyConfigured`] if any message is
/// error-level. All error messages are joined into the error text.
pub fn ensure_no_errors(messages: &[CheckMessage]) -> Result<(), FormulatorError> {
    let errors: Vec<String> = messages
        .iter()
        .filter(|m| m.level == CheckLevel::Error)
        .map(ToString::to_string)
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormulatorError::ImproperlyConfigured(errors.join("\n")))
    }
}

// ============================================================
// Built-in checks
// ============================================================

fn check_request_path(settings: &Settings) -> Vec<CheckMessage> {
    if settings.request_path.starts_with('/') {
        return Vec::new();
    }
    vec![CheckMessage::error(
        format!(
            "REQUEST_PATH '{}' does not start with '/'. No request can ever match it.",
            settings.request_path
        ),
        Some("Use an absolute path such as \"/\" or \"/contact\"."),
        Some("settings.request_path"),
        Some("formulator.E001"),
    )]
}

/// Request-line method tokens per RFC 9110.
fn is_method_token(method: &str) -> bool {
    !method.is_empty()
        && method
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c))
}

fn check_request_method(settings: &Settings) -> Vec<CheckMessage> {
    let method = settings.request_method.as_str();
    let mut messages = Vec::new();

    if !is_method_token(method) {
        messages.push(CheckMessage::error(
            format!("REQUEST_METHOD '{method}' is not a valid HTTP method."),
            Some("Use a method such as POST or PUT."),
            Some("settings.request_method"),
            Some("formulator.E002"),
        ));
    } else if method == "OPTIONS" {
        messages.push(CheckMessage::error(
            "REQUEST_METHOD is OPTIONS, which is reserved for CORS negotiation.",
            Some("Use a method such as POST or PUT."),
            Some("settings.request_method"),
            Some("formulator.E003"),
        ));
    } else if method != method.to_ascii_uppercase() {
        messages.push(CheckMessage::warning(
            format!("REQUEST_METHOD '{method}' is not upper-case. Method matching is case-sensitive."),
            Some("Browsers send standard methods in upper case."),
            Some("settings.request_method"),
            Some("formulator.W001"),
        ));
    }

    messages
}

fn check_webhook_url(value: Option<&str>, setting: &str, id: &str) -> Option<CheckMessage> {
    let raw = value?;
    let problem = match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => return None,
        Ok(parsed) => format!("unsupported scheme '{}'", parsed.scheme()),
        Err(e) => e.to_string(),
    };
    Some(CheckMessage::error(
        format!("{} is not a usable webhook URL: {problem}.", setting.to_uppercase()),
        Some("Paste the full https:// URL from the service's webhook settings."),
        Some(format!("settings.{setting}").as_str()),
        Some(id),
    ))
}

fn check_webhook_urls(settings: &Settings) -> Vec<CheckMessage> {
    [
        check_webhook_url(
            settings.discord_webhook_url.as_deref(),
            "discord_webhook_url",
            "formulator.E004",
        ),
        check_webhook_url(
            settings.slack_webhook_url.as_deref(),
            "slack_webhook_url",
            "formulator.E005",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Required and email fields outside a configured allow-list are stripped
/// before validation, so they can never pass.
fn check_fields_reachable(settings: &Settings) -> Vec<CheckMessage> {
    if !settings.restricts_fields() {
        return Vec::new();
    }

    let unreachable = |fields: &[String]| -> Vec<String> {
        fields
            .iter()
            .filter(|f| !settings.form_fields.contains(*f))
            .cloned()
            .collect()
    };

    let mut messages = Vec::new();

    let missing = unreachable(&settings.required_fields);
    if !missing.is_empty() {
        messages.push(CheckMessage::warning(
            format!(
                "Required fields not in FORM_FIELDS will always be reported missing: {}",
                missing.join(", ")
            ),
            Some("Add them to FORM_FIELDS or remove them from REQUIRED_FIELDS."),
            Some("settings.required_fields"),
            Some("formulator.W002"),
        ));
    }

    let missing = unreachable(&settings.email_fields);
    if !missing.is_empty() {
        messages.push(CheckMessage::warning(
            format!(
                "Email fields not in FORM_FIELDS will always be reported invalid: {}",
                missing.join(", ")
            ),
            Some("Add them to FORM_FIELDS or remove them from EMAIL_FIELDS."),
            Some("settings.email_fields"),
            Some("formulator.W003"),
        ));
    }

    messages
}

fn check_webhook_timeout(settings: &Settings) -> Vec<CheckMessage> {
    if settings.webhook_timeout_secs > 0 || !settings.has_notifications() {
        return Vec::new();
    }
    vec![CheckMessage::warning(
        "Webhook timeout is 0 seconds; every notification will time out.",
        Some("Set FORMULATOR_WEBHOOK_TIMEOUT_SECS to a positive value."),
        Some("settings.webhook_timeout_secs"),
        Some("formulator.W004"),
    )]
}
