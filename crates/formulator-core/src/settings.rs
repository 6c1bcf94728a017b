//! Settings for the formulator handler.
//!
//! This module provides the [`Settings`] struct, which holds the complete
//! configuration of one deployment. Settings are built once at startup (see
//! [`settings_loader`](crate::settings_loader)), validated by
//! [`checks`](crate::checks), and then shared read-only, typically behind an
//! `Arc`. Nothing in the request path mutates them.

use serde::{Deserialize, Serialize};

/// The complete handler configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
///
/// # Examples
///
/// ```
/// use formulator_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.request_path, "/");
/// assert_eq!(settings.request_method, "POST");
/// assert!(settings.honeypot_field.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Routing ──────────────────────────────────────────────────────

    /// The only path that accepts submissions.
    pub request_path: String,
    /// The only method that accepts submissions (e.g. `POST`).
    pub request_method: String,

    // ── Validation ───────────────────────────────────────────────────

    /// Name of the hidden anti-spam field. `None` disables the check.
    pub honeypot_field: Option<String>,
    /// Allow-list of accepted field names, in output order. Empty accepts all.
    pub form_fields: Vec<String>,
    /// Fields that must be present and non-empty, in reporting order.
    pub required_fields: Vec<String>,
    /// Fields that must hold an email address, in reporting order.
    pub email_fields: Vec<String>,

    // ── Notifications ────────────────────────────────────────────────

    /// Discord webhook URL. `None` disables Discord delivery.
    pub discord_webhook_url: Option<String>,
    /// Slack incoming-webhook URL. `None` disables Slack delivery.
    pub slack_webhook_url: Option<String>,
    /// Per-request timeout for webhook delivery, in seconds.
    pub webhook_timeout_secs: u64,

    // ── Server ───────────────────────────────────────────────────────

    /// Address the standalone server binds to.
    pub bind_address: String,
    /// Maximum accepted request body size, in bytes.
    pub max_body_bytes: usize,

    // ── Logging ──────────────────────────────────────────────────────

    /// Whether debug mode (pretty logs) is enabled.
    pub debug: bool,
    /// The log level or `EnvFilter` directive (e.g. "info", "formulator=debug").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Routing
            request_path: "/".to_string(),
            request_method: "POST".to_string(),

            // Validation
            honeypot_field: None,
            form_fields: Vec::new(),
            required_fields: Vec::new(),
            email_fields: Vec::new(),

            // Notifications
            discord_webhook_url: None,
            slack_webhook_url: None,
            webhook_timeout_secs: 10,

            // Server
            bind_address: "127.0.0.1:8787".to_string(),
            max_body_bytes: 1_048_576,

            // Logging
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Returns the honeypot field name, treating an empty name as unset.
    pub fn honeypot(&self) -> Option<&str> {
        self.honeypot_field.as_deref().filter(|f| !f.is_empty())
    }

    /// Returns `true` if an allow-list restricts the accepted fields.
    pub fn restricts_fields(&self) -> bool {
        !self.form_fields.is_empty()
    }

    /// Returns `true` if at least one webhook target is configured.
    pub fn has_notifications(&self) -> bool {
        self.discord_webhook_url.is_some() || self.slack_webhook_url.is_some()
    }
}
