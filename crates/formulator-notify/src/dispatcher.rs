//! Concurrent fan-out to configured webhook targets.
//!
//! The dispatcher attempts every target once, concurrently, and waits for all
//! attempts to settle. A failed attempt is logged at `warn` and recorded in
//! the returned reports; it never becomes an error for the caller.

use std::time::Duration;

use futures::future::join_all;

use formulator_core::{FieldMap, Settings};

use crate::discord::DiscordNotifier;
use crate::notifier::Notifier;
use crate::slack::SlackNotifier;

/// The outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// The target's [`Notifier::name`].
    pub target: &'static str,
    /// `None` on success, otherwise the rendered failure.
    pub error: Option<String>,
}

impl DispatchReport {
    /// Returns `true` if the target accepted the submission.
    pub const fn delivered(&self) -> bool {
        self.error.is_none()
    }
}

/// Holds the configured notification targets.
///
/// # Examples
///
/// ```
/// use formulator_core::Settings;
/// use formulator_notify::NotificationDispatcher;
///
/// let dispatcher = NotificationDispatcher::from_settings(&Settings::default());
/// assert!(dispatcher.is_empty());
/// ```
pub struct NotificationDispatcher {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field(
                "targets",
                &self.notifiers.iter().map(|n| n.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl NotificationDispatcher {
    /// Creates a dispatcher over an explicit list of targets.
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    /// Builds the targets named in `settings`.
    ///
    /// All targets share one HTTP client configured with
    /// `webhook_timeout_secs`. Unconfigured targets are left out entirely.
    pub fn from_settings(settings: &Settings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.webhook_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to build webhook client, using defaults");
                reqwest::Client::new()
            });

        let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
        if let Some(url) = &settings.discord_webhook_url {
            notifiers.push(Box::new(DiscordNotifier::new(client.clone(), url.as_str())));
        }
        if let Some(url) = &settings.slack_webhook_url {
            notifiers.push(Box::new(SlackNotifier::new(client, url.as_str())));
        }

        Self::new(notifiers)
    }

    /// Returns `true` if no target is configured.
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    /// Returns the number of configured targets.
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Returns the names of the configured targets, in dispatch order.
    pub fn targets(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    /// Delivers `fields` to every target and waits for all attempts.
    ///
    /// Reports come back in target order.
    pub async fn dispatch(&self, fields: &FieldMap) -> Vec<DispatchReport> {
        let attempts = self.notifiers.iter().map(|notifier| async move {
            let target = notifier.name();
            match notifier.notify(fields).await {
                Ok(()) => {
                    tracing::debug!(target_name = target, "webhook delivered");
                    DispatchReport {
                        target,
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::warn!(target_name = target, error = %e, "webhook delivery failed");
                    DispatchReport {
                        target,
                        error: Some(e.to_string()),
                    }
                }
            }
        });

        join_all(attempts).await
    }
}
