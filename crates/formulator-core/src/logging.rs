//! Logging integration for formulator.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-request spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug", "info",
/// "formulator_views=debug"). In debug mode a pretty, human-readable format
/// is used; otherwise a structured JSON format is used.
///
/// Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Generates a fresh request id.
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creates a tracing span for one HTTP request.
///
/// Every log entry emitted while handling the request carries the request
/// id, method, and path.
///
/// # Examples
///
/// ```
/// use formulator_core::logging::{new_request_id, request_span};
///
/// let span = request_span(&new_request_id(), "POST", "/");
/// let _guard = span.enter();
/// tracing::info!("handling submission");
/// ```
pub fn request_span(request_id: &str, method: &str, path: &str) -> tracing::Span {
    tracing::info_span!("request", id = request_id, method = method, path = path)
}
