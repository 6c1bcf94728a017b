//! The per-request state machine.
//!
//! ```text
//! OPTIONS? ── preflight / Allow
//! path == request_path? ── no: 404 path_not_found
//! method == request_method? ── no: 400 method_not_allowed
//! decode → honeypot → normalize → required → email
//! dispatch → 200 form_submitted
//! ```

use std::sync::Arc;

use formulator_core::{ResponseCode, Settings};
use formulator_forms::{normalize, validate, StageInput};
use formulator_http::{FormRequest, HttpResponse};
use formulator_notify::NotificationDispatcher;

use crate::cors;

/// Shared, read-only state for every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The deployment's configuration.
    pub settings: Arc<Settings>,
    /// The configured webhook targets.
    pub dispatcher: Arc<NotificationDispatcher>,
}

impl AppState {
    /// Builds the state from settings, creating the dispatcher they describe.
    pub fn from_settings(settings: Settings) -> Self {
        let dispatcher = NotificationDispatcher::from_settings(&settings);
        Self {
            settings: Arc::new(settings),
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Handles one request and produces its response.
///
/// Never fails: every outcome, including validation failures, is a response.
pub async fn handle(request: &FormRequest, state: &AppState) -> HttpResponse {
    if let Some(response) = cors::handle_options(request) {
        return response;
    }

    let settings = state.settings.as_ref();

    if request.path() != settings.request_path {
        tracing::debug!(code = %ResponseCode::PathNotFound, "request rejected");
        return HttpResponse::from_code(ResponseCode::PathNotFound);
    }

    let method = request.method().as_str();
    if method != settings.request_method {
        tracing::debug!(code = %ResponseCode::MethodNotAllowed, "request rejected");
        return HttpResponse::method_not_allowed(method);
    }

    let raw = request.submission();
    let cleaned = normalize(&raw, &settings.form_fields);

    let input = StageInput {
        raw: &raw,
        cleaned: &cleaned,
    };
    if let Err(rejection) = validate(&input, settings) {
        return match rejection.errors {
            Some(errors) => HttpResponse::rejected(rejection.code, errors),
            None => HttpResponse::from_code(rejection.code),
        };
    }

    let reports = state.dispatcher.dispatch(&cleaned).await;
    let delivered = reports.iter().filter(|r| r.delivered()).count();
    tracing::info!(
        fields = cleaned.len(),
        targets = reports.len(),
        delivered,
        "form submitted"
    );

    HttpResponse::from_code(ResponseCode::FormSubmitted)
}
