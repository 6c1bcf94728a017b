//! HTTP server integration for formulator.
//!
//! This module provides [`FormulatorApp`], which wraps the handler state and
//! turns it into an Axum router or runs it directly as an HTTP server.
//!
//! # Examples
//!
//! ```no_run
//! use formulator_core::Settings;
//! use formulator_views::server::FormulatorApp;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings {
//!     request_path: "/contact".into(),
//!     required_fields: vec!["email".into()],
//!     ..Settings::default()
//! };
//!
//! let app = FormulatorApp::new(settings);
//! app.run("127.0.0.1:8787").await?;
//! # Ok(())
//! # }
//! ```

use std::any::Any;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use formulator_core::logging::{new_request_id, request_span};
use formulator_core::{FormulatorError, Settings};
use formulator_http::{FormRequest, HttpResponse};
use formulator_notify::NotificationDispatcher;

use crate::handler::{handle, AppState};

/// The formulator application.
///
/// Holds the shared [`AppState`] and converts it into an Axum router in which
/// every path and method reaches the same handler.
pub struct FormulatorApp {
    state: AppState,
}

impl FormulatorApp {
    /// Creates an app from settings, building the webhook targets they name.
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::from_settings(settings),
        }
    }

    /// Replaces the notification dispatcher.
    #[must_use]
    pub fn dispatcher(mut self, dispatcher: NotificationDispatcher) -> Self {
        self.state.dispatcher = Arc::new(dispatcher);
        self
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Returns the shared request state.
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Converts the application into an Axum router.
    ///
    /// Each request body is buffered up to `max_body_bytes`, handled inside a
    /// request span, and rendered as an [`HttpResponse`]. A body that is too
    /// large or cannot be read is answered with the structured 500 envelope
    /// and logged at `warn`, since the fault lies with the client. A panic
    /// anywhere in handling also becomes the 500 envelope.
    pub fn into_axum_router(self) -> axum::Router {
        let max_body_bytes = self.state.settings.max_body_bytes;
        let state = self.state;

        let handler = move |req: Request<Body>| {
            let state = state.clone();
            let span = request_span(&new_request_id(), req.method().as_str(), req.uri().path());

            async move {
                let (parts, body) = req.into_parts();
                let body_bytes = match axum::body::to_bytes(body, max_body_bytes).await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => {
                        tracing::warn!(error = %e, max_body_bytes, "request body rejected");
                        return HttpResponse::internal_error().into_response();
                    }
                };

                let request = FormRequest::from_axum(parts, body_bytes);
                handle(&request, &state).await.into_response()
            }
            .instrument(span)
        };

        axum::Router::new()
            .route("/{*path}", any(handler.clone()))
            .route("/", any(handler))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the application as an HTTP server on the given address.
    ///
    /// Shuts down gracefully on Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the address or encounters
    /// a runtime error.
    pub async fn run(self, addr: &str) -> Result<(), FormulatorError> {
        let router = self.into_axum_router();
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            FormulatorError::ImproperlyConfigured(format!("Failed to bind to {addr}: {e}"))
        })?;

        tracing::info!(address = %addr, "starting formulator server");

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "shutdown listener failed");
                }
            })
            .await
            .map_err(|e| FormulatorError::InternalServerError(format!("Server error: {e}")))?;

        tracing::info!("formulator server stopped");
        Ok(())
    }
}

/// Renders a caught panic as the generic 500 envelope.
fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    HttpResponse::internal_error().into_response()
}

impl std::fmt::Debug for FormulatorApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulatorApp")
            .field("request_path", &self.state.settings.request_path)
            .field("request_method", &self.state.settings.request_method)
            .field("targets", &self.state.dispatcher.targets())
            .finish()
    }
}
