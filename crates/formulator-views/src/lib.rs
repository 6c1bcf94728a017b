//! # formulator-views
//!
//! The request-handling layer of formulator. Routes every incoming request
//! through OPTIONS handling, the path and method checks, the validation
//! pipeline, and notification dispatch, and serves the result over Axum.
//!
//! ## Modules
//!
//! - [`cors`] - Preflight and plain OPTIONS replies
//! - [`handler`] - The per-request state machine
//! - [`server`] - [`FormulatorApp`](server::FormulatorApp), the Axum integration

pub mod cors;
pub mod handler;
pub mod server;

pub use handler::{handle, AppState};
pub use server::FormulatorApp;
