//! # formulator-core
//!
//! Core types, settings, and error types for the formulator form handler.
//! This crate has no HTTP dependencies and provides the foundation for all
//! other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`codes`] - Response codes and per-field error kinds
//! - [`utils`] - Utility types (`FieldMap`)
//! - [`settings`] - Immutable handler configuration
//! - [`settings_loader`] - Loading settings from TOML files and the environment
//! - [`checks`] - Startup diagnostics for a loaded configuration
//! - [`logging`] - Tracing-based logging integration

pub mod checks;
pub mod codes;
pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use codes::{ErrorKind, ResponseCode};
pub use error::{FieldError, FormulatorError, FormulatorResult};
pub use settings::Settings;
pub use utils::FieldMap;
