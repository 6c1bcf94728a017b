//! # formulator-test
//!
//! Testing utilities for formulator. Provides an in-process test client that
//! drives the Axum router without a socket, and wiremock-backed webhook
//! targets that record what the dispatcher sent.
//!
//! ## Modules
//!
//! - [`client`] - `TestClient` and `TestResponse`
//! - [`mocks`] - Recording Discord and Slack webhook servers

pub mod client;
pub mod mocks;

pub use client::{TestClient, TestResponse};
pub use mocks::MockWebhooks;
