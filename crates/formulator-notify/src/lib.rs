//! # formulator-notify
//!
//! Best-effort delivery of accepted submissions to chat webhooks.
//!
//! Each target implements [`Notifier`]. The [`NotificationDispatcher`] holds
//! the configured targets, calls them concurrently, and logs failures without
//! ever returning them to the request path.
//!
//! ## Modules
//!
//! - [`notifier`] - The `Notifier` trait and the shared JSON POST helper
//! - [`discord`] - Discord embed payloads
//! - [`slack`] - Slack block-kit payloads
//! - [`dispatcher`] - Concurrent fan-out over configured targets
//! - [`error`] - Delivery errors

pub mod discord;
pub mod dispatcher;
pub mod error;
pub mod notifier;
pub mod slack;

pub use discord::DiscordNotifier;
pub use dispatcher::{DispatchReport, NotificationDispatcher};
pub use error::NotifyError;
pub use notifier::Notifier;
pub use slack::SlackNotifier;
