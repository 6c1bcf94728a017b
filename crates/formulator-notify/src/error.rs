//! Delivery errors.

/// Why a single webhook delivery failed.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The request could not be sent or timed out.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The target answered with a non-success status.
    #[error("webhook responded with status {status}")]
    Status {
        /// The HTTP status returned by the target.
        status: u16,
    },

    /// The payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
