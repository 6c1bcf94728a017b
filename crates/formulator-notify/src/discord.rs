//! Discord webhook target.
//!
//! Discord receives one embed whose fields are the submitted name/value pairs:
//!
//! ```json
//! {"embeds": [{"fields": [{"name": "email", "value": "a@b.com"}]}]}
//! ```

use async_trait::async_trait;
use serde::Serialize;

use formulator_core::FieldMap;

use crate::error::NotifyError;
use crate::notifier::{post_json, Notifier};

/// Content type Discord payloads are sent with.
pub const CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Wire shape of a Discord webhook body.
#[derive(Debug, Serialize)]
pub struct DiscordPayload<'a> {
    embeds: [DiscordEmbed<'a>; 1],
}

#[derive(Debug, Serialize)]
struct DiscordEmbed<'a> {
    fields: Vec<DiscordField<'a>>,
}

#[derive(Debug, Serialize)]
struct DiscordField<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> DiscordPayload<'a> {
    /// Builds the payload for a submission, keeping field order.
    pub fn new(fields: &'a FieldMap) -> Self {
        Self {
            embeds: [DiscordEmbed {
                fields: fields
                    .iter()
                    .map(|(name, value)| DiscordField { name, value })
                    .collect(),
            }],
        }
    }
}

/// Delivers submissions to a Discord webhook URL.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: reqwest::Client,
    url: String,
}

impl DiscordNotifier {
    /// Creates a notifier posting to `url` through `client`.
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Returns the target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn notify(&self, fields: &FieldMap) -> Result<(), NotifyError> {
        post_json(&self.client, &self.url, CONTENT_TYPE, &DiscordPayload::new(fields)).await
    }
}
