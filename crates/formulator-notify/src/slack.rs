//! Slack incoming-webhook target.
//!
//! Slack receives one section block with a `mrkdwn` field per submitted pair,
//! the name in bold on the first line and the value on the second.

use async_trait::async_trait;
use serde::Serialize;

use formulator_core::FieldMap;

use crate::error::NotifyError;
use crate::notifier::{post_json, Notifier};

/// Content type Slack payloads are sent with.
pub const CONTENT_TYPE: &str = "application/json";

/// Wire shape of a Slack webhook body.
#[derive(Debug, Serialize)]
pub struct SlackPayload {
    blocks: [SlackSection; 1],
}

#[derive(Debug, Serialize)]
struct SlackSection {
    #[serde(rename = "type")]
    kind: &'static str,
    fields: Vec<SlackText>,
}

#[derive(Debug, Serialize)]
struct SlackText {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

impl SlackPayload {
    /// Builds the payload for a submission, keeping field order.
    pub fn new(fields: &FieldMap) -> Self {
        Self {
            blocks: [SlackSection {
                kind: "section",
                fields: fields
                    .iter()
                    .map(|(name, value)| SlackText {
                        kind: "mrkdwn",
                        text: format!("*{name}*\n{value}"),
                    })
                    .collect(),
            }],
        }
    }
}

/// Delivers submissions to a Slack incoming-webhook URL.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    client: reqwest::Client,
    url: String,
}

impl SlackNotifier {
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
impl Notifier for SlackNotifier {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn notify(&self, fields: &FieldMap) -> Result<(), NotifyError> {
        post_json(&self.client, &self.url, CONTENT_TYPE, &SlackPayload::new(fields)).await
    }
}
