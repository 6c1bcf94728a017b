//! Recording webhook targets.
//!
//! [`MockWebhooks`] starts one wiremock server that plays both the Discord
//! and the Slack webhook, answers with configurable statuses, and keeps every
//! request it received for later inspection.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use formulator_core::Settings;

const DISCORD_PATH: &str = "/discord";
const SLACK_PATH: &str = "/slack";

/// A wiremock server standing in for both webhook targets.
#[derive(Debug)]
pub struct MockWebhooks {
    server: MockServer,
}

/// One request received by a mock target.
#[derive(Debug, Clone)]
pub struct ReceivedWebhook {
    /// The `Content-Type` the dispatcher sent.
    pub content_type: Option<String>,
    /// The parsed JSON body.
    pub body: serde_json::Value,
}

impl MockWebhooks {
    /// Starts targets that accept every delivery.
    pub async fn start() -> Self {
        Self::with_status(200, 200).await
    }

    /// Starts targets answering with the given statuses.
    pub async fn with_status(discord_status: u16, slack_status: u16) -> Self {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(DISCORD_PATH))
            .respond_with(ResponseTemplate::new(discord_status))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(SLACK_PATH))
            .respond_with(ResponseTemplate::new(slack_status))
            .mount(&server)
            .await;

        Self { server }
    }

    /// Returns the Discord webhook URL.
    pub fn discord_url(&self) -> String {
        format!("{}{DISCORD_PATH}", self.server.uri())
    }

    /// Returns the Slack webhook URL.
    pub fn slack_url(&self) -> String {
        format!("{}{SLACK_PATH}", self.server.uri())
    }

    /// Points both webhook URLs of `settings` at this server.
    pub fn configure(&self, settings: Settings) -> Settings {
        Settings {
            discord_webhook_url: Some(self.discord_url()),
            slack_webhook_url: Some(self.slack_url()),
            ..settings
        }
    }

    /// Returns the requests received by the Discord target.
    pub async fn discord_requests(&self) -> Vec<ReceivedWebhook> {
        self.received(DISCORD_PATH).await
    }

    /// Returns the requests received by the Slack target.
    pub async fn slack_requests(&self) -> Vec<ReceivedWebhook> {
        self.received(SLACK_PATH).await
    }

    async fn received(&self, target: &str) -> Vec<ReceivedWebhook> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == target)
            .map(|request| ReceivedWebhook {
                content_type: request
                    .headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from),
                body: serde_json::from_slice(&request.body).unwrap_or(serde_json::Value::Null),
            })
            .collect()
    }
}
