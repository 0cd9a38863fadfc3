//! ntfy notification provider implementation.
//!
//! Service URL forms:
//! - `ntfy://topic` publishes to the public server at ntfy.sh
//! - `ntfy://[user:pass@]host[:port]/topic` publishes to a self-hosted server
//!   (`ntfys://` for HTTPS)
//!
//! Options: `priority` (min, low, default, high, max or 1-5) and `tags`
//! (comma separated).

use std::time::Instant;

use async_trait::async_trait;

use super::message::BodyFormat;
use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use super::service_url::ServiceUrl;
use crate::error::{AppError, AppResult};

/// Public ntfy server used when the URL names only a topic
const PUBLIC_SERVER: &str = "https://ntfy.sh";

const PRIORITIES: [&str; 10] = [
    "min", "low", "default", "high", "max", "1", "2", "3", "4", "5",
];

/// ntfy topic settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NtfyConfig {
    pub server_url: String,
    pub topic: String,
    pub priority: Option<String>,
    pub tags: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl NtfyConfig {
    pub fn from_service_url(url: &ServiceUrl) -> AppResult<Self> {
        let segments = url.path_segments();
        let (server_url, topic) = match segments.first() {
            Some(topic) => (url.http_base(), topic.clone()),
            None => (PUBLIC_SERVER.to_string(), url.host().to_string()),
        };

        Ok(Self {
            server_url,
            topic,
            priority: url.param("priority").map(|p| p.to_lowercase()),
            tags: url.param("tags"),
            username: url.username(),
            password: url.password(),
        })
    }

    pub fn build_api_url(&self) -> String {
        format!(
            "{}/{}",
            self.server_url.trim_end_matches('/'),
            urlencoding::encode(&self.topic)
        )
    }
}

/// ntfy notification provider
pub struct NtfyProvider {
    client: reqwest::Client,
    config: NtfyConfig,
}

impl NtfyProvider {
    pub fn new(client: reqwest::Client, config: NtfyConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl NotificationProvider for NtfyProvider {
    /// Publishes the body as the message, options travel as headers
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let start = Instant::now();

        let mut request = self
            .client
            .post(self.config.build_api_url())
            .body(message.body.clone());

        if let Some(title) = &message.title {
            request = request.header("X-Title", title);
        }
        if let Some(priority) = &self.config.priority {
            request = request.header("X-Priority", priority);
        }
        if let Some(tags) = &self.config.tags {
            request = request.header("X-Tags", tags);
        }
        if message.format == BodyFormat::Markdown {
            request = request.header("X-Markdown", "yes");
        }
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_ref());
        }

        tracing::debug!(
            server = %self.config.server_url,
            topic = %self.config.topic,
            "Publishing ntfy message"
        );

        Ok(NotificationResult::from_http(request.send().await, start).await)
    }

    fn name(&self) -> &'static str {
        "ntfy"
    }

    async fn validate_config(&self) -> AppResult<()> {
        if self.config.topic.trim().is_empty() {
            return Err(AppError::validation("topic", "ntfy topic cannot be empty"));
        }

        if let Some(priority) = &self.config.priority
            && !PRIORITIES.contains(&priority.as_str())
        {
            return Err(AppError::validation(
                "priority",
                format!(
                    "'{}' is not one of min, low, default, high, max or 1-5",
                    priority
                ),
            ));
        }

        Ok(())
    }
}
