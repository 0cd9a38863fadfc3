//! Discord webhook notification provider implementation.
//!
//! Service URL form: `discord://[botname@]webhook_id/webhook_token?avatar_url=...`

use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use super::service_url::ServiceUrl;
use crate::error::{AppError, AppResult};

const DISCORD_API_BASE: &str = "https://discord.com/api/webhooks";

/// Discord rejects messages longer than this many characters
const MAX_CONTENT_CHARS: usize = 2000;

/// Discord webhook settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordConfig {
    pub webhook_id: String,
    pub webhook_token: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub api_base: String,
}

impl DiscordConfig {
    pub fn from_service_url(url: &ServiceUrl) -> AppResult<Self> {
        let webhook_token = url
            .path_segments()
            .into_iter()
            .next()
            .ok_or_else(|| AppError::validation("webhook_token", "discord URL has no token"))?;

        Ok(Self {
            webhook_id: url.host().to_string(),
            webhook_token,
            username: url.param("botname").or_else(|| url.username()),
            avatar_url: url.param("avatar_url"),
            api_base: DISCORD_API_BASE.to_string(),
        })
    }

    pub fn build_api_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.webhook_id,
            self.webhook_token
        )
    }
}

/// Discord webhook notification provider
pub struct DiscordProvider {
    client: reqwest::Client,
    config: DiscordConfig,
}

impl DiscordProvider {
    pub fn new(client: reqwest::Client, config: DiscordConfig) -> Self {
        Self { client, config }
    }

    /// Bold title line followed by the body, cut to Discord's limit
    fn build_content(message: &NotificationMessage) -> String {
        let content = match &message.title {
            Some(title) => format!("**{}**\r\n{}", title, message.body),
            None => message.body.clone(),
        };
        content.chars().take(MAX_CONTENT_CHARS).collect()
    }

    fn build_request_body(&self, message: &NotificationMessage) -> serde_json::Value {
        let mut body = json!({ "content": Self::build_content(message) });

        if let Some(username) = &self.config.username {
            body["username"] = json!(username);
        }
        if let Some(avatar_url) = &self.config.avatar_url {
            body["avatar_url"] = json!(avatar_url);
        }

        body
    }
}

#[async_trait]
impl NotificationProvider for DiscordProvider {
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let start = Instant::now();

        tracing::debug!(webhook_id = %self.config.webhook_id, "Posting Discord message");

        let response = self
            .client
            .post(self.config.build_api_url())
            .json(&self.build_request_body(message))
            .send()
            .await;

        Ok(NotificationResult::from_http(response, start).await)
    }

    fn name(&self) -> &'static str {
        "discord"
    }

    async fn validate_config(&self) -> AppResult<()> {
        if !self.config.webhook_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "webhook_id",
                "Discord webhook id must be numeric",
            ));
        }
        Ok(())
    }
}
