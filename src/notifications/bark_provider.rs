//! Bark notification provider implementation.
//!
//! Sends push notifications to iOS devices via Bark server API.
//! Service URL form: `bark://host[:port]/device_key?sound=bell&group=ops&level=active`
//! (`barks://` for HTTPS).
//!
//! Bark API Reference: https://github.com/Finb/Bark

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use super::service_url::ServiceUrl;
use crate::error::{AppError, AppResult};

/// Bark server settings for one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarkConfig {
    pub server_url: String,
    pub device_key: String,
    pub icon: Option<String>,
    pub sound: Option<String>,
    pub level: Option<String>,
    pub url: Option<String>,
    pub group: Option<String>,
    pub auto_copy: u8,
    pub is_archive: u8,
}

impl BarkConfig {
    /// Read the server, device key and push options from a bark service URL
    pub fn from_service_url(url: &ServiceUrl) -> AppResult<Self> {
        let device_key = url
            .path_segments()
            .into_iter()
            .next()
            .ok_or_else(|| AppError::validation("device_key", "bark URL has no device key"))?;

        Ok(Self {
            server_url: url.http_base(),
            device_key,
            icon: url.param("icon"),
            sound: url.param("sound"),
            level: url.param("level"),
            url: url.param("click").or_else(|| url.param("url")),
            group: url.param("group"),
            auto_copy: u8::from(url.flag("autocopy")),
            is_archive: u8::from(url.flag("archive")),
        })
    }

    /// Push endpoint for the configured device
    pub fn build_api_url(&self) -> String {
        format!(
            "{}/push/{}",
            self.server_url.trim_end_matches('/'),
            self.device_key
        )
    }
}

/// Bark notification provider
///
/// Bark is an open-source iOS push notification service that supports
/// custom icons, sounds, deep links, and more.
pub struct BarkProvider {
    client: reqwest::Client,
    config: BarkConfig,
}

impl BarkProvider {
    pub fn new(client: reqwest::Client, config: BarkConfig) -> Self {
        Self { client, config }
    }

    /// Validates the Bark server URL
    fn validate_server_url(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.config.server_url).map_err(|_| AppError::Validation {
            field: "server_url".to_string(),
            reason: "Invalid URL format".to_string(),
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(AppError::Validation {
                field: "server_url".to_string(),
                reason: "URL must use http or https protocol".to_string(),
            });
        }

        Ok(())
    }

    /// Builds the request body for Bark API
    fn build_request_body(&self, message: &NotificationMessage) -> serde_json::Value {
        let mut body = json!({
            "title": message.title.clone().unwrap_or_else(|| "Notification".to_string()),
            "body": message.body,
        });

        if let Some(icon) = &self.config.icon {
            body["icon"] = json!(icon);
        }

        if let Some(sound) = &self.config.sound {
            body["sound"] = json!(sound);
        }

        if let Some(level) = &self.config.level {
            body["level"] = json!(level);
        }

        if let Some(url) = &self.config.url {
            body["url"] = json!(url);
        }

        if let Some(group) = &self.config.group {
            body["group"] = json!(group);
        }

        if self.config.auto_copy > 0 {
            body["autoCopy"] = json!(self.config.auto_copy);
        }

        if self.config.is_archive > 0 {
            body["isArchive"] = json!(self.config.is_archive);
        }

        body
    }
}

#[async_trait]
impl NotificationProvider for BarkProvider {
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let start = Instant::now();

        let request_body = self.build_request_body(message);
        let api_url = self.config.build_api_url();

        tracing::debug!(server = %self.config.server_url, "Pushing Bark notification");

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await;

        Ok(NotificationResult::from_http(response, start).await)
    }

    fn name(&self) -> &'static str {
        "bark"
    }

    /// Checks the server URL, the device key and the push level
    async fn validate_config(&self) -> AppResult<()> {
        self.validate_server_url()?;

        if self.config.device_key.is_empty() {
            return Err(AppError::Validation {
                field: "device_key".to_string(),
                reason: "Device key cannot be empty".to_string(),
            });
        }

        if let Some(level) = &self.config.level {
            match level.as_str() {
                "passive" | "active" | "timeSensitive" | "critical" => {}
                _ => {
                    return Err(AppError::Validation {
                        field: "level".to_string(),
                        reason: "Level must be one of: passive, active, timeSensitive, critical"
                            .to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::BodyFormat;

    fn provider_for(url: &str) -> BarkProvider {
        let config = BarkConfig::from_service_url(&ServiceUrl::parse(url).unwrap()).unwrap();
        BarkProvider::new(reqwest::Client::new(), config)
    }

    #[test]
    fn test_build_api_url() {
        let provider = provider_for("barks://bark.example.com/test_key_123");
        assert_eq!(
            provider.config.build_api_url(),
            "https://bark.example.com/push/test_key_123"
        );
    }

    #[test]
    fn test_build_api_url_with_port() {
        let provider = provider_for("bark://127.0.0.1:8080/test_key_123");
        assert_eq!(
            provider.config.build_api_url(),
            "http://127.0.0.1:8080/push/test_key_123"
        );
    }

    #[test]
    fn test_missing_device_key() {
        let url = ServiceUrl::parse("bark://bark.example.com").unwrap();
        assert!(BarkConfig::from_service_url(&url).is_err());
    }

    #[test]
    fn test_build_request_body_minimal() {
        let provider = provider_for("bark://bark.example.com/key");
        let message = NotificationMessage::new("Test Title", "Test Body", BodyFormat::Text);

        let body = provider.build_request_body(&message);
        assert_eq!(body["title"], "Test Title");
        assert_eq!(body["body"], "Test Body");
        assert!(body.get("icon").is_none());
        assert!(body.get("sound").is_none());
    }

    #[test]
    fn test_build_request_body_untitled() {
        let provider = provider_for("bark://bark.example.com/key");
        let message = NotificationMessage::new("", "Test Body", BodyFormat::Text);
        assert_eq!(provider.build_request_body(&message)["title"], "Notification");
    }

    #[test]
    fn test_build_request_body_full() {
        let provider = provider_for(
            "barks://bark.example.com/key?icon=https://example.com/icon.png&sound=bell&level=active&click=https://example.com/deep-link&group=ops&autocopy=yes&archive=yes",
        );
        let message = NotificationMessage::new("Test Title", "Test Body", BodyFormat::Text);

        let body = provider.build_request_body(&message);
        assert_eq!(body["icon"], "https://example.com/icon.png");
        assert_eq!(body["sound"], "bell");
        assert_eq!(body["level"], "active");
        assert_eq!(body["url"], "https://example.com/deep-link");
        assert_eq!(body["group"], "ops");
        assert_eq!(body["autoCopy"], 1);
        assert_eq!(body["isArchive"], 1);
    }

    #[tokio::test]
    async fn test_validate_level() {
        assert!(provider_for("bark://host/key?level=active").validate_config().await.is_ok());
        assert!(provider_for("bark://host/key?level=loud").validate_config().await.is_err());
    }
}
