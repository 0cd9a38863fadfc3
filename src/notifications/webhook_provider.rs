//! Webhook notification provider implementation.
//!
//! `json://` and `form://` URLs (`jsons://`, `forms://` for HTTPS) post the
//! notification to `http(s)://host[:port]/path`. Query parameters shape the
//! request:
//! - `+Name=value` adds an HTTP header
//! - `-key` drops a key from the payload
//! - `:key=value` adds or replaces a payload key
//! - `method=PUT` changes the HTTP method
//! - anything else is forwarded as a query parameter

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Method, Url};

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use super::service_url::{ServiceKind, ServiceUrl};
use crate::error::{AppError, AppResult};

/// Payload version field expected by receivers of the JSON/form webhook shape
const PAYLOAD_VERSION: &str = "1.0";

/// Notification type reported in the payload
const NOTIFY_TYPE: &str = "info";

/// Encoding of the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    Json,
    Form,
}

/// Webhook destination settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: String,
    pub method: String,
    pub mode: PayloadMode,
    pub headers: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
    pub drop_keys: Vec<String>,
    pub extra_fields: BTreeMap<String, String>,
    pub basic_auth: Option<(String, Option<String>)>,
    pub timeout_seconds: u64,
}

impl WebhookConfig {
    /// Read the endpoint and request options from a webhook service URL
    pub fn from_service_url(url: &ServiceUrl, timeout_seconds: u64) -> AppResult<Self> {
        let mode = match url.kind() {
            ServiceKind::JsonWebhook => PayloadMode::Json,
            ServiceKind::FormWebhook => PayloadMode::Form,
            other => {
                return Err(AppError::validation(
                    "url",
                    format!("{:?} is not a webhook service", other),
                ));
            }
        };

        let mut config = Self {
            url: format!("{}{}", url.http_base(), url.path()),
            method: "POST".to_string(),
            mode,
            headers: BTreeMap::new(),
            query: Vec::new(),
            drop_keys: Vec::new(),
            extra_fields: BTreeMap::new(),
            basic_auth: None,
            timeout_seconds,
        };

        for (key, value) in url.params() {
            if let Some(header) = key.strip_prefix('+') {
                config.headers.insert(header.to_string(), value);
            } else if let Some(field) = key.strip_prefix('-') {
                config.drop_keys.push(field.to_string());
            } else if let Some(field) = key.strip_prefix(':') {
                config.extra_fields.insert(field.to_string(), value);
            } else if key.eq_ignore_ascii_case("method") {
                config.method = value.to_uppercase();
            } else {
                config.query.push((key, value));
            }
        }

        if let Some(user) = url.username() {
            config.basic_auth = Some((user, url.password()));
        }

        Ok(config)
    }
}

/// Webhook notification provider
///
/// Sends HTTP requests to configured webhook URLs.
pub struct WebhookProvider {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookProvider {
    pub fn new(client: reqwest::Client, config: WebhookConfig) -> Self {
        Self { client, config }
    }

    /// Parses HTTP method string into reqwest Method
    fn parse_method(&self) -> Result<Method, AppError> {
        self.config
            .method
            .parse()
            .map_err(|_| AppError::Validation {
                field: "method".to_string(),
                reason: format!("Invalid HTTP method: {}", self.config.method),
            })
    }

    fn endpoint(&self) -> AppResult<Url> {
        let mut url = Url::parse(&self.config.url)
            .map_err(|e| AppError::validation("url", format!("invalid webhook URL: {}", e)))?;
        if !self.config.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.config.query);
        }
        Ok(url)
    }

    /// Payload fields after `-key` and `:key=value` adjustments
    fn build_payload(&self, message: &NotificationMessage) -> BTreeMap<String, String> {
        let mut payload = BTreeMap::from([
            ("version".to_string(), PAYLOAD_VERSION.to_string()),
            (
                "title".to_string(),
                message.title.clone().unwrap_or_default(),
            ),
            ("message".to_string(), message.body.clone()),
            ("type".to_string(), NOTIFY_TYPE.to_string()),
        ]);

        for key in &self.config.drop_keys {
            payload.remove(key);
        }
        for (key, value) in &self.config.extra_fields {
            payload.insert(key.clone(), value.clone());
        }

        payload
    }
}

#[async_trait]
impl NotificationProvider for WebhookProvider {
    /// Sends the payload as JSON or as an urlencoded form
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let start = Instant::now();

        let method = self.parse_method()?;
        let payload = self.build_payload(message);
        let mut request = self
            .client
            .request(method, self.endpoint()?)
            .timeout(Duration::from_secs(self.config.timeout_seconds));

        request = match self.config.mode {
            PayloadMode::Json => request.json(&payload),
            PayloadMode::Form => request.form(&payload),
        };

        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        if let Some((user, password)) = &self.config.basic_auth {
            request = request.basic_auth(user, password.as_ref());
        }

        tracing::debug!(
            url = %self.config.url,
            method = %self.config.method,
            mode = ?self.config.mode,
            "Posting webhook"
        );

        Ok(NotificationResult::from_http(request.send().await, start).await)
    }

    fn name(&self) -> &'static str {
        match self.config.mode {
            PayloadMode::Json => "json",
            PayloadMode::Form => "form",
        }
    }

    /// Checks that the endpoint is HTTP(S) and the method is valid
    async fn validate_config(&self) -> AppResult<()> {
        let url = self.endpoint()?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(AppError::Validation {
                field: "url".to_string(),
                reason: "URL must use http or https protocol".to_string(),
            });
        }

        self.parse_method()?;

        Ok(())
    }
}
