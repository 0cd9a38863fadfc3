//! Core notification provider trait and types.
//!
//! This module provides the abstraction for notification providers,
//! one implementation per service URL family.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::message::BodyFormat;
use crate::error::AppResult;

/// Message to be sent via notification provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message title/subject (optional for some providers)
    pub title: Option<String>,
    /// Message body, already rendered in `format`
    pub body: String,
    /// Rendering of `body`
    pub format: BodyFormat,
}

impl NotificationMessage {
    /// Build a message; an empty title is treated as no title
    pub fn new(title: &str, body: impl Into<String>, format: BodyFormat) -> Self {
        Self {
            title: (!title.trim().is_empty()).then(|| title.to_string()),
            body: body.into(),
            format,
        }
    }
}

/// Result of a notification send attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether send was successful
    pub success: bool,
    /// HTTP status code or SMTP reply code
    pub status_code: Option<u16>,
    /// Response body or error message
    pub response: Option<String>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

impl NotificationResult {
    /// Failed attempt that never got a reply from the service
    pub fn failed(error: impl Into<String>, start: Instant) -> Self {
        Self {
            success: false,
            status_code: None,
            response: Some(error.into()),
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Outcome of an HTTP exchange
    ///
    /// Transport errors become a failed result so the remaining destinations
    /// are still attempted.
    pub async fn from_http(
        response: Result<reqwest::Response, reqwest::Error>,
        start: Instant,
    ) -> Self {
        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let success = resp.status().is_success();
                let response_text = resp.text().await.ok();

                Self {
                    success,
                    status_code: Some(status_code),
                    response: response_text,
                    duration_ms: start.elapsed().as_millis() as u64,
                }
            }
            Err(e) => Self::failed(e.to_string(), start),
        }
    }
}

/// Trait for notification providers (mail, webhook, push, chat)
///
/// All providers must be Send + Sync for use in async contexts.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends a notification message
    ///
    /// Delivery failures are reported through `NotificationResult`;
    /// an `Err` means the message could not even be prepared.
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}
