//! Notification dispatch with pluggable providers.
//!
//! The core trait `NotificationProvider` has one implementation per service
//! URL family (mail, JSON/form webhooks, Bark, ntfy, Discord). The
//! `NotificationDispatcher` resolves each destination to a provider and
//! delivers to them in order.

mod bark_provider;
mod discord_provider;
mod email_provider;
mod message;
mod ntfy_provider;
mod provider;
mod service_url;
mod webhook_provider;

pub mod dispatcher;
pub mod mail_overrides;

pub use bark_provider::{BarkConfig, BarkProvider};
pub use discord_provider::{DiscordConfig, DiscordProvider};
pub use dispatcher::{
    DeliveryOutcome, DeliveryStatus, DispatchReport, DispatchRequest, NotificationDispatcher,
};
pub use email_provider::{EmailConfig, EmailProvider};
pub use mail_overrides::{MailOverrides, MailSecurity};
pub use message::{BodyByFormat, BodyFormat, ServiceTarget};
pub use ntfy_provider::{NtfyConfig, NtfyProvider};
pub use provider::{NotificationMessage, NotificationProvider, NotificationResult};
pub use service_url::{ServiceKind, ServiceUrl};
pub use webhook_provider::{PayloadMode, WebhookConfig, WebhookProvider};
