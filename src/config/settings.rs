//! Configuration settings structures for notify-relay
//!
//! Every section falls back to its defaults, so an empty or missing
//! configuration file yields a usable `Settings`.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::LoggerConfig;
use crate::notifications::ServiceTarget;

// ============================================================================
// Default value functions
// ============================================================================

fn default_http_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("notify-relay/{}", crate::pkg_version())
}

/// Upper bound for `http.timeout_seconds`
const MAX_HTTP_TIMEOUT_SECONDS: u64 = 300;

// ============================================================================
// HTTP Configuration
// ============================================================================

/// Shared HTTP client configuration used by every webhook and push provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// ============================================================================
// Mail Configuration
// ============================================================================

/// Defaults for mail destinations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    /// Sender address used when the service URL names none
    #[serde(default)]
    pub from: Option<String>,

    /// Also write the legacy `APPRISE_*` transport variables into the
    /// process environment whenever a `mailto://` destination is processed.
    #[serde(default)]
    pub export_legacy_env: bool,
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logger: LoggerConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub mail: MailConfig,

    /// Destinations notified on every run, after the ones given on the
    /// command line
    #[serde(default)]
    pub services: Vec<ServiceTarget>,
}

impl Settings {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger
            .validate()
            .map_err(|e| ConfigError::validation("logger".to_string(), e.to_string()))?;

        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > MAX_HTTP_TIMEOUT_SECONDS {
            return Err(ConfigError::validation(
                "http.timeout_seconds".to_string(),
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_HTTP_TIMEOUT_SECONDS, self.http.timeout_seconds
                ),
            ));
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::validation(
                "http.user_agent",
                "cannot be empty",
            ));
        }

        if let Some(from) = &self.mail.from
            && !from.contains('@')
        {
            return Err(ConfigError::validation(
                "mail.from".to_string(),
                format!("'{}' is not an email address", from),
            ));
        }

        for (index, service) in self.services.iter().enumerate() {
            if service.url.trim().is_empty() {
                return Err(ConfigError::validation(
                    format!("services[{}].url", index),
                    "cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::BodyFormat;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.http.timeout_seconds, 30);
        assert!(settings.http.user_agent.starts_with("notify-relay/"));
        assert!(!settings.mail.export_legacy_env);
        assert!(settings.services.is_empty());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut settings = Settings::default();
        settings.http.timeout_seconds = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("http.timeout_seconds"));
    }

    #[test]
    fn test_excessive_timeout_rejected() {
        let mut settings = Settings::default();
        settings.http.timeout_seconds = 301;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_bad_sender_rejected() {
        let mut settings = Settings::default();
        settings.mail.from = Some("not-an-address".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_default_service_url_rejected() {
        let mut settings = Settings::default();
        settings.services.push(ServiceTarget {
            url: "  ".to_string(),
            format: BodyFormat::Text,
        });
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("services[0].url"));
    }

    #[test]
    fn test_invalid_logger_level_rejected() {
        let mut settings = Settings::default();
        settings.logger.level = "chatty".to_string();
        assert!(settings.validate().is_err());
    }
}
