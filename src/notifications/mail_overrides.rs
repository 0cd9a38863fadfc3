//! Transport overrides applied to plain `mailto://` destinations.
//!
//! The overrides travel with the provider configuration. Nothing here touches
//! process state unless `export_legacy_env` is called explicitly.

use std::time::Duration;

/// Connect timeout forced on overridden mail destinations
pub const MAIL_OVERRIDE_TIMEOUT_SECONDS: u64 = 30;

/// How the SMTP session is encrypted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailSecurity {
    /// Plaintext connect, mandatory STARTTLS upgrade before authentication
    Starttls,
    /// TLS from the first byte (SMTPS)
    ImplicitTls,
    /// Upgrade with STARTTLS when the server offers it
    Opportunistic,
}

impl MailSecurity {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailSecurity::Starttls => "starttls",
            MailSecurity::ImplicitTls => "ssl",
            MailSecurity::Opportunistic => "opportunistic",
        }
    }
}

/// Transport settings that replace whatever the service URL implied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailOverrides {
    pub security: MailSecurity,
    pub timeout: Duration,
    pub verify_certificate: bool,
}

impl MailOverrides {
    /// STARTTLS required, fixed connect timeout, no certificate verification
    pub fn starttls() -> Self {
        Self {
            security: MailSecurity::Starttls,
            timeout: Duration::from_secs(MAIL_OVERRIDE_TIMEOUT_SECONDS),
            verify_certificate: false,
        }
    }

    /// The `APPRISE_*` variable pairs older deployments read these settings from
    pub fn legacy_env(&self) -> [(&'static str, String); 4] {
        [
            ("APPRISE_SMTP_SECURE", self.security.as_str().to_string()),
            ("APPRISE_SMTP_MODE", self.security.as_str().to_string()),
            ("APPRISE_SMTP_TIMEOUT", self.timeout.as_secs().to_string()),
            (
                "APPRISE_VERIFY_CERTIFICATE",
                self.verify_certificate.to_string(),
            ),
        ]
    }
}

impl Default for MailOverrides {
    fn default() -> Self {
        Self::starttls()
    }
}

/// Write the legacy variables into the process environment.
///
/// The variables are never cleared, so later destinations in the same run
/// still observe them.
pub fn export_legacy_env(overrides: &MailOverrides) {
    for (key, value) in overrides.legacy_env() {
        tracing::debug!(key, value = %value, "Exporting legacy mail transport variable");
        // SAFETY: destinations are processed one at a time on a
        // current-thread runtime, and no blocking task is in flight between
        // two destinations.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starttls_overrides() {
        let overrides = MailOverrides::starttls();
        assert_eq!(overrides.security, MailSecurity::Starttls);
        assert_eq!(overrides.timeout, Duration::from_secs(30));
        assert!(!overrides.verify_certificate);
        assert_eq!(MailOverrides::default(), overrides);
    }

    #[test]
    fn test_legacy_env_values() {
        let env = MailOverrides::starttls().legacy_env();
        assert_eq!(
            env,
            [
                ("APPRISE_SMTP_SECURE", "starttls".to_string()),
                ("APPRISE_SMTP_MODE", "starttls".to_string()),
                ("APPRISE_SMTP_TIMEOUT", "30".to_string()),
                ("APPRISE_VERIFY_CERTIFICATE", "false".to_string()),
            ]
        );
    }
}
