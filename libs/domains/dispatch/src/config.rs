//! Dispatch configuration.
//!
//! Implements the `FromEnv` trait from `core_config`.

use crate::error::ConfigurationError;
use crate::providers::{DEFAULT_SENDGRID_API_URL, ProviderCredentials};
use crate::validator::is_valid_address;
use core_config::{ConfigError, FromEnv, env_flag, env_optional, env_or_default, env_parse};
use std::time::Duration;

pub const DEFAULT_DISPATCH_PATH: &str = "/api/send-email";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

const API_KEY_PREFIX: &str = "SG.";

/// Provider credentials as found in the environment.
///
/// Both values may be missing at startup; the service still boots and reports
/// the problem per request and on `/ready`.
#[derive(Clone, Default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub sender: Option<String>,
}

/// Settings that passed the readiness check.
#[derive(Debug, Clone)]
pub struct ReadyProvider {
    pub credentials: ProviderCredentials,
    pub sender: String,
}

impl ProviderSettings {
    pub fn new(api_key: Option<String>, sender: Option<String>) -> Self {
        Self { api_key, sender }
    }

    pub fn ready(&self) -> Result<ReadyProvider, ConfigurationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ConfigurationError::MissingApiKey)?;
        if !api_key.starts_with(API_KEY_PREFIX) {
            return Err(ConfigurationError::MalformedApiKey);
        }

        let sender = self
            .sender
            .as_deref()
            .ok_or(ConfigurationError::MissingSender)?;
        if !is_valid_address(sender) {
            return Err(ConfigurationError::InvalidSender);
        }

        Ok(ReadyProvider {
            credentials: ProviderCredentials {
                api_key: api_key.to_string(),
            },
            sender: sender.to_string(),
        })
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("sender", &self.sender)
            .finish()
    }
}

/// Dispatch service configuration.
///
/// Loaded from environment variables:
/// - `SENDGRID_API_KEY`, `SENDER_EMAIL` (optional, checked per request)
/// - `SENDGRID_API_URL` (default `https://api.sendgrid.com/v3`)
/// - `AUTH_REQUIRED` (default `true`)
/// - `PROVIDER_TIMEOUT_SECS` (default 10)
/// - `MAX_BODY_BYTES` (default 16 MiB)
/// - `DISPATCH_PATH` (default `/api/send-email`)
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub path: String,
    pub auth_required: bool,
    pub provider: ProviderSettings,
    pub api_url: String,
    pub provider_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DISPATCH_PATH.to_string(),
            auth_required: true,
            provider: ProviderSettings::default(),
            api_url: DEFAULT_SENDGRID_API_URL.to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FromEnv for DispatchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let path = env_or_default("DISPATCH_PATH", DEFAULT_DISPATCH_PATH);
        if !path.starts_with('/') {
            return Err(ConfigError::ParseError {
                key: "DISPATCH_PATH".to_string(),
                details: format!("must start with '/', got '{}'", path),
            });
        }

        Ok(Self {
            path,
            auth_required: env_flag("AUTH_REQUIRED", true)?,
            provider: ProviderSettings::new(
                env_optional("SENDGRID_API_KEY"),
                env_optional("SENDER_EMAIL"),
            ),
            api_url: env_optional("SENDGRID_API_URL")
                .unwrap_or_else(|| DEFAULT_SENDGRID_API_URL.to_string()),
            provider_timeout: Duration::from_secs(env_parse(
                "PROVIDER_TIMEOUT_SECS",
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            )?),
            max_body_bytes: env_parse("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "DISPATCH_PATH",
        "AUTH_REQUIRED",
        "SENDGRID_API_KEY",
        "SENDER_EMAIL",
        "SENDGRID_API_URL",
        "PROVIDER_TIMEOUT_SECS",
        "MAX_BODY_BYTES",
    ];

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = DispatchConfig::from_env().unwrap();
            assert_eq!(config.path, "/api/send-email");
            assert!(config.auth_required);
            assert_eq!(config.api_url, "https://api.sendgrid.com/v3");
            assert_eq!(config.provider_timeout, Duration::from_secs(10));
            assert_eq!(config.max_body_bytes, 16 * 1024 * 1024);
            assert_eq!(config.provider.api_key, None);
            assert_eq!(config.provider.sender, None);
        });
    }

    #[test]
    fn test_overrides_and_bom_stripping() {
        temp_env::with_vars(
            [
                ("DISPATCH_PATH", Some("/mail")),
                ("AUTH_REQUIRED", Some("false")),
                ("SENDGRID_API_KEY", Some("\u{FEFF}SG.abc \n")),
                ("SENDER_EMAIL", Some(" noreply@example.com ")),
                ("PROVIDER_TIMEOUT_SECS", Some("3")),
                ("MAX_BODY_BYTES", Some("1024")),
            ],
            || {
                let config = DispatchConfig::from_env().unwrap();
                assert_eq!(config.path, "/mail");
                assert!(!config.auth_required);
                assert_eq!(config.provider.api_key.as_deref(), Some("SG.abc"));
                assert_eq!(config.provider.sender.as_deref(), Some("noreply@example.com"));
                assert_eq!(config.provider_timeout, Duration::from_secs(3));
                assert_eq!(config.max_body_bytes, 1024);
            },
        );
    }

    #[test]
    fn test_invalid_values_fail() {
        temp_env::with_var("AUTH_REQUIRED", Some("maybe"), || {
            assert!(DispatchConfig::from_env().is_err());
        });
        temp_env::with_var("PROVIDER_TIMEOUT_SECS", Some("soon"), || {
            assert!(DispatchConfig::from_env().is_err());
        });
        temp_env::with_var("DISPATCH_PATH", Some("api/send-email"), || {
            assert!(DispatchConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_readiness() {
        let cases = [
            (None, Some("a@b.com"), Err(ConfigurationError::MissingApiKey)),
            (Some("key"), Some("a@b.com"), Err(ConfigurationError::MalformedApiKey)),
            (Some("SG.key"), None, Err(ConfigurationError::MissingSender)),
            (Some("SG.key"), Some("nobody"), Err(ConfigurationError::InvalidSender)),
        ];
        for (key, sender, expected) in cases {
            let settings = ProviderSettings::new(key.map(Into::into), sender.map(Into::into));
            assert_eq!(settings.ready().map(|r| r.sender), expected);
        }

        let ready = ProviderSettings::new(Some("SG.key".into()), Some("a@b.com".into()))
            .ready()
            .unwrap();
        assert_eq!(ready.sender, "a@b.com");
        assert_eq!(ready.credentials.api_key, "SG.key");
    }

    #[test]
    fn test_settings_debug_hides_key() {
        let settings = ProviderSettings::new(Some("SG.secret".into()), None);
        assert!(!format!("{settings:?}").contains("SG.secret"));
    }
}
