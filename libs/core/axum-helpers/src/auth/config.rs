//! JWT configuration.
//!
//! Implements the `FromEnv` trait from `core_config`.

use core_config::{ConfigError, FromEnv, env_optional, env_parse, env_required};

/// JWT verification configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - HS256 secret, at least 32 characters
/// - `JWT_ISSUER` (optional) - when set, the `iss` claim must match
/// - `JWT_LEEWAY_SECS` (optional, default 60) - clock skew allowance for `exp`
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: Option<String>,
    pub leeway_secs: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and no issuer check.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            issuer: None,
            leeway_secs: 60,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            issuer: env_optional("JWT_ISSUER"),
            leeway_secs: env_parse("JWT_LEEWAY_SECS", 60)?,
        })
    }
}
