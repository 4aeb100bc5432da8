use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (caller ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Stateless HS256 JWT verification.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        tracing::info!(issuer = ?config.issuer, "JWT auth initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
        }
    }

    /// Issue a token. Used by tooling and tests; the dispatch service only verifies.
    pub fn create_token(
        &self,
        subject: &str,
        email: Option<&str>,
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            email: email.map(str::to_string),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verify JWT signature, expiry and issuer, and decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(token, &self.decoding, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_round_trip_claims() {
        let auth = JwtAuth::new(&JwtConfig::new(SECRET));
        let token = auth
            .create_token("user-1", Some("user@example.com"), 300)
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_rejects_expired_token() {
        let auth = JwtAuth::new(&JwtConfig::new(SECRET));
        let token = auth.create_token("user-1", None, -3600).unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let issuer = JwtAuth::new(&JwtConfig::new("another-secret-that-is-32-characters!"));
        let verifier = JwtAuth::new(&JwtConfig::new(SECRET));
        let token = issuer.create_token("user-1", None, 300).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_rejects_wrong_issuer() {
        let issuer = JwtAuth::new(&JwtConfig::new(SECRET).with_issuer("https://evil.example"));
        let verifier = JwtAuth::new(&JwtConfig::new(SECRET).with_issuer("https://id.example"));
        let token = issuer.create_token("user-1", None, 300).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        let auth = JwtAuth::new(&JwtConfig::new(SECRET));
        assert!(auth.verify_token("not-a-jwt").is_err());
    }
}
