//! JWT token generation and validation

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::auth::Principal;
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (username)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a principal.
    ///
    /// Fails with `Configuration` when `expiration_hours` pushes `exp` past
    /// the representable date range.
    pub fn new(
        principal: &Principal,
        issuer: &str,
        expiration_hours: u64,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        let exp = i64::try_from(expiration_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "Token expiration of {} hours is out of range",
                    expiration_hours
                ))
            })?;

        Ok(Self {
            sub: principal.username().to_string(),
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Username the token was issued to
    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Configuration for JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Value of the `iss` claim, checked on validation
    pub issuer: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            expiration_hours,
        }
    }
}

/// Trait for JWT operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Generate a signed token for a principal
    fn generate(&self, principal: &Principal) -> Result<(String, JwtClaims), DomainError>;

    /// Validate a token and return its claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service using a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, principal: &Principal) -> Result<(String, JwtClaims), DomainError> {
        let claims = JwtClaims::new(principal, &self.config.issuer, self.config.expiration_hours)?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))?;

        Ok((token, claims))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", "Dux API", 24))
    }

    #[test]
    fn test_generate_and_validate() {
        let service = create_service();
        let principal = Principal::new("test");

        let (token, issued) = service.generate(&principal).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, "test");
        assert_eq!(claims.iss, "Dux API");
        assert_eq!(claims.exp, issued.exp);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        let result = service.validate("invalid-token");
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", "Dux API", 24));
        let service2 = JwtService::new(JwtConfig::new("secret-2", "Dux API", 24));

        let (token, _) = service1.generate(&Principal::new("test")).unwrap();

        assert!(service2.validate(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let issuer_a = JwtService::new(JwtConfig::new("secret", "Issuer A", 24));
        let issuer_b = JwtService::new(JwtConfig::new("secret", "Issuer B", 24));

        let (token, _) = issuer_a.generate(&Principal::new("test")).unwrap();

        assert!(issuer_b.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new(JwtConfig::new("test-secret", "Dux API", 24));

        // Past the default 60s leeway
        let past_time = Utc::now() - TimeDelta::hours(1);
        let claims = JwtClaims {
            sub: "test".to_string(),
            iss: "Dux API".to_string(),
            iat: (past_time - TimeDelta::hours(2)).timestamp(),
            exp: past_time.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_claims_expiration() {
        let claims = JwtClaims::new(&Principal::new("test"), "Dux API", 24).unwrap();

        assert_eq!(claims.username(), "test");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(claims.expires_at().is_some());
    }

    #[test]
    fn test_out_of_range_expiration_is_configuration_error() {
        let service = JwtService::new(JwtConfig::new("secret", "Dux API", 10_000_000_000));

        let result = service.generate(&Principal::new("test"));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let result = JwtClaims::new(&Principal::new("test"), "Dux API", u64::MAX);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_debug_hides_secret() {
        let service = create_service();
        let debug = format!("{:?}", service);

        assert!(!debug.contains("test-secret-key-12345"));
    }
}
