//! Login service issuing tokens for verified credentials

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::jwt::JwtGenerator;
use crate::domain::auth::CredentialVerifier;
use crate::domain::DomainError;

/// A freshly issued access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Checks credentials and issues JWTs
#[derive(Debug)]
pub struct AuthService<V: CredentialVerifier> {
    verifier: Arc<V>,
    jwt: Arc<dyn JwtGenerator>,
}

impl<V: CredentialVerifier> AuthService<V> {
    pub fn new(verifier: Arc<V>, jwt: Arc<dyn JwtGenerator>) -> Self {
        Self { verifier, jwt }
    }

    /// Exchange a username/password pair for a token.
    ///
    /// Any rejected pair yields `Unauthorized("Invalid credentials")`, without
    /// revealing which half was wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        let principal = match self.verifier.verify(username, password).await? {
            Some(principal) => principal,
            None => {
                warn!(username = %username, "Login rejected");
                return Err(DomainError::unauthorized("Invalid credentials"));
            }
        };

        let (token, claims) = self.jwt.generate(&principal)?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| DomainError::internal("Token expiration out of range"))?;

        info!(username = %principal.username(), "Login succeeded");

        Ok(IssuedToken { token, expires_at })
    }
}
