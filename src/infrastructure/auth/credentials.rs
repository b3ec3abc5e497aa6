//! Credential verifier backed by a single configured pair

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::auth::{CredentialVerifier, Principal};
use crate::domain::DomainError;

/// Accepts exactly one username/password pair, compared case-sensitively
#[derive(Clone)]
pub struct StaticCredentialVerifier {
    username: String,
    password: String,
}

impl Debug for StaticCredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialVerifier")
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .finish()
    }
}

impl StaticCredentialVerifier {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Principal>, DomainError> {
        if username == self.username && password == self.password {
            Ok(Some(Principal::new(username)))
        } else {
            Ok(None)
        }
    }
}
