//! Credential verification abstraction

use std::fmt::Debug;

use async_trait::async_trait;
use crate::domain::DomainError;

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Checks a username/password pair against some credential source
#[async_trait]
pub trait CredentialVerifier: Send + Sync + Debug {
    /// Returns the principal when the pair is accepted, `None` when rejected.
    ///
    /// `Err` is reserved for failures of the credential source itself.
    async fn verify(&self, username: &str, password: &str)
        -> Result<Option<Principal>, DomainError>;
}
