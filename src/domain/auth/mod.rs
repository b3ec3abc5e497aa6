//! Authentication domain module

mod credentials;

pub use credentials::{CredentialVerifier, Principal};
