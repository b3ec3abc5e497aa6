//! Authentication infrastructure module
//!
//! Credential checking and JWT issuing for the login endpoint and token guard.

mod credentials;
mod jwt;
mod service;

pub use credentials::StaticCredentialVerifier;
pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
pub use service::{AuthService, IssuedToken};
