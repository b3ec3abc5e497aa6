//! Domain layer - Core business logic and entities

pub mod auth;
pub mod error;
pub mod team;

pub use auth::{CredentialVerifier, Principal};
pub use error::DomainError;
pub use team::{Team, TeamDetails, TeamId, TeamRepository, TeamValidationError};
