//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamDetails, TeamId};
use crate::domain::DomainError;

/// Durable store for team records.
///
/// Implementations must enforce case-insensitive name uniqueness themselves:
/// `insert` and `update` return `DomainError::Conflict` when another record
/// already holds the name.
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Find the team whose name equals `name`, ignoring case
    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError>;

    /// All teams whose name contains `text`, ignoring case, ordered by ID
    async fn search_by_name(&self, text: &str) -> Result<Vec<Team>, DomainError>;

    /// All teams ordered by ID
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Number of stored teams
    async fn count(&self) -> Result<usize, DomainError>;

    /// Persist a new team; the store assigns its ID
    async fn insert(&self, details: TeamDetails) -> Result<Team, DomainError>;

    /// Overwrite an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Check if a team exists
    async fn exists(&self, id: TeamId) -> Result<bool, DomainError>;

    /// Delete a team by ID, returns true if a record was removed
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;
}
