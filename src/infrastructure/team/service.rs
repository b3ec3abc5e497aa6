//! Team service for team management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::team::{validate_search_text, Team, TeamDetails, TeamId, TeamRepository};
use crate::domain::DomainError;

const DUPLICATE_NAME: &str = "A team with this name already exists.";

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub league: String,
    pub country: String,
}

/// Request for replacing a team's name, league and country
#[derive(Debug, Clone)]
pub struct UpdateTeamRequest {
    pub name: String,
    pub league: String,
    pub country: String,
}

/// Team service enforcing the team invariants on top of a repository
#[derive(Debug)]
pub struct TeamService<R: TeamRepository> {
    repository: Arc<R>,
}

impl<R: TeamRepository> TeamService<R> {
    /// Create a new team service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List all teams
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.repository.list().await
    }

    /// Count teams
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Get a team by ID
    pub async fn get(&self, id: TeamId) -> Result<Team, DomainError> {
        debug!(id = %id, "Getting team");

        self.repository
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Search teams whose name contains `text`, ignoring case.
    ///
    /// An empty result is reported as `NotFound`, not as an empty list.
    pub async fn search_by_name(&self, text: &str) -> Result<Vec<Team>, DomainError> {
        debug!(text = %text, "Searching teams by name");

        validate_search_text(text).map_err(|e| DomainError::validation(e.to_string()))?;

        let teams = self.repository.search_by_name(text).await?;

        if teams.is_empty() {
            return Err(DomainError::not_found(format!(
                "No teams found with name containing: {}",
                text
            )));
        }

        Ok(teams)
    }

    /// Create a new team
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(name = %request.name, "Creating team");

        let details = TeamDetails::new(request.name, request.league, request.country)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.find_by_name(details.name()).await?.is_some() {
            return Err(DomainError::conflict(DUPLICATE_NAME));
        }

        let team = self.repository.insert(details).await?;
        info!(id = %team.id(), name = %team.name(), "Team created");

        Ok(team)
    }

    /// Update a team
    pub async fn update(&self, id: TeamId, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        let mut team = self.repository.get(id).await?.ok_or_else(|| not_found(id))?;

        let details = TeamDetails::new(request.name, request.league, request.country)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(holder) = self.repository.find_by_name(details.name()).await? {
            if holder.id() != id {
                return Err(DomainError::conflict(DUPLICATE_NAME));
            }
        }

        team.apply(details);
        self.repository.update(team).await
    }

    /// Delete a team, returning a confirmation message
    pub async fn delete(&self, id: TeamId) -> Result<String, DomainError> {
        info!(id = %id, "Deleting team");

        if !self.repository.exists(id).await? {
            return Err(not_found(id));
        }

        // A concurrent delete may have removed it since the existence check
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        Ok(format!("Team with ID {} successfully deleted.", id))
    }
}

fn not_found(id: TeamId) -> DomainError {
    DomainError::not_found(format!("Team with ID {} not found.", id))
}
