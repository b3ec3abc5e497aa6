//! In-memory team repository implementation

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::team::{Team, TeamDetails, TeamId, TeamRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    teams: BTreeMap<TeamId, Team>,
}

impl State {
    fn name_taken(&self, name: &str, except: Option<TeamId>) -> bool {
        self.teams
            .values()
            .any(|team| team.has_name(name) && Some(team.id()) != except)
    }
}

/// Thread-safe in-memory team store
///
/// IDs are handed out sequentially starting at 1 and never reused. The name
/// check and the write happen under one lock, so concurrent creates cannot
/// both claim a name. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    state: RwLock<State>,
}

impl InMemoryTeamRepository {
    /// Creates a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, DomainError> {
        self.state
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, DomainError> {
        self.state
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        Ok(self
            .read()?
            .teams
            .values()
            .find(|team| team.has_name(name))
            .cloned())
    }

    async fn search_by_name(&self, text: &str) -> Result<Vec<Team>, DomainError> {
        Ok(self
            .read()?
            .teams
            .values()
            .filter(|team| team.name_contains(text))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        Ok(self.read()?.teams.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.teams.len())
    }

    async fn insert(&self, details: TeamDetails) -> Result<Team, DomainError> {
        let mut state = self.write()?;

        if state.name_taken(details.name(), None) {
            return Err(DomainError::conflict("A team with this name already exists."));
        }

        state.last_id += 1;
        let team = Team::new(TeamId::new(state.last_id), details);
        state.teams.insert(team.id(), team.clone());

        Ok(team)
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        let mut state = self.write()?;

        if !state.teams.contains_key(&team.id()) {
            return Err(DomainError::not_found(format!(
                "Team with ID {} not found.",
                team.id()
            )));
        }

        if state.name_taken(team.name(), Some(team.id())) {
            return Err(DomainError::conflict("A team with this name already exists."));
        }

        state.teams.insert(team.id(), team.clone());
        Ok(team)
    }

    async fn exists(&self, id: TeamId) -> Result<bool, DomainError> {
        Ok(self.read()?.teams.contains_key(&id))
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        Ok(self.write()?.teams.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(name: &str) -> TeamDetails {
        TeamDetails::new(name, "La Liga", "Spain").unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryTeamRepository::new();

        let first = repo.insert(details("Real Madrid")).await.unwrap();
        let second = repo.insert(details("Sevilla")).await.unwrap();

        assert_eq!(first.id().value(), 1);
        assert_eq!(second.id().value(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryTeamRepository::new();

        let first = repo.insert(details("Real Madrid")).await.unwrap();
        repo.delete(first.id()).await.unwrap();
        let second = repo.insert(details("Sevilla")).await.unwrap();

        assert_eq!(second.id().value(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_name_ignoring_case() {
        let repo = InMemoryTeamRepository::new();

        repo.insert(details("Real Madrid")).await.unwrap();
        let result = repo.insert(details("REAL madrid")).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_checks_other_records_only() {
        let repo = InMemoryTeamRepository::new();

        let mut madrid = repo.insert(details("Real Madrid")).await.unwrap();
        let mut sevilla = repo.insert(details("Sevilla")).await.unwrap();

        madrid.apply(TeamDetails::new("real madrid", "LaLiga", "Spain").unwrap());
        assert!(repo.update(madrid).await.is_ok());

        sevilla.apply(details("Real Madrid"));
        let result = repo.update(sevilla).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryTeamRepository::new();
        let ghost = Team::new(TeamId::new(5), details("Ghost FC"));

        let result = repo.update(ghost).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_and_search_by_name() {
        let repo = InMemoryTeamRepository::new();

        repo.insert(details("Real Madrid")).await.unwrap();
        repo.insert(details("Atlético Madrid")).await.unwrap();
        repo.insert(details("Sevilla")).await.unwrap();

        let found = repo.find_by_name("sevilla").await.unwrap();
        assert_eq!(found.unwrap().name(), "Sevilla");
        assert!(repo.find_by_name("Sev").await.unwrap().is_none());

        let matches = repo.search_by_name("MADRID").await.unwrap();
        let names: Vec<&str> = matches.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Real Madrid", "Atlético Madrid"]);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryTeamRepository::new();

        repo.insert(details("Valencia")).await.unwrap();
        repo.insert(details("Betis")).await.unwrap();

        let teams = repo.list().await.unwrap();
        assert_eq!(teams[0].name(), "Valencia");
        assert_eq!(teams[1].name(), "Betis");
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let repo = InMemoryTeamRepository::new();
        let team = repo.insert(details("Real Madrid")).await.unwrap();

        assert!(repo.exists(team.id()).await.unwrap());
        assert!(repo.delete(team.id()).await.unwrap());
        assert!(!repo.exists(team.id()).await.unwrap());
        assert!(!repo.delete(team.id()).await.unwrap());
    }
}
