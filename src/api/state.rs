//! Application state for shared services

use std::sync::Arc;

use crate::domain::auth::CredentialVerifier;
use crate::domain::{DomainError, Team, TeamId, TeamRepository};
use crate::infrastructure::auth::{AuthService, IssuedToken, JwtGenerator};
use crate::infrastructure::team::{CreateTeamRequest, TeamService, UpdateTeamRequest};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub auth_service: Arc<dyn AuthServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    /// Whether `/teams` requires a bearer token
    pub require_token: bool,
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
    async fn get(&self, id: TeamId) -> Result<Team, DomainError>;
    async fn search_by_name(&self, text: &str) -> Result<Vec<Team>, DomainError>;
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
    async fn update(&self, id: TeamId, request: UpdateTeamRequest) -> Result<Team, DomainError>;
    async fn delete(&self, id: TeamId) -> Result<String, DomainError>;
}

/// Trait for login operations
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError>;
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamServiceTrait for TeamService<R> {
    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        TeamService::count(self).await
    }

    async fn get(&self, id: TeamId) -> Result<Team, DomainError> {
        TeamService::get(self, id).await
    }

    async fn search_by_name(&self, text: &str) -> Result<Vec<Team>, DomainError> {
        TeamService::search_by_name(self, text).await
    }

    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create(self, request).await
    }

    async fn update(&self, id: TeamId, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        TeamService::update(self, id, request).await
    }

    async fn delete(&self, id: TeamId) -> Result<String, DomainError> {
        TeamService::delete(self, id).await
    }
}

#[async_trait::async_trait]
impl<V: CredentialVerifier + 'static> AuthServiceTrait for AuthService<V> {
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        AuthService::login(self, username, password).await
    }
}
