//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::team::{Team, TeamDetails, TeamId, TeamRepository};
use crate::domain::DomainError;

const DUPLICATE_NAME: &str = "A team with this name already exists.";

/// PostgreSQL implementation of TeamRepository
///
/// Name uniqueness is backed by the `idx_teams_name_lower` unique index, so a
/// concurrent insert that slips past the service's pre-check still fails with
/// a conflict.
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name, league, country FROM teams WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, league, country FROM teams WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find team by name: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn search_by_name(&self, text: &str) -> Result<Vec<Team>, DomainError> {
        // STRPOS instead of LIKE so '%' and '_' in the text match literally
        let rows = sqlx::query(
            r#"
            SELECT id, name, league, country
            FROM teams
            WHERE STRPOS(LOWER(name), LOWER($1)) > 0
            ORDER BY id
            "#,
        )
        .bind(text)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to search teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query("SELECT id, name, league, country FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count teams: {}", e)))?;

        Ok(count as usize)
    }

    async fn insert(&self, details: TeamDetails) -> Result<Team, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO teams (name, league, country)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(details.name())
        .bind(details.league())
        .bind(details.country())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create"))?;

        Ok(Team::new(TeamId::new(id), details))
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = $2, league = $3, country = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(team.id().value())
        .bind(team.name())
        .bind(team.league())
        .bind(team.country())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Team with ID {} not found.",
                team.id()
            )));
        }

        Ok(team)
    }

    async fn exists(&self, id: TeamId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check team existence: {}", e)))
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let id: i64 = row.get("id");
    let name: String = row.get("name");
    let league: String = row.get("league");
    let country: String = row.get("country");

    let details = TeamDetails::new(name, league, country)
        .map_err(|e| DomainError::storage(format!("Invalid team {} in database: {}", id, e)))?;

    Ok(Team::new(TeamId::new(id), details))
}

fn map_write_error(error: sqlx::Error, action: &str) -> DomainError {
    if is_unique_violation(&error) {
        DomainError::conflict(DUPLICATE_NAME)
    } else {
        DomainError::storage(format!("Failed to {} team: {}", action, error))
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}
