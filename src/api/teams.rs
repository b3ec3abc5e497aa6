//! Team management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::api::middleware::RequireToken;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiErrorResponse, Json};
use crate::domain::{DomainError, Team, TeamId};
use crate::infrastructure::team::{CreateTeamRequest, UpdateTeamRequest};

/// Create the team router
pub fn create_teams_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/search", get(search_teams))
        .route("/{id}", get(get_team).put(update_team).delete(delete_team))
}

/// Body for creating or replacing a team
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TeamPayload {
    #[schema(example = "Real Madrid")]
    pub name: String,
    pub league: String,
    pub country: String,
}

/// Query string for `GET /teams/search`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the team name
    #[serde(default)]
    pub name: String,
}

/// Team as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub league: String,
    pub country: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().value(),
            name: team.name().to_string(),
            league: team.league().to_string(),
            country: team.country().to_string(),
        }
    }
}

/// Confirmation returned by delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_team_id(raw: &str) -> Result<TeamId, ApiError> {
    raw.parse::<TeamId>()
        .map_err(|e| DomainError::invalid_id(e.to_string()).into())
}

/// GET /teams
#[utoipa::path(
    get,
    path = "/teams",
    responses(
        (status = 200, description = "All teams ordered by ID", body = Vec<TeamResponse>),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 500, description = "Storage failure", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teams"
)]
pub async fn list_teams(
    State(state): State<AppState>,
    _auth: RequireToken,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    debug!("Listing all teams");

    let teams = state.team_service.list().await?;

    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}

/// GET /teams/{id}
#[utoipa::path(
    get,
    path = "/teams/{id}",
    params(("id" = i64, Path, description = "Team ID")),
    responses(
        (status = 200, description = "The team", body = TeamResponse),
        (status = 400, description = "Malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "No team with this ID", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teams"
)]
pub async fn get_team(
    State(state): State<AppState>,
    _auth: RequireToken,
    Path(id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    let id = parse_team_id(&id)?;

    let team = state.team_service.get(id).await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// GET /teams/search?name=
///
/// Case-insensitive substring match. No match is a 404, not an empty list.
#[utoipa::path(
    get,
    path = "/teams/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Teams whose name contains the text", body = Vec<TeamResponse>),
        (status = 400, description = "Empty search text", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "No team matches", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teams"
)]
pub async fn search_teams(
    State(state): State<AppState>,
    _auth: RequireToken,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    debug!(name = %query.name, "Searching teams");

    let teams = state.team_service.search_by_name(&query.name).await?;

    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}

/// POST /teams
#[utoipa::path(
    post,
    path = "/teams",
    request_body = TeamPayload,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Empty name, league or country", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 409, description = "Name already taken, ignoring case", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teams"
)]
pub async fn create_team(
    State(state): State<AppState>,
    _auth: RequireToken,
    Json(payload): Json<TeamPayload>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let team = state
        .team_service
        .create(CreateTeamRequest {
            name: payload.name,
            league: payload.league,
            country: payload.country,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// PUT /teams/{id}
#[utoipa::path(
    put,
    path = "/teams/{id}",
    params(("id" = i64, Path, description = "Team ID")),
    request_body = TeamPayload,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 400, description = "Malformed ID or empty field", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "No team with this ID", body = ApiErrorResponse),
        (status = 409, description = "Name held by another team", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teams"
)]
pub async fn update_team(
    State(state): State<AppState>,
    _auth: RequireToken,
    Path(id): Path<String>,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<TeamResponse>, ApiError> {
    let id = parse_team_id(&id)?;

    let team = state
        .team_service
        .update(
            id,
            UpdateTeamRequest {
                name: payload.name,
                league: payload.league,
                country: payload.country,
            },
        )
        .await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /teams/{id}
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    params(("id" = i64, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "No team with this ID", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teams"
)]
pub async fn delete_team(
    State(state): State<AppState>,
    _auth: RequireToken,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_team_id(&id)?;

    let message = state.team_service.delete(id).await?;

    Ok(Json(MessageResponse { message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TeamDetails;

    #[test]
    fn test_payload_deserialization() {
        let json = r#"{"name": "Real Madrid", "league": "La Liga", "country": "Spain"}"#;

        let payload: TeamPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name, "Real Madrid");
        assert_eq!(payload.league, "La Liga");
        assert_eq!(payload.country, "Spain");
    }

    #[test]
    fn test_payload_ignores_client_id() {
        let json = r#"{"id": 99, "name": "Real Madrid", "league": "La Liga", "country": "Spain"}"#;

        let payload: TeamPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name, "Real Madrid");
    }

    #[test]
    fn test_search_query_defaults_to_empty() {
        let query: SearchQuery = serde_json::from_str("{}").unwrap();
        assert!(query.name.is_empty());
    }

    #[test]
    fn test_team_response_from_team() {
        let details = TeamDetails::new("Boca Juniors", "Liga Profesional", "Argentina").unwrap();
        let team = Team::new(TeamId::new(3), details);

        let response = TeamResponse::from(&team);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "Boca Juniors",
                "league": "Liga Profesional",
                "country": "Argentina"
            })
        );
    }

    #[test]
    fn test_parse_team_id() {
        assert_eq!(parse_team_id("12").unwrap(), TeamId::new(12));

        for raw in ["abc", "0", "-4", "1.5"] {
            let err = parse_team_id(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.response.error.param, Some("id".to_string()));
        }
    }
}
