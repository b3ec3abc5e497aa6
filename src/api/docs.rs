//! OpenAPI document and Swagger UI

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::auth::{LoginRequest, LoginResponse};
use super::health::{HealthCheck, HealthResponse, HealthStatus};
use super::state::AppState;
use super::teams::{MessageResponse, TeamPayload, TeamResponse};
use super::types::{ApiErrorDetail, ApiErrorResponse, ApiErrorType};

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Name of the bearer scheme referenced by the guarded operations
pub const BEARER_SCHEME: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dux Teams API",
        description = "Football team records: CRUD, case-insensitive name search and token login.",
        license(name = "MIT"),
    ),
    paths(
        // Teams
        super::teams::list_teams,
        super::teams::search_teams,
        super::teams::get_team,
        super::teams::create_team,
        super::teams::update_team,
        super::teams::delete_team,
        // Auth
        super::auth::login,
        // Health
        super::health::health_check,
        super::health::ready_check,
        super::health::live_check,
    ),
    components(
        schemas(
            TeamPayload,
            TeamResponse,
            MessageResponse,
            LoginRequest,
            LoginResponse,
            ApiErrorResponse,
            ApiErrorDetail,
            ApiErrorType,
            HealthResponse,
            HealthStatus,
            HealthCheck,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Teams", description = "Team record management"),
        (name = "Auth", description = "Token login"),
        (name = "Health", description = "Health check endpoints"),
    ),
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                BEARER_SCHEME,
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI plus the raw document, both public
pub fn create_docs_router() -> Router<AppState> {
    SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn document() -> Value {
        serde_json::to_value(ApiDoc::openapi()).unwrap()
    }

    #[test]
    fn test_team_and_auth_paths_are_documented() {
        let doc = document();
        let paths = doc["paths"].as_object().unwrap();

        for path in ["/teams", "/teams/search", "/teams/{id}", "/auth/login", "/ready"] {
            assert!(paths.contains_key(path), "missing {}", path);
        }

        let item = &doc["paths"]["/teams/{id}"];
        assert!(item["get"].is_object());
        assert!(item["put"].is_object());
        assert!(item["delete"].is_object());
        assert!(doc["paths"]["/teams"]["post"]["responses"]["409"].is_object());
    }

    #[test]
    fn test_schemas_are_registered() {
        let doc = document();
        let schemas = doc["components"]["schemas"].as_object().unwrap();

        for name in [
            "TeamPayload",
            "TeamResponse",
            "LoginRequest",
            "LoginResponse",
            "ApiErrorResponse",
        ] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
    }

    #[test]
    fn test_team_routes_require_bearer_token() {
        let doc = document();

        assert_eq!(
            doc["components"]["securitySchemes"][BEARER_SCHEME]["scheme"],
            "bearer"
        );
        assert!(doc["paths"]["/teams"]["get"]["security"].is_array());
        assert!(doc["paths"]["/auth/login"]["post"]["security"].is_null());
    }
}
