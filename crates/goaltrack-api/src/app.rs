// Router assembly, shared by the server binary and the integration tests

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{self, ListResponse};
use crate::auth::{self, AuthConfig, AuthState};
use crate::storage::StorageBackend;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for the health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

/// Registers the bearer scheme referenced by the protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::goals::list_goals,
        crate::api::goals::create_goal,
        crate::api::goals::update_goal,
        crate::api::goals::delete_goal,
    ),
    components(
        schemas(
            api::goals::Goal,
            api::goals::CreateGoalRequest,
            api::goals::UpdateGoalRequest,
            api::goals::DeleteResponse,
            ListResponse<api::goals::Goal>,
            api::common::ErrorResponse,
            auth::routes::RegisterRequest,
            auth::routes::LoginRequest,
            auth::routes::AuthResponse,
            auth::routes::UserInfoResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "goals", description = "Goal management endpoints"),
        (name = "auth", description = "Registration, login and identity endpoints")
    ),
    info(
        title = "Goaltrack API",
        version = "0.1.0",
        description = "API for tracking personal goals with token-based authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

/// Build the application router over the given storage backend.
///
/// CORS and request tracing are layered on by the binary; tests drive this
/// router directly with `tower::ServiceExt::oneshot`.
pub fn build_app(db: StorageBackend, auth_config: AuthConfig) -> Router {
    let auth_state = AuthState::new(auth_config, db.clone());
    let goals_state = api::goals::GoalsState::new(db.clone(), auth_state.clone());
    let health_state = HealthState {
        storage: if db.is_dev_mode() { "memory" } else { "postgres" },
    };

    Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(api::goals::routes(goals_state))
        .merge(auth::routes(auth_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
}
