pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{Json, Router, routing::get};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Content Curation API",
        version = "0.1.0",
        description = "REST API for AI-assisted content curation: submit content, derive summaries, sentiment and topics, search and recommend."
    ),
    paths(
        handlers::content::create_content,
        handlers::content::list_public_summaries,
        handlers::content::get_content,
        handlers::content::update_content,
        handlers::content::delete_content,
        handlers::search::search_public,
        handlers::search::search_user,
        handlers::search::recommend,
        handlers::admin::list_all_content,
        handlers::admin::admin_delete_content,
    ),
    tags(
        (name = "Content", description = "Content CRUD and public summaries"),
        (name = "Search", description = "Substring search and topic-based recommendations"),
        (name = "Admin", description = "Unrestricted content administration"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Content Curation API. See /swagger-ui for interactive documentation."
    }))
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let api = ApiDoc::openapi();

    Router::new()
        .route("/", get(root))
        .nest("/api", routes::api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
