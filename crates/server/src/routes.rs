pub mod apps;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::apps::AppsService;

use crate::openapi::ApiDoc;

#[derive(Clone)]
pub struct ServerState {
    pub apps: AppsService,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn app_routes() -> Router<ServerState> {
    Router::new()
        .route("/apps", get(apps::list_apps).post(apps::create_app))
        .route(
            "/apps/:name/translations",
            get(apps::get_translations).post(apps::add_translation),
        )
        .route("/apps/:name/deploy", post(apps::deploy))
        .route("/apps/:name/download", get(apps::download))
}

/// Build the full application router. App routes are served both at the root
/// and under `/api`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(app_routes())
        .nest("/api", app_routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
