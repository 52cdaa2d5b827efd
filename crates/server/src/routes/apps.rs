use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::types::SaveAck;
use serde::Deserialize;
use serde_json::Value;
use service::apps::AddTranslationInput;
use service::export::XLSX_CONTENT_TYPE;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

/// `POST /apps` body: either a bare JSON string or `{"name": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateAppRequest {
    Name(String),
    Named { name: String },
}

impl CreateAppRequest {
    pub fn into_name(self) -> String {
        match self {
            CreateAppRequest::Name(name) | CreateAppRequest::Named { name } => name,
        }
    }
}

#[utoipa::path(
    get, path = "/apps", tag = "apps",
    responses(
        (status = 200, description = "Names of stored applications", body = [String]),
        (status = 500, description = "Storage error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list_apps(State(state): State<ServerState>) -> Result<Json<Vec<String>>, JsonApiError> {
    let names = state.apps.list().await?;
    info!(count = names.len(), "list apps");
    Ok(Json(names))
}

#[utoipa::path(
    post, path = "/apps", tag = "apps",
    request_body = crate::openapi::CreateAppRequestDoc,
    responses(
        (status = 200, description = "Created document"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create_app(
    State(state): State<ServerState>,
    payload: Result<Json<CreateAppRequest>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let Json(req) = payload?;
    let doc = state.apps.create(&req.into_name()).await?;
    Ok(Json(doc))
}

#[utoipa::path(
    get, path = "/apps/{name}/translations", tag = "apps",
    params(("name" = String, Path, description = "Application name")),
    responses(
        (status = 200, description = "Stored document, verbatim"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get_translations(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Response, JsonApiError> {
    let raw = state.apps.get_translations(&name).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], raw).into_response())
}

#[utoipa::path(
    post, path = "/apps/{name}/translations", tag = "apps",
    params(("name" = String, Path, description = "Application name")),
    request_body = crate::openapi::AddTranslationDoc,
    responses(
        (status = 200, description = "Updated document"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn add_translation(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    payload: Result<Json<AddTranslationInput>, JsonRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let Json(input) = payload?;
    let doc = state.apps.add_translation(&name, input).await?;
    Ok(Json(doc))
}

#[utoipa::path(
    post, path = "/apps/{name}/deploy", tag = "apps",
    params(("name" = String, Path, description = "Application name")),
    request_body = crate::openapi::TranslationDocumentDoc,
    responses(
        (status = 200, description = "Saved"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn deploy(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveAck>, JsonApiError> {
    let Json(doc) = payload?;
    state.apps.save_translations(&name, &doc).await?;
    Ok(Json(SaveAck { app: name, saved: true }))
}

#[utoipa::path(
    get, path = "/apps/{name}/download", tag = "apps",
    params(("name" = String, Path, description = "Application name")),
    responses(
        (status = 200, description = "xlsx workbook attachment"),
        (status = 400, description = "Empty or malformed document", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn download(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Response, JsonApiError> {
    let export = state.apps.export(&name).await?;
    let disposition = content_disposition(&export.file_name)?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}

/// `attachment; filename="..."`; names are validated upstream to carry no quotes
/// or control characters.
fn content_disposition(file_name: &str) -> Result<HeaderValue, JsonApiError> {
    HeaderValue::try_from(format!("attachment; filename=\"{file_name}\"")).map_err(|e| {
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
    })
}
