use std::collections::HashMap;

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String, pub detail: Option<String> }

#[derive(ToSchema)]
pub struct CreateAppRequestDoc { pub name: String }

#[derive(ToSchema)]
pub struct AddTranslationDoc {
    pub key: String,
    /// locale code -> translated text
    pub translations: HashMap<String, String>,
}

/// Shape written by app creation; deploy accepts any JSON object.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationDocumentDoc {
    pub name: Option<String>,
    pub last_update: Option<String>,
    pub translations: HashMap<String, HashMap<String, String>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::apps::list_apps,
        crate::routes::apps::create_app,
        crate::routes::apps::get_translations,
        crate::routes::apps::add_translation,
        crate::routes::apps::deploy,
        crate::routes::apps::download,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            CreateAppRequestDoc,
            AddTranslationDoc,
            TranslationDocumentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "apps")
    )
)]
pub struct ApiDoc;
