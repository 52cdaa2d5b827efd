use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use super::document::{self, AddTranslationInput};
use crate::errors::ServiceError;
use crate::export::spreadsheet::{self, SpreadsheetExport};
use crate::storage::{validate_app_name, TranslationRepository};

/// Application operations over an explicit storage handle.
#[derive(Clone)]
pub struct AppsService {
    repo: Arc<dyn TranslationRepository>,
}

impl AppsService {
    pub fn new(repo: Arc<dyn TranslationRepository>) -> Self {
        Self { repo }
    }

    /// Names of all stored applications.
    pub async fn list(&self) -> Result<Vec<String>, ServiceError> {
        self.repo.list_names().await
    }

    /// Create an application seeded with an example entry.
    pub async fn create(&self, name: &str) -> Result<Value, ServiceError> {
        validate_app_name(name)?;
        let doc = document::seed_document(name, Utc::now());
        let bytes = serde_json::to_vec_pretty(&doc)?;
        if !self.repo.create_new(name, &bytes).await? {
            return Err(ServiceError::app_exists());
        }
        info!(app = %name, event = "app_created", "application created");
        Ok(doc)
    }

    /// Raw stored document.
    pub async fn get_translations(&self, name: &str) -> Result<String, ServiceError> {
        validate_app_name(name)?;
        self.repo.read(name).await?.ok_or_else(ServiceError::app_not_found)
    }

    /// Overwrite (or create) the document with `doc` verbatim.
    pub async fn save_translations(&self, name: &str, doc: &Value) -> Result<(), ServiceError> {
        validate_app_name(name)?;
        if !doc.is_object() {
            return Err(ServiceError::Validation("translations document must be a JSON object".into()));
        }
        let bytes = serde_json::to_vec_pretty(doc)?;
        self.repo.write(name, &bytes).await?;
        info!(app = %name, event = "app_deployed", bytes = bytes.len(), "translations saved");
        Ok(())
    }

    /// Merge one key's locale values into an existing application.
    pub async fn add_translation(
        &self,
        name: &str,
        input: AddTranslationInput,
    ) -> Result<Value, ServiceError> {
        validate_app_name(name)?;
        input.validate()?;
        let raw = self.get_translations(name).await?;
        let mut doc = document::parse_object(&raw)?;
        let key = input.key.clone();
        document::merge_translation(&mut doc, input, Utc::now())?;

        let doc = Value::Object(doc);
        self.repo.write(name, &serde_json::to_vec_pretty(&doc)?).await?;
        info!(app = %name, key = %key, event = "translation_added", "translation merged");
        Ok(doc)
    }

    /// Export the stored translations as an xlsx workbook.
    pub async fn export(&self, name: &str) -> Result<SpreadsheetExport, ServiceError> {
        let raw = self.get_translations(name).await?;
        let rows = spreadsheet::rows_from_document(&raw)?;
        let bytes = spreadsheet::render_xlsx(&rows)?;
        info!(app = %name, rows = rows.len(), event = "app_exported", "spreadsheet rendered");
        Ok(SpreadsheetExport { file_name: SpreadsheetExport::file_name_for(name), bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileTranslationRepository;
    use serde_json::json;
    use std::path::PathBuf;

    struct Fixture {
        root: PathBuf,
        svc: AppsService,
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    fn setup() -> Fixture {
        let root = std::env::temp_dir().join(format!("apps_service_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("temp dir");
        let svc = AppsService::new(Arc::new(FileTranslationRepository::new(&root)));
        Fixture { root, svc }
    }

    #[tokio::test]
    async fn create_twice_conflicts() -> Result<(), anyhow::Error> {
        let f = setup();
        let doc = f.svc.create("shop").await?;
        assert_eq!(doc["name"], "shop");
        assert_eq!(doc["translations"]["hello"]["fr"], "Bonjour");
        assert!(matches!(f.svc.create("shop").await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn created_document_is_what_get_returns() -> Result<(), anyhow::Error> {
        let f = setup();
        let created = f.svc.create("shop").await?;
        let stored: Value = serde_json::from_str(&f.svc.get_translations("shop").await?)?;
        assert_eq!(stored, created);
        Ok(())
    }

    #[tokio::test]
    async fn save_then_get_returns_same_document() -> Result<(), anyhow::Error> {
        let f = setup();
        let doc = json!({"zeta": 1, "alpha": {"nested": [1, 2, 3]}, "translations": {}});
        f.svc.save_translations("app", &doc).await?;
        let raw = f.svc.get_translations("app").await?;
        let stored: Value = serde_json::from_str(&raw)?;
        assert_eq!(stored, doc);
        // key order survives the round trip
        let keys: Vec<&String> = stored.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "translations"]);

        let replacement = json!({"translations": {"k": {"en": "v"}}});
        f.svc.save_translations("app", &replacement).await?;
        let stored: Value = serde_json::from_str(&f.svc.get_translations("app").await?)?;
        assert_eq!(stored, replacement);
        Ok(())
    }

    #[tokio::test]
    async fn save_rejects_non_object_payload() {
        let f = setup();
        let res = f.svc.save_translations("app", &json!(["not", "an", "object"])).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert!(f.svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_app_is_not_found() {
        let f = setup();
        assert!(matches!(f.svc.get_translations("ghost").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.svc.export("ghost").await, Err(ServiceError::NotFound(_))));
        let input = AddTranslationInput {
            key: "k".into(),
            translations: json!({"en": "v"}).as_object().cloned().unwrap(),
        };
        assert!(matches!(f.svc.add_translation("ghost", input).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_reflects_stored_files() -> Result<(), anyhow::Error> {
        let f = setup();
        f.svc.create("web").await?;
        f.svc.save_translations("mobile", &json!({})).await?;
        std::fs::write(f.root.join("admin.json"), b"{}")?;
        assert_eq!(f.svc.list().await?, vec!["admin", "mobile", "web"]);

        std::fs::remove_file(f.root.join("web.json"))?;
        assert_eq!(f.svc.list().await?, vec!["admin", "mobile"]);
        Ok(())
    }

    #[tokio::test]
    async fn export_produces_rows_and_file_name() -> Result<(), anyhow::Error> {
        let f = setup();
        let doc = json!({"translations": {"hello": {"en": "Welcome", "fr": "Bonjour"}}});
        f.svc.save_translations("site", &doc).await?;

        let raw = f.svc.get_translations("site").await?;
        assert_eq!(
            spreadsheet::rows_from_document(&raw)?,
            vec![
                spreadsheet::TranslationRow::new("hello", "en", "Welcome"),
                spreadsheet::TranslationRow::new("hello", "fr", "Bonjour"),
            ]
        );

        let export = f.svc.export("site").await?;
        assert_eq!(export.file_name, "site_Translations.xlsx");
        assert_eq!(&export.bytes[..2], b"PK");
        Ok(())
    }

    #[tokio::test]
    async fn export_of_empty_or_shapeless_document_is_bad_request() -> Result<(), anyhow::Error> {
        let f = setup();
        std::fs::write(f.root.join("empty.json"), b"")?;
        assert!(matches!(f.svc.export("empty").await, Err(ServiceError::InvalidDocument(_))));

        f.svc.save_translations("plain", &json!({"name": "plain"})).await?;
        assert!(matches!(f.svc.export("plain").await, Err(ServiceError::InvalidDocument(_))));

        std::fs::write(f.root.join("bin.json"), [0xFF, 0xFE, 0x00])?;
        assert!(matches!(f.svc.export("bin").await, Err(ServiceError::InvalidDocument(_))));
        Ok(())
    }

    #[tokio::test]
    async fn add_translation_merges_into_existing_app() -> Result<(), anyhow::Error> {
        let f = setup();
        f.svc.create("shop").await?;
        let input = AddTranslationInput {
            key: "bye".into(),
            translations: json!({"en": "Goodbye"}).as_object().cloned().unwrap(),
        };
        let doc = f.svc.add_translation("shop", input).await?;
        assert_eq!(doc["translations"]["bye"], json!({"en": "Goodbye"}));
        assert_eq!(doc["translations"]["hello"]["es"], "Bienvenido");

        let stored: Value = serde_json::from_str(&f.svc.get_translations("shop").await?)?;
        assert_eq!(stored, doc);
        Ok(())
    }

    #[tokio::test]
    async fn add_translation_leaves_non_object_data_alone() -> Result<(), anyhow::Error> {
        let f = setup();
        let input = || AddTranslationInput {
            key: "hello".into(),
            translations: json!({"en": "Hi"}).as_object().cloned().unwrap(),
        };

        let list_shaped = json!({"translations": ["keep me"]});
        f.svc.save_translations("arr", &list_shaped).await?;
        assert!(matches!(
            f.svc.add_translation("arr", input()).await,
            Err(ServiceError::InvalidDocument(_))
        ));
        let stored: Value = serde_json::from_str(&f.svc.get_translations("arr").await?)?;
        assert_eq!(stored, list_shaped);

        let legacy = json!({"translations": {"hello": "legacy string"}});
        f.svc.save_translations("legacy", &legacy).await?;
        assert!(matches!(
            f.svc.add_translation("legacy", input()).await,
            Err(ServiceError::InvalidDocument(_))
        ));
        let stored: Value = serde_json::from_str(&f.svc.get_translations("legacy").await?)?;
        assert_eq!(stored, legacy);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_names_are_rejected() {
        let f = setup();
        assert!(matches!(f.svc.create("../x").await, Err(ServiceError::Validation(_))));
        assert!(matches!(f.svc.get_translations("").await, Err(ServiceError::Validation(_))));
    }
}
