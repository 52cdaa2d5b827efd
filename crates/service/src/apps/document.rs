use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::errors::ServiceError;

pub const TRANSLATIONS_FIELD: &str = "translations";
pub const LAST_UPDATE_FIELD: &str = "lastUpdate";

/// Example entry written into every new application.
const SEED_KEY: &str = "hello";
const SEED_LOCALES: [(&str, &str); 3] = [("en", "Welcome"), ("fr", "Bonjour"), ("es", "Bienvenido")];

/// Body of an add-translation request: one key with its locale values.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AddTranslationInput {
    pub key: String,
    pub translations: Map<String, Value>,
}

impl AddTranslationInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.key.trim().is_empty() {
            return Err(ServiceError::Validation("translation key must not be empty".into()));
        }
        if self.translations.is_empty() {
            return Err(ServiceError::Validation("at least one locale is required".into()));
        }
        if let Some((locale, _)) = self.translations.iter().find(|(_, v)| !v.is_string()) {
            return Err(ServiceError::Validation(format!(
                "translation for locale '{locale}' must be a string"
            )));
        }
        Ok(())
    }
}

pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// New application document with the seeded example entry.
pub fn seed_document(name: &str, now: DateTime<Utc>) -> Value {
    let locales: Map<String, Value> = SEED_LOCALES
        .iter()
        .map(|(locale, text)| (locale.to_string(), Value::String(text.to_string())))
        .collect();
    json!({
        "name": name,
        LAST_UPDATE_FIELD: timestamp(now),
        TRANSLATIONS_FIELD: { SEED_KEY: locales },
    })
}

/// Find the translations member, ignoring case of the field name.
pub fn translations_key(doc: &Map<String, Value>) -> Option<String> {
    if doc.contains_key(TRANSLATIONS_FIELD) {
        return Some(TRANSLATIONS_FIELD.to_string());
    }
    doc.keys().find(|k| k.eq_ignore_ascii_case(TRANSLATIONS_FIELD)).cloned()
}

/// Parse a stored document that must be a JSON object.
pub fn parse_object(raw: &str) -> Result<Map<String, Value>, ServiceError> {
    if raw.trim().is_empty() {
        return Err(ServiceError::InvalidDocument("File is empty.".into()));
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ServiceError::InvalidDocument("Invalid JSON data.".into())),
    }
}

/// Merge `input` into `doc` and stamp the update time.
///
/// A translations member or key entry that exists but is not an object is
/// rejected and `doc` is left untouched.
pub fn merge_translation(
    doc: &mut Map<String, Value>,
    input: AddTranslationInput,
    now: DateTime<Utc>,
) -> Result<(), ServiceError> {
    let field = translations_key(doc).unwrap_or_else(|| TRANSLATIONS_FIELD.to_string());
    match doc.get(&field) {
        None => {}
        Some(Value::Object(entries)) => match entries.get(&input.key) {
            None | Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(ServiceError::InvalidDocument(format!(
                    "translations for '{}' must be an object",
                    input.key
                )))
            }
        },
        Some(_) => {
            return Err(ServiceError::InvalidDocument(format!("'{field}' must be an object")))
        }
    }

    let translations = doc.entry(field).or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(entries) = translations {
        let entry = entries.entry(input.key).or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(locales) = entry {
            locales.extend(input.translations);
        }
    }
    doc.insert(LAST_UPDATE_FIELD.to_string(), Value::String(timestamp(now)));
    Ok(())
}
