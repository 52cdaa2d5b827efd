use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde_json::Value;

use crate::apps::document::{parse_object, translations_key};
use crate::errors::ServiceError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Translations";
const HEADERS: [&str; 3] = ["Keyword", "Language", "Translation"];

/// One `(key, locale)` pair of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    pub keyword: String,
    pub language: String,
    pub translation: String,
}

impl TranslationRow {
    pub fn new(keyword: &str, language: &str, translation: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            language: language.to_string(),
            translation: translation.to_string(),
        }
    }
}

/// A rendered workbook ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct SpreadsheetExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SpreadsheetExport {
    pub fn file_name_for(app: &str) -> String {
        format!("{app}_Translations.xlsx")
    }
}

impl From<XlsxError> for ServiceError {
    fn from(e: XlsxError) -> Self {
        ServiceError::Export(e.to_string())
    }
}

/// Flatten the translations map of a raw stored document.
///
/// Rows follow document order: keys first, then locales within a key.
pub fn rows_from_document(raw: &str) -> Result<Vec<TranslationRow>, ServiceError> {
    let doc = parse_object(raw)?;
    let entries = translations_key(&doc)
        .and_then(|field| doc.get(&field))
        .and_then(Value::as_object)
        .ok_or_else(|| ServiceError::InvalidDocument("Invalid JSON data.".into()))?;

    let mut rows = Vec::new();
    for (keyword, locales) in entries {
        let locales = locales.as_object().ok_or_else(|| {
            ServiceError::InvalidDocument(format!("translations for '{keyword}' must be an object"))
        })?;
        for (language, translation) in locales {
            let translation = match translation {
                Value::String(s) => s.as_str(),
                Value::Null => "",
                _ => {
                    return Err(ServiceError::InvalidDocument(format!(
                        "translation '{keyword}'/'{language}' must be a string"
                    )))
                }
            };
            rows.push(TranslationRow::new(keyword, language, translation));
        }
    }
    Ok(rows)
}

/// Render rows into an xlsx workbook with a bold header line.
pub fn render_xlsx(rows: &[TranslationRow]) -> Result<Vec<u8>, ServiceError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, r) in (1u32..).zip(rows) {
        sheet.write_string(row, 0, &r.keyword)?;
        sheet.write_string(row, 1, &r.language)?;
        sheet.write_string(row, 2, &r.translation)?;
    }
    sheet.autofit();

    Ok(workbook.save_to_buffer()?)
}
