//! Spreadsheet export of stored application documents.

pub mod spreadsheet;

pub use spreadsheet::{SpreadsheetExport, TranslationRow, XLSX_CONTENT_TYPE};
