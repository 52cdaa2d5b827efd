//! Service layer for the translation store.
//! - `storage` owns the explicit handle onto the translations directory.
//! - `apps` implements the application operations on top of it.
//! - `export` turns a stored document into a spreadsheet.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod apps;
pub mod export;
