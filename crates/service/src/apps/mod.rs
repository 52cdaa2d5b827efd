//! Application operations over the translation store.

pub mod document;
pub mod service;

pub use document::AddTranslationInput;
pub use service::AppsService;
