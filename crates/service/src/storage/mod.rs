//! Storage abstractions for service layer
//!
//! The translations directory is reached only through a [`TranslationRepository`]
//! handle constructed at startup and passed into the service.

pub mod repository;
pub mod file_store;

pub use file_store::FileTranslationRepository;
pub use repository::TranslationRepository;

use crate::errors::ServiceError;

/// Reject names that are not a plain filename stem.
pub fn validate_app_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("ID cannot be null or empty.".into()));
    }
    if name.contains(['/', '\\', '"']) || name.contains("..") || name.starts_with('.') {
        return Err(ServiceError::Validation(format!("invalid app name '{name}'")));
    }
    if name.chars().any(char::is_control) {
        return Err(ServiceError::Validation(format!("invalid app name '{name}'")));
    }
    Ok(())
}
