use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidDocument(String),
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("export error: {0}")]
    Export(String),
}

impl ServiceError {
    pub fn app_not_found() -> Self { Self::NotFound("The specified app does not exist.".into()) }

    pub fn app_exists() -> Self { Self::Conflict("An app with this name already exists.".into()) }
}
