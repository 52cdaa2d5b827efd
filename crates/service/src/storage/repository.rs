use async_trait::async_trait;

use crate::errors::ServiceError;

/// Raw document storage keyed by application name.
///
/// Implementations hold no cache: every call goes to the backing store.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Names of all stored applications, sorted.
    async fn list_names(&self) -> Result<Vec<String>, ServiceError>;
    /// Write a document only if none exists; `Ok(false)` when the name is taken.
    async fn create_new(&self, name: &str, contents: &[u8]) -> Result<bool, ServiceError>;
    /// Raw stored document, `None` when absent.
    async fn read(&self, name: &str) -> Result<Option<String>, ServiceError>;
    /// Create or overwrite the document.
    async fn write(&self, name: &str, contents: &[u8]) -> Result<(), ServiceError>;
}
