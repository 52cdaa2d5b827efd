//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the translations directory exists, creating it when missing.
pub async fn ensure_env(translations_dir: &Path) -> anyhow::Result<()> {
    match tokio::fs::metadata(translations_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!(
            "{} exists but is not a directory",
            translations_dir.display()
        )),
        Err(_) => {
            warn!(dir = %translations_dir.display(), "translations directory not found; creating it");
            tokio::fs::create_dir_all(translations_dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", translations_dir.display()))?;
            info!(dir = %translations_dir.display(), "translations directory created");
            Ok(())
        }
    }
}
