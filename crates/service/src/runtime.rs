//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the translations directory exists before serving.
pub async fn ensure_env(translations_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(translations_dir).await
}
