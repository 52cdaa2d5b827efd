use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use super::{repository::TranslationRepository, validate_app_name};
use crate::errors::ServiceError;

const EXTENSION: &str = "json";

/// One `<name>.json` file per application inside `root`.
///
/// Writes are not coordinated; concurrent saves of the same name race and the
/// last writer wins.
#[derive(Clone, Debug)]
pub struct FileTranslationRepository {
    root: PathBuf,
}

impl FileTranslationRepository {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ServiceError> {
        validate_app_name(name)?;
        Ok(self.root.join(format!("{name}.{EXTENSION}")))
    }
}

/// Write a freshly created file; on failure remove it so the name stays free.
async fn fill_new_file(path: &Path, mut file: fs::File, contents: &[u8]) -> Result<(), ServiceError> {
    let res: std::io::Result<()> = async {
        file.write_all(contents).await?;
        file.flush().await
    }
    .await;
    if let Err(e) = res {
        drop(file);
        let _ = fs::remove_file(path).await;
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl TranslationRepository for FileTranslationRepository {
    async fn list_names(&self) -> Result<Vec<String>, ServiceError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            // only names the other operations accept
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_app_name(stem).is_ok() {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn create_new(&self, name: &str, contents: &[u8]) -> Result<bool, ServiceError> {
        let path = self.path_for(name)?;
        let file = match fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        fill_new_file(&path, file, contents).await?;
        debug!(path = %path.display(), bytes = contents.len(), "document created");
        Ok(true)
    }

    async fn read(&self, name: &str) -> Result<Option<String>, ServiceError> {
        let path = self.path_for(name)?;
        let bytes = match fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| ServiceError::InvalidDocument("Invalid JSON data.".into()))
    }

    async fn write(&self, name: &str, contents: &[u8]) -> Result<(), ServiceError> {
        let path = self.path_for(name)?;
        fs::write(&path, contents).await?;
        debug!(path = %path.display(), bytes = contents.len(), "document written");
        Ok(())
    }
}
