use std::path::{Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Where application documents live on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_content_root")]
    pub content_root: String,
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { content_root: default_content_root(), translations_dir: default_translations_dir() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_content_root() -> String { ".".into() }
fn default_translations_dir() -> String { "translations".into() }

/// Load from `CONFIG_PATH` (default `config.toml`).
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load the config file if present (defaults otherwise), apply env overrides, validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env_overrides(|k| std::env::var(k).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `CONTENT_ROOT`
    /// and `TRANSLATIONS_DIR` taken from `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(root) = lookup("CONTENT_ROOT") {
            self.storage.content_root = root;
        }
        if let Some(dir) = lookup("TRANSLATIONS_DIR") {
            self.storage.translations_dir = dir;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.content_root.trim().is_empty() {
            self.content_root = default_content_root();
        }
        if self.translations_dir.trim().is_empty() {
            return Err(anyhow!("storage.translations_dir must not be empty"));
        }
        Ok(())
    }

    /// Translations directory resolved against the content root.
    /// An absolute `translations_dir` wins over the root.
    pub fn translations_path(&self) -> PathBuf {
        Path::new(&self.content_root).join(&self.translations_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_yields_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.translations_path(), Path::new("./translations"));
    }

    #[test]
    fn parses_sections() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [storage]
            content_root = "/srv/app"
            translations_dir = "i18n"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.translations_path(), PathBuf::from("/srv/app/i18n"));
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("SERVER_PORT", "7001"),
            ("TRANSLATIONS_DIR", "custom"),
            ("TOKIO_WORKER_THREADS", "0"),
            ("SERVER_HOST", "localhost"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "localhost:7001");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.translations_dir, "custom");
    }

    #[test]
    fn rejects_zero_port_and_blank_dir() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[storage]\ntranslations_dir = \"  \"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_from_file("/nonexistent/config-for-tests.toml").unwrap_err();
        assert!(is_not_found(&err));
    }
}
