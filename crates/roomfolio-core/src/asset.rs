//! The room asset: its HTTP contract, blob config, and source fallback chain
//!
//! The frontend tries a fixed, ordered list of locations for the GLB and
//! moves to the next one whenever a load fails. The blob URL written by the
//! upload command comes first when present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const GLB_FILE_NAME: &str = "portfolio-room.min.glb";
pub const GLB_CONTENT_TYPE: &str = "model/gltf-binary";
pub const GLB_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
pub const GLB_API_PATH: &str = "/api/glb";
/// Where the frontend looks for the blob config
pub const BLOB_CONFIG_FILE: &str = "blob-config.json";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("all asset sources failed: {}", tried.join(", "))]
    Exhausted { tried: Vec<String> },
}

/// Public location of the uploaded GLB, as recorded by the upload command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobConfig {
    #[serde(default)]
    pub blob_url: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl BlobConfig {
    pub fn new(blob_url: impl Into<String>, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            blob_url: blob_url.into(),
            uploaded_at: Some(uploaded_at),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the config, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), AssetError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// The blob URL, if one was recorded
    pub fn url(&self) -> Option<&str> {
        let url = self.blob_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

/// Whether the frontend is served by the production server or a dev server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

impl BuildMode {
    /// Mode of the current compilation
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }
}

/// Ordered GLB locations with a cursor on the one being tried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSources {
    urls: Vec<String>,
    cursor: usize,
}

impl AssetSources {
    /// Build the fallback chain
    pub fn resolve(blob: Option<&BlobConfig>, mode: BuildMode) -> Self {
        let api = GLB_API_PATH.to_string();
        let local = format!("/{}", GLB_FILE_NAME);
        let (primary, secondary) = match mode {
            BuildMode::Production => (api, local),
            BuildMode::Development => (local, api),
        };

        let mut urls: Vec<String> = Vec::new();
        if let Some(url) = blob.and_then(BlobConfig::url) {
            urls.push(url.to_string());
        }
        for url in [primary, secondary] {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }

        Self { urls, cursor: 0 }
    }

    pub fn from_urls(urls: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(urls.len());
        for url in urls {
            if !deduped.contains(&url) {
                deduped.push(url);
            }
        }
        Self {
            urls: deduped,
            cursor: 0,
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// The source currently being tried
    pub fn current(&self) -> Option<&str> {
        self.urls.get(self.cursor).map(String::as_str)
    }

    /// Current source as an asset-server path
    pub fn current_asset_path(&self) -> Option<String> {
        self.current().map(to_asset_path)
    }

    /// Give up on the current source; returns the next one
    pub fn advance(&mut self) -> Option<&str> {
        if self.cursor < self.urls.len() {
            self.cursor += 1;
        }
        tracing::debug!(next = ?self.current(), "Advancing asset source");
        self.current()
    }

    pub fn exhausted(&self) -> bool {
        self.cursor >= self.urls.len()
    }

    /// Error describing every source that was tried
    pub fn exhausted_error(&self) -> AssetError {
        AssetError::Exhausted {
            tried: self.urls[..self.cursor.min(self.urls.len())].to_vec(),
        }
    }
}

/// Absolute URLs pass through; same-origin paths lose their leading slash
pub fn to_asset_path(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        url.trim_start_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BLOB: &str = "https://abc.public.blob.vercel-storage.com/portfolio-room.min.glb";

    #[test]
    fn test_blob_config_json() {
        let json = r#"{
  "blobUrl": "https://abc.public.blob.vercel-storage.com/portfolio-room.min.glb",
  "uploadedAt": "2026-01-10T12:00:00.000Z"
}"#;
        let config = BlobConfig::from_json(json).unwrap();
        assert_eq!(config.url(), Some(BLOB));
        assert!(config.uploaded_at.is_some());

        let out = config.to_json_pretty().unwrap();
        assert!(out.contains("\"blobUrl\""));
        assert!(out.contains("\"uploadedAt\""));
    }

    #[test]
    fn test_empty_blob_config() {
        let config = BlobConfig::from_json("{}").unwrap();
        assert_eq!(config.url(), None);

        let config = BlobConfig::from_json(r#"{"blobUrl": "  "}"#).unwrap();
        assert_eq!(config.url(), None);
    }

    #[test]
    fn test_blob_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("web").join(BLOB_CONFIG_FILE);

        let config = BlobConfig::new(BLOB, Utc::now());
        config.save(&path).unwrap();

        let loaded = BlobConfig::load(&path).unwrap();
        assert_eq!(loaded.url(), Some(BLOB));
    }

    #[test]
    fn test_production_chain() {
        let blob = BlobConfig::new(BLOB, Utc::now());
        let sources = AssetSources::resolve(Some(&blob), BuildMode::Production);
        assert_eq!(
            sources.urls(),
            &[BLOB.to_string(), "/api/glb".to_string(), "/portfolio-room.min.glb".to_string()]
        );
    }

    #[test]
    fn test_development_chain_without_blob() {
        let sources = AssetSources::resolve(None, BuildMode::Development);
        assert_eq!(sources.current(), Some("/portfolio-room.min.glb"));
        assert_eq!(sources.urls().len(), 2);
    }

    #[test]
    fn test_advance_until_exhausted() {
        let mut sources = AssetSources::resolve(None, BuildMode::Production);
        assert_eq!(sources.current_asset_path().as_deref(), Some("api/glb"));
        assert_eq!(sources.advance(), Some("/portfolio-room.min.glb"));
        assert!(!sources.exhausted());
        assert_eq!(sources.advance(), None);
        assert!(sources.exhausted());
        assert_eq!(sources.advance(), None);

        match sources.exhausted_error() {
            AssetError::Exhausted { tried } => assert_eq!(tried.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_from_urls_dedups() {
        let sources = AssetSources::from_urls(vec![
            "https://cdn.example/a.glb".to_string(),
            "https://cdn.example/a.glb".to_string(),
            "/api/glb".to_string(),
        ]);
        assert_eq!(sources.urls().len(), 2);
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(to_asset_path(BLOB), BLOB);
        assert_eq!(to_asset_path("/api/glb"), "api/glb");
    }
}
