//! Configuration loading

use anyhow::{Context, Result};
use roomfolio_core::asset::{BLOB_CONFIG_FILE, GLB_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub asset: AssetConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub blob: BlobStoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the web server
    #[serde(default = "default_bind")]
    pub bind: String,
    /// TLS configuration (optional - enables HTTPS when present)
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            tls: None,
        }
    }
}

/// TLS/HTTPS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM format)
    pub cert: String,
    /// Path to private key file (PEM format)
    pub key: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Where `/api/glb` reads the room model from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Local GLB file, tried first
    #[serde(default = "default_asset_path")]
    pub path: PathBuf,
    /// CDN copies, tried in order when the local file is unreadable
    #[serde(default)]
    pub cdn_urls: Vec<String>,
    /// Timeout for each CDN request
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            path: default_asset_path(),
            cdn_urls: Vec::new(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_asset_path() -> PathBuf {
    Path::new("public").join(GLB_FILE_NAME)
}

fn default_fetch_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Built frontend (index.html, wasm bundle)
    #[serde(default = "default_web_dir")]
    pub dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            dir: default_web_dir(),
        }
    }
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("web")
}

/// Blob storage used by the `upload` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobStoreConfig {
    /// Blob store API base URL
    #[serde(default = "default_blob_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the read/write token
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Where the resulting blob config is written for the frontend
    #[serde(default = "default_blob_config_path")]
    pub config_path: PathBuf,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_blob_endpoint(),
            token_env: default_token_env(),
            config_path: default_blob_config_path(),
        }
    }
}

fn default_blob_endpoint() -> String {
    "https://blob.vercel-storage.com".to_string()
}

fn default_token_env() -> String {
    "BLOB_READ_WRITE_TOKEN".to_string()
}

fn default_blob_config_path() -> PathBuf {
    default_web_dir().join(BLOB_CONFIG_FILE)
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

/// Save default configuration to file
pub fn save_default_config(path: &Path) -> Result<()> {
    let mut content = toml::to_string_pretty(&Config::default())?;
    // CDN fallbacks are opt-in, so the template only shows one
    content.push_str(&format!(
        "\n# CDN copies of the room model go under [asset], tried in order when\n\
         # asset.path is unreadable, e.g.\n\
         # cdn_urls = [\"https://cdn.example.com/{}\"]\n",
        GLB_FILE_NAME
    ));
    std::fs::write(path, content)?;
    Ok(())
}
