//! Room model retrieval for `/api/glb`
//!
//! The local file wins. When it cannot be read, each configured CDN copy is
//! tried in order and the first successful body is returned. Nothing is
//! cached in memory; browsers cache the response via its headers.

use anyhow::{Context, Result};
use axum::body::Bytes;
use roomfolio_core::asset::AssetError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::AssetConfig;

/// Where a served GLB came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlbOrigin {
    Local(PathBuf),
    Cdn(String),
}

/// GLB fetcher over the local file and CDN fallback list
pub struct GlbFetcher {
    local_path: PathBuf,
    cdn_urls: Vec<String>,
    client: reqwest::Client,
}

impl GlbFetcher {
    pub fn new(config: &AssetConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            local_path: config.path.clone(),
            cdn_urls: config.cdn_urls.clone(),
            client,
        })
    }

    /// Every source in the order it is tried
    pub fn sources(&self) -> Vec<String> {
        std::iter::once(self.local_path.display().to_string())
            .chain(self.cdn_urls.iter().cloned())
            .collect()
    }

    /// Fetch the model from the first source that answers
    pub async fn fetch(&self) -> Result<(Bytes, GlbOrigin), AssetError> {
        match tokio::fs::read(&self.local_path).await {
            Ok(data) => {
                debug!(path = %self.local_path.display(), bytes = data.len(), "Serving local GLB");
                return Ok((Bytes::from(data), GlbOrigin::Local(self.local_path.clone())));
            }
            Err(e) => {
                warn!(
                    path = %self.local_path.display(),
                    error = %e,
                    "Local GLB unavailable, trying CDN fallbacks"
                );
            }
        }

        for url in &self.cdn_urls {
            match self.fetch_remote(url).await {
                Ok(data) => {
                    info!(url = %url, bytes = data.len(), "Serving GLB from CDN");
                    return Ok((data, GlbOrigin::Cdn(url.clone())));
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "CDN fallback failed");
                }
            }
        }

        Err(AssetError::Exhausted {
            tried: self.sources(),
        })
    }

    async fn fetch_remote(&self, url: &str) -> Result<Bytes> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status());
        }
        Ok(response.bytes().await?)
    }
}
