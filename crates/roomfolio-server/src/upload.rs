//! One-off upload of the room model to blob storage
//!
//! Pushes the GLB to the configured blob store and records the public URL
//! in a `blob-config.json` that the frontend tries before any other source.

use anyhow::{Context, Result};
use chrono::Utc;
use roomfolio_core::asset::{BlobConfig, GLB_CONTENT_TYPE};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::BlobStoreConfig;

/// Blob API version sent with each request
const BLOB_API_VERSION: &str = "7";

/// The part of the blob store response we use
#[derive(Debug, Deserialize)]
struct PutBlobResponse {
    url: String,
}

/// Target URL for a blob named `name`
pub fn upload_url(endpoint: &str, name: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), name)
}

/// Read the API token from the configured environment variable
pub fn read_token(token_env: &str) -> Result<String> {
    let token = std::env::var(token_env)
        .with_context(|| format!("Environment variable {} is not set", token_env))?;
    if token.trim().is_empty() {
        anyhow::bail!("Environment variable {} is empty", token_env);
    }
    Ok(token)
}

/// Size in megabytes with two decimals, as logged before upload
pub fn format_megabytes(bytes: usize) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Upload `file` and write the resulting blob config to `output`
pub async fn upload_glb(store: &BlobStoreConfig, file: &Path, output: &Path) -> Result<BlobConfig> {
    let token = read_token(&store.token_env)?;

    let data = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    info!(path = %file.display(), size = %format_megabytes(data.len()), "Uploading GLB to blob storage");

    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .context("GLB path has no file name")?;
    let url = upload_url(&store.endpoint, name);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .put(&url)
        .bearer_auth(token)
        .header("x-api-version", BLOB_API_VERSION)
        .header("x-content-type", GLB_CONTENT_TYPE)
        .header("x-vercel-blob-access", "public")
        .body(data)
        .send()
        .await
        .with_context(|| format!("Upload request to {} failed", url))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Blob store rejected upload: HTTP {}: {}", status, body);
    }

    let put: PutBlobResponse = response
        .json()
        .await
        .context("Invalid blob store response")?;
    info!(url = %put.url, "GLB uploaded");

    let blob = BlobConfig::new(put.url, Utc::now());
    blob.save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), "Blob URL saved");

    Ok(blob)
}
