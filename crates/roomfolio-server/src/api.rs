//! HTTP API handlers

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use roomfolio_core::asset::{GLB_CACHE_CONTROL, GLB_CONTENT_TYPE};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::state::AppState;

/// API error response
#[derive(Serialize)]
struct ApiError {
    error: String,
}

impl ApiError {
    fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// CORS headers the GLB endpoint always carries
const GLB_CORS: [(header::HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for (name, value) in GLB_CORS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}

/// Stream the room model
pub async fn serve_glb(State(state): State<Arc<AppState>>) -> Response {
    let response = match state.glb.fetch().await {
        Ok((data, origin)) => {
            debug!(?origin, bytes = data.len(), "Serving GLB");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, GLB_CONTENT_TYPE),
                    (header::CACHE_CONTROL, GLB_CACHE_CONTROL),
                ],
                data,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Error serving GLB file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Failed to serve GLB file")),
            )
                .into_response()
        }
    };
    with_cors(response)
}

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssetConfig, Config};
    use crate::server::router;
    use axum::body::Body;
    use axum::http::Request;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn state_with_asset(path: PathBuf, web_dir: PathBuf) -> Arc<AppState> {
        let mut config = Config::default();
        config.asset = AssetConfig {
            path,
            cdn_urls: Vec::new(),
            fetch_timeout_secs: 5,
        };
        config.web.dir = web_dir;
        AppState::new(config).unwrap()
    }

    async fn get(state: Arc<AppState>, uri: &str) -> Response {
        router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_serve_glb_headers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("portfolio-room.min.glb");
        std::fs::write(&path, b"glTF\x02\x00\x00\x00").unwrap();

        let response = get(state_with_asset(path, temp_dir.path().to_path_buf()), "/api/glb").await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "model/gltf-binary");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=31536000, immutable");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"glTF\x02\x00\x00\x00");
    }

    #[tokio::test]
    async fn test_serve_glb_missing() {
        let temp_dir = TempDir::new().unwrap();
        let response = get(
            state_with_asset(temp_dir.path().join("absent.glb"), temp_dir.path().to_path_buf()),
            "/api/glb",
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to serve GLB file");
    }

    #[tokio::test]
    async fn test_health() {
        let temp_dir = TempDir::new().unwrap();
        let response = get(
            state_with_asset(temp_dir.path().join("absent.glb"), temp_dir.path().to_path_buf()),
            "/api/health",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_static_frontend_fallback() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("index.html"), "<canvas id=\"roomfolio-canvas\">").unwrap();

        let response = get(
            state_with_asset(temp_dir.path().join("absent.glb"), temp_dir.path().to_path_buf()),
            "/index.html",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
