#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use photo_gallery::auth::{generate_jwt, Claims};
use photo_gallery::config::AppConfig;
use photo_gallery::database::MemoryPhotoStore;
use photo_gallery::{app, AppState};

pub const BOUNDARY: &str = "gallery-test-boundary";

/// A router wired to an in-memory store and a throwaway media root.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryPhotoStore>,
    pub config: AppConfig,
    pub media_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let media_dir = tempfile::tempdir().expect("failed to create media dir");

        let mut config = AppConfig::development();
        config.security.jwt_secret = "integration-test-secret".to_string();
        config.media.media_root = media_dir.path().to_path_buf();
        config.api.enable_request_logging = false;

        let store = Arc::new(MemoryPhotoStore::new());
        let router = app(AppState::new(config.clone(), store.clone()));

        Self {
            router,
            store,
            config,
            media_dir,
        }
    }

    pub fn token(&self, user_id: i64, username: &str) -> String {
        let claims = Claims::new(user_id, username, 1).expect("valid test expiry");
        generate_jwt(&claims, &self.config.security.jwt_secret).expect("failed to sign test token")
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty())?).await
    }

    pub async fn post_json(&self, uri: &str, token: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body)?))?;
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, token: &str, body: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))?;
        self.send(request).await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        token: Option<&str>,
        parts: &[Part],
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(multipart_body(parts)))?).await
    }

    /// Uploads a valid PNG and returns the response body.
    pub async fn add_photo(&self, token: &str, title: &str, file_name: &str) -> Result<Value> {
        let parts = [
            Part::text("title", title),
            Part::file("image", file_name, png_bytes()),
        ];
        let (status, body) = self.post_multipart("/api/v1/photos/add/", Some(token), &parts).await?;
        anyhow::ensure!(status == StatusCode::OK, "add failed with {}: {}", status, body);
        Ok(body)
    }
}

pub enum Part {
    Text { name: String, value: String },
    File { name: String, file_name: String, bytes: Vec<u8> },
}

impl Part {
    pub fn text(name: &str, value: &str) -> Self {
        Part::Text { name: name.into(), value: value.into() }
    }

    pub fn file(name: &str, file_name: &str, bytes: Vec<u8>) -> Self {
        Part::File { name: name.into(), file_name: file_name.into(), bytes }
    }
}

pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File { name, file_name, bytes } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn png_bytes() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::RgbImage::new(4, 3)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("failed to encode png");
    out.into_inner()
}
