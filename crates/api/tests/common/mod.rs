#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use curify_api::catalog::CatalogStore;
use curify_api::config::{CatalogPaths, ServerConfig};
use curify_api::router::build_app_router;
use curify_api::state::AppState;
use curify_core::locale::Locale;

/// Build a test `ServerConfig` with safe defaults, reading the catalog from `dir`.
///
/// Uses `http://localhost:3001` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        catalog: CatalogPaths::in_dir(dir),
        default_locale: Locale::zh(),
        feed_max_images: 6,
    }
}

// ---------------------------------------------------------------------------
// Fixture catalog
// ---------------------------------------------------------------------------

pub fn fixture_templates() -> Value {
    json!([
        {
            "id": "template-education-card",
            "locales": {
                "en": {
                    "category": "Education",
                    "description": "Explain a concept on one card",
                    "base_prompt": "A {subject} card in {style} style",
                    "parameters": [
                        { "name": "subject", "label": "Subject", "type": "text",
                          "placeholder": ["photosynthesis", "gravity"] },
                        { "name": "style", "label": "Style", "type": "select",
                          "options": ["flat", "watercolor"] }
                    ]
                },
                "zh": {
                    "category": "教育",
                    "description": "一张卡片讲清一个概念",
                    "base_prompt": "{subject} 的 {style} 卡片",
                    "parameters": [
                        { "name": "subject", "label": "主题", "type": "text" },
                        { "name": "style", "label": "风格", "type": "select",
                          "options": ["扁平", "水彩"] }
                    ]
                }
            }
        },
        {
            "id": "template-zh-only",
            "locales": {
                "zh": { "category": "海报", "base_prompt": "海报 {x}",
                        "parameters": [{ "name": "x", "label": "X" }] }
            }
        },
        {
            "id": "template-no-images",
            "locales": {
                "en": { "category": "Empty", "base_prompt": "nothing", "parameters": [] }
            }
        }
    ])
}

pub fn fixture_images() -> Value {
    json!([
        {
            "id": "edu-1",
            "template_id": "template-education-card",
            "asset": { "image_url": "/images/edu-1.jpg", "preview_image_url": "/images/edu-1.webp" },
            "params": { "subject": "gravity", "style": "flat" },
            "locales": { "en": { "title": "Gravity" } }
        },
        {
            "id": "edu-2",
            "template_id": "template-education-card",
            "asset": { "image_url": "/images/edu-2.jpg" },
            "params": { "subject": "tides", "style": "watercolor" }
        },
        {
            "id": "zh-1",
            "template_id": "template-zh-only",
            "asset": { "image_url": "/images/zh-1.jpg" },
            "params": { "x": "1" }
        }
    ])
}

/// Five Chinese editorial cards and one English card.
pub fn fixture_inspirations() -> Value {
    let mut cards: Vec<Value> = (1..=5)
        .map(|i| {
            let summary = if i == 3 { "短视频 趋势" } else { "日常" };
            json!({
                "id": format!("zh-card-{i}"),
                "lang": "zh",
                "hook": { "text": format!("钩子 {i}") },
                "signal": { "summary": summary, "sources": [] },
                "production": { "format": "vertical", "durationSec": 30, "beats": [] }
            })
        })
        .collect();
    cards.push(json!({
        "id": "en-card-1",
        "lang": "en-US",
        "hook": { "text": "Morning routines" },
        "signal": { "summary": "Creators post morning routines" }
    }));
    Value::Array(cards)
}

pub fn write_json(dir: &Path, name: &str, value: &Value) {
    std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

/// Write the fixture catalog into a fresh temporary directory.
pub fn fixture_catalog_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "nano_templates.json", &fixture_templates());
    write_json(dir.path(), "nano_images.json", &fixture_images());
    write_json(dir.path(), "inspirations.json", &fixture_inspirations());
    dir
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build the full application router over the catalog in `dir`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery).
pub async fn build_test_app(dir: &Path) -> Router {
    let config = test_config(dir);
    let catalog = CatalogStore::open(config.catalog.clone())
        .await
        .expect("fixture catalog should load");

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
    };
    build_app_router(state, &config)
}

/// Fixture catalog plus the app serving it. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn fixture_app() -> (TempDir, Router) {
    let dir = fixture_catalog_dir();
    let app = build_test_app(dir.path()).await;
    (dir, app)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
