//! Catalog fetch against a mock HTTP server.

mod common;

use common::MockCatalogServer;
use pretty_assertions::assert_eq;
use runway_chroma::models::AppConfig;
use runway_chroma::services::{
    load_from_config, load_library, HttpCatalogSource, LibraryOrigin, PaletteSource,
};
use std::collections::HashMap;
use std::time::Duration;

fn source(server: &MockCatalogServer) -> HttpCatalogSource {
    HttpCatalogSource::new(server.catalog_url(), Duration::from_secs(2), HashMap::new()).unwrap()
}

#[tokio::test]
async fn test_catalog_loaded_and_sorted() {
    let server = MockCatalogServer::start().await;
    server
        .serve_json(serde_json::json!([
            {"id": "10", "name": "Ten", "colors": ["#112233", "#445566"]},
            {"id": "2", "name": "Two", "colors": ["#AABBCC"]},
            {"id": "1", "name": "One", "colors": ["#000000", "#FFFFFF", "#808080"]}
        ]))
        .await;

    let loaded = load_library(&source(&server)).await;

    assert_eq!(loaded.origin, LibraryOrigin::Catalog(server.catalog_url()));
    let ids: Vec<&str> = loaded.library.iter().map(|p| p.id().as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "10"]);
    assert_eq!(loaded.library.color_count(), 6);
    assert_eq!(loaded.library.get("10").unwrap().name(), "Ten");
}

#[tokio::test]
async fn test_names_are_translated() {
    let server = MockCatalogServer::start().await;
    server
        .serve_json(serde_json::json!([
            {"name": "紺青", "colors": ["#003854"]}
        ]))
        .await;

    let names = HashMap::from([("紺青".to_string(), "Navy Blue".to_string())]);
    let source =
        HttpCatalogSource::new(server.catalog_url(), Duration::from_secs(2), names).unwrap();
    let palettes = source.fetch().await.unwrap();

    assert_eq!(palettes.len(), 1);
    assert_eq!(palettes[0].id().as_str(), "紺青");
    assert_eq!(palettes[0].name(), "Navy Blue");
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockCatalogServer::start().await;
    server.serve_raw(503, "unavailable").await;

    let loaded = load_library(&source(&server)).await;

    assert_eq!(loaded.library.len(), 30);
    match loaded.origin {
        LibraryOrigin::Fallback { reason } => assert!(reason.contains("503"), "{reason}"),
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_falls_back() {
    let server = MockCatalogServer::start().await;
    server.serve_raw(200, "<html>not json</html>").await;

    let loaded = load_library(&source(&server)).await;
    assert!(matches!(loaded.origin, LibraryOrigin::Fallback { .. }));
    assert_eq!(loaded.library.len(), 30);
}

#[tokio::test]
async fn test_empty_catalog_falls_back() {
    let server = MockCatalogServer::start().await;
    server.serve_json(serde_json::json!([])).await;

    let loaded = load_library(&source(&server)).await;
    assert_eq!(
        loaded.origin,
        LibraryOrigin::Fallback {
            reason: "Catalog contains no usable palettes".to_string()
        }
    );
}

#[tokio::test]
async fn test_only_invalid_entries_falls_back() {
    let server = MockCatalogServer::start().await;
    server
        .serve_json(serde_json::json!([
            {"id": "1", "name": "No colors", "colors": []},
            {"id": "2", "name": "Bad", "colors": ["#12"]}
        ]))
        .await;

    let loaded = load_library(&source(&server)).await;
    assert!(matches!(loaded.origin, LibraryOrigin::Fallback { .. }));
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let server = MockCatalogServer::start().await;
    server.serve_slow(Duration::from_secs(3)).await;

    let source =
        HttpCatalogSource::new(server.catalog_url(), Duration::from_millis(200), HashMap::new())
            .unwrap();
    let loaded = load_library(&source).await;

    assert!(matches!(loaded.origin, LibraryOrigin::Fallback { .. }));
    assert_eq!(loaded.library.len(), 30);
}

#[tokio::test]
async fn test_load_from_config_uses_configured_url() {
    let server = MockCatalogServer::start().await;
    server
        .serve_json(serde_json::json!([
            {"id": "A", "name": "Alpha", "colors": ["#123456"]}
        ]))
        .await;

    let mut config = AppConfig::default();
    config.palette_source.url = server.catalog_url();
    let loaded = load_from_config(&config).await;

    assert_eq!(loaded.library.len(), 1);
    assert!(loaded.library.contains("A"));
}
