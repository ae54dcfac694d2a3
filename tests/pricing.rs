//! Pricing Integration Tests
//!
//! Runs the pricing client against a loopback TCP server serving canned
//! HTTP responses, and checks that pricing faults abort a resolution.

use std::path::Path;
use std::time::Duration;

use syllabus::{
    CollectionKind, FsStore, PricingClient, PricingError, ResolveError, Resolver, SiteConfig,
};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned HTTP response on a loopback port; returns the base URL.
async fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 2048];
        let _ = socket.read(&mut buf).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{}", addr)
}

const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\n\
    Content-Type: application/json\r\n\
    Content-Length: 14\r\n\
    Connection: close\r\n\
    \r\n\
    {\"price\":9900}";

const ERROR_RESPONSE: &str = "HTTP/1.1 500 Internal Server Error\r\n\
    Content-Length: 0\r\n\
    Connection: close\r\n\
    \r\n";

#[tokio::test]
async fn test_fetch_parses_price_in_cents() {
    let base = serve_once(OK_RESPONSE).await;
    let client = PricingClient::new(&base, Some(Duration::from_secs(5))).unwrap();

    let info = client.fetch("pro-annual").await.unwrap();
    assert_eq!(info.price_cents, 9900);
    assert_eq!(info.display_price(), 99.0);
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let base = serve_once(ERROR_RESPONSE).await;
    let client = PricingClient::new(&base, Some(Duration::from_secs(5))).unwrap();

    let err = client.fetch("pro-annual").await.unwrap_err();
    match err {
        PricingError::Status { plan, status } => {
            assert_eq!(plan, "pro-annual");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        PricingClient::new(format!("http://{}", addr), Some(Duration::from_secs(5))).unwrap();
    let err = client.fetch("pro").await.unwrap_err();
    assert!(matches!(err, PricingError::Transport(_)));
}

#[tokio::test]
async fn test_hung_upstream_hits_timeout() {
    // Accept the connection but never respond
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        drop(socket);
    });

    let client =
        PricingClient::new(format!("http://{}", addr), Some(Duration::from_millis(200))).unwrap();
    let err = client.fetch("pro").await.unwrap_err();
    match err {
        PricingError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected Transport timeout, got {:?}", other),
    }
}

async fn write_entry(root: &Path, dir: &str, slug: &str, body: &str) {
    let dir = root.join(dir);
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join(format!("{}.yaml", slug)), body)
        .await
        .unwrap();
}

/// Minimal store with a single paid course.
async fn paid_course_store() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_entry(tmp.path(), "categories", "course", "name: course\ncolor: \"#1e90ff\"\n").await;
    write_entry(tmp.path(), "authors", "jane-doe", "name: Jane Doe\n").await;
    write_entry(
        tmp.path(),
        "courses",
        "rust-fundamentals",
        r#"
title: Rust Fundamentals
description: Learn Rust from scratch
category: course
instructors: [jane-doe]
pricing_plan: pro
published_at: 2024-01-15T00:00:00Z
"#,
    )
    .await;
    tmp
}

#[tokio::test]
async fn test_resolution_includes_pricing() {
    let tmp = paid_course_store().await;
    let base = serve_once(OK_RESPONSE).await;
    let client = PricingClient::new(&base, Some(Duration::from_secs(5))).unwrap();
    let resolver = Resolver::new(
        FsStore::new(tmp.path()),
        Some(client),
        SiteConfig::default(),
    );

    let page = resolver
        .resolve(CollectionKind::Courses, "rust-fundamentals")
        .await
        .unwrap();

    let pricing = page.pricing.unwrap();
    assert_eq!(pricing.price_cents, 9900);

    let json = serde_json::to_value(&page.structured_data).unwrap();
    assert_eq!(json["offers"]["category"], "Paid");
    assert_eq!(json["offers"]["price"], 99.0);
}

#[tokio::test]
async fn test_pricing_fault_aborts_resolution() {
    let tmp = paid_course_store().await;
    let base = serve_once(ERROR_RESPONSE).await;
    let client = PricingClient::new(&base, Some(Duration::from_secs(5))).unwrap();
    let resolver = Resolver::new(
        FsStore::new(tmp.path()),
        Some(client),
        SiteConfig::default(),
    );

    // No degraded page without pricing: the whole resolution fails
    let err = resolver
        .resolve(CollectionKind::Courses, "rust-fundamentals")
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::ExternalService(_)));
}
