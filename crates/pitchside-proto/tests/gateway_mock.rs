//! Gateway behaviour against a local mock of the data service.
//!
//! Run with: cargo test -p pitchside-proto --test gateway_mock

mod common;

use std::time::Duration;

use common::mock_service;
use pitchside_proto::{Gateway, GatewayError, ResolveError};
use serde_json::json;

async fn gateway_with(timeout: Duration, path: &str) -> Gateway {
    let base = mock_service::spawn(mock_service::service(json!({
        "live_matches": [{"home": "A", "away": "B", "note": "LIVE 12'", "stream": "abc"}],
        "upcoming_matches": [],
    })))
    .await;
    Gateway::new(&format!("{}{}", base, path), timeout).unwrap()
}

#[tokio::test]
async fn scrape_normalizes_partitioned_payload() {
    let gw = gateway_with(Duration::from_secs(5), "").await;
    let normalized = gw.scrape().await.unwrap();
    assert_eq!(normalized.live.len(), 1);
    assert!(normalized.upcoming.is_empty());
    let card = pitchside_proto::CanonicalCard::from_raw(&normalized.live[0]);
    assert_eq!(card.title, "A vs B");
    assert!(card.is_live);
    assert_eq!(card.stream_ref, "abc");
}

#[tokio::test]
async fn base_path_prefix_is_kept() {
    let gw = gateway_with(Duration::from_secs(5), "/api").await;
    let normalized = gw.scrape().await.unwrap();
    assert_eq!(normalized.live, vec![json!({"title": "nested"})]);
}

#[tokio::test]
async fn timeout_aborts_slow_request() {
    let gw = gateway_with(Duration::from_millis(200), "/slow").await;
    let started = std::time::Instant::now();
    let err = gw.scrape().await.unwrap_err();
    assert_eq!(err, GatewayError::Timeout(Duration::from_millis(200)));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn http_error_carries_server_text() {
    let gw = gateway_with(Duration::from_secs(5), "/down").await;
    match gw.scrape().await.unwrap_err() {
        GatewayError::Http { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "scraper offline");
        }
        other => panic!("expected Http, got {:?}", other),
    }
}

#[tokio::test]
async fn http_error_without_body_uses_status() {
    let gw = gateway_with(Duration::from_secs(5), "/gone").await;
    let err = gw.scrape().await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Http {
            status: 404,
            message: "HTTP 404".to_string()
        }
    );
    assert_eq!(err.to_string(), "HTTP 404");
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let gw = gateway_with(Duration::from_secs(5), "/broken").await;
    assert!(matches!(gw.scrape().await, Err(GatewayError::Parse(_))));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let gw = Gateway::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    assert!(matches!(gw.scrape().await, Err(GatewayError::Transport(_))));
}

#[tokio::test]
async fn resolve_stream_round_trips_encoded_reference() {
    let gw = gateway_with(Duration::from_secs(5), "").await;
    let reference = "https://site.tv/watch?id=7&lang=en";
    let link = gw.resolve_stream(reference).await.unwrap();
    assert_eq!(link, format!("https://player.example/embed?src={}", reference));
}

#[tokio::test]
async fn resolve_stream_surfaces_server_error() {
    let gw = gateway_with(Duration::from_secs(5), "").await;
    let err = gw.resolve_stream("missing:1").await.unwrap_err();
    assert_eq!(err, ResolveError::NoPlayableLink("not found".to_string()));
    assert_eq!(err.notice(), "not found");

    let err = gw.resolve_stream("silent:1").await.unwrap_err();
    assert_eq!(err.notice(), pitchside_proto::stream::NO_PLAYABLE_STREAM);

    let err = gw.resolve_stream("crash:1").await.unwrap_err();
    assert!(matches!(err, ResolveError::Gateway(GatewayError::Http { status: 500, .. })));
    assert_eq!(err.notice(), pitchside_proto::stream::STREAM_LOAD_ERROR);
}
