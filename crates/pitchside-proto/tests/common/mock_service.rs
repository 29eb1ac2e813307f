#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock service");
    let addr = listener.local_addr().expect("mock service addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// A data service with one route per failure mode.
pub fn service(scrape: Value) -> Router {
    Router::new()
        .route(
            "/scrape",
            get(move || {
                let scrape = scrape.clone();
                async move { Json(scrape) }
            }),
        )
        .route("/stream", get(stream))
        .route("/api/scrape", get(|| async { Json(json!([{"title": "nested"}])) }))
        .route("/slow/scrape", get(slow))
        .route("/broken/scrape", get(|| async { "<html>not json</html>" }))
        .route("/down/scrape", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "scraper offline") }))
        .route("/gone/scrape", get(|| async { StatusCode::NOT_FOUND }))
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!([])).into_response()
}

/// `/stream?url=...` echoes the decoded reference back in a shape chosen by
/// its prefix.
async fn stream(Query(params): Query<HashMap<String, String>>) -> Response {
    let reference = params.get("url").cloned().unwrap_or_default();
    if reference.starts_with("missing:") {
        Json(json!({"error": "not found"})).into_response()
    } else if reference.starts_with("silent:") {
        Json(json!({"status": "ok"})).into_response()
    } else if reference.starts_with("crash:") {
        (StatusCode::INTERNAL_SERVER_ERROR, "").into_response()
    } else {
        Json(json!({"realLink": format!("https://player.example/embed?src={}", reference)}))
            .into_response()
    }
}
