//! Request gateway: the only code that talks to the data service.
//!
//! Every call is bounded by a per-request timeout attached to the reqwest
//! request itself, so an expired call drops its connection instead of
//! leaving it dangling behind a raced timer. There are no retries here.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::normalize::{Normalized, ResponseShape};
use crate::stream::{playable_link, ResolveError};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
    /// Non-success status. `message` is the server's body text when it sent
    /// any, otherwise `HTTP <status>`.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("invalid JSON: {0}")]
    Parse(String),
    #[error("request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    base: Url,
    timeout: Duration,
}

impl Gateway {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("unsupported base URL scheme: {}", base.scheme());
        }
        let client = Client::builder()
            .user_agent(concat!("pitchside/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    pub fn from_config(api: &ApiConfig) -> anyhow::Result<Self> {
        Self::new(&api.base_url, api.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/{segment}`, keeping any path prefix the base already has.
    pub fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }

    /// `{base}/stream?url={reference}` with the reference percent-encoded.
    /// Spaces go out as `%20`, not the form-style `+`.
    pub fn stream_url(&self, reference: &str) -> Url {
        let mut url = self.endpoint("stream");
        url.set_query(Some(&format!("url={}", urlencoding::encode(reference))));
        url
    }

    pub async fn fetch_json(&self, url: Url) -> Result<Value, GatewayError> {
        debug!("[gateway] GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                text
            };
            warn!("[gateway] {} -> {}", url, status);
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| GatewayError::Parse(e.to_string()))
    }

    /// Fetch `/scrape` and reduce it to live/upcoming lists.
    pub async fn scrape(&self) -> Result<Normalized, GatewayError> {
        let payload = self.fetch_json(self.endpoint("scrape")).await?;
        let shape = ResponseShape::classify(&payload);
        debug!("[gateway] scrape payload shape: {}", shape.label());
        Ok(shape.into_normalized())
    }

    /// Resolve an opaque stream reference into a playable link.
    ///
    /// An empty reference fails with `EmptyReference` without touching the
    /// network.
    pub async fn resolve_stream(&self, reference: &str) -> Result<String, ResolveError> {
        if reference.is_empty() {
            return Err(ResolveError::EmptyReference);
        }
        let body = self.fetch_json(self.stream_url(reference)).await?;
        playable_link(&body)
    }

    fn classify(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout)
        } else if err.is_decode() {
            GatewayError::Parse(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> Gateway {
        Gateway::new(base, Duration::from_secs(15)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_onto_base() {
        assert_eq!(
            gateway("http://example.com").endpoint("scrape").as_str(),
            "http://example.com/scrape"
        );
        assert_eq!(
            gateway("http://example.com/api/").endpoint("scrape").as_str(),
            "http://example.com/api/scrape"
        );
        assert_eq!(
            gateway("http://example.com/api").endpoint("scrape").as_str(),
            "http://example.com/api/scrape"
        );
    }

    #[test]
    fn test_stream_url_encodes_reference() {
        let url = gateway("http://example.com").stream_url("https://site.tv/watch?id=1&x=a b");
        assert_eq!(url.path(), "/stream");
        let query = url.query().unwrap();
        assert!(!query.contains("https://"));
        assert!(!query.contains("&x="));
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, "https://site.tv/watch?id=1&x=a b");
    }

    #[test]
    fn test_stream_url_uses_percent_escapes() {
        let url = gateway("http://example.com/api").stream_url("a b/c?d=1&e=+");
        assert_eq!(
            url.as_str(),
            "http://example.com/api/stream?url=a%20b%2Fc%3Fd%3D1%26e%3D%2B"
        );
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(Gateway::new("ftp://example.com", Duration::from_secs(1)).is_err());
        assert!(Gateway::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_empty_reference_skips_network() {
        // Port 9 (discard) would fail with a transport error if it were called.
        let gw = gateway("http://127.0.0.1:9");
        assert_eq!(gw.resolve_stream("").await, Err(ResolveError::EmptyReference));
    }
}
