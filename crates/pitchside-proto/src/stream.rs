//! Interpretation of `/stream` resolution responses.

use serde_json::Value;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Response fields that may carry the playable link, in priority order.
pub const LINK_FIELDS: [&str; 4] = ["realLink", "stream", "url", "play"];

pub const NO_STREAM_PROVIDED: &str = "No stream URL provided";
pub const NO_PLAYABLE_STREAM: &str = "No playable stream returned by server.";
pub const STREAM_LOAD_ERROR: &str = "Error loading stream";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// The card has no stream reference; nothing was sent.
    #[error("No stream URL provided")]
    EmptyReference,
    /// The server answered but named no link. Carries the server's `error`
    /// text, or a generic message.
    #[error("{0}")]
    NoPlayableLink(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ResolveError {
    /// Text shown to the user. Transport-level details stay in the log.
    pub fn notice(&self) -> String {
        match self {
            Self::EmptyReference => NO_STREAM_PROVIDED.to_string(),
            Self::NoPlayableLink(message) => message.clone(),
            Self::Gateway(_) => STREAM_LOAD_ERROR.to_string(),
        }
    }
}

/// Pick the playable link out of a resolution body.
///
/// A link in any of `LINK_FIELDS` wins even when an `error` field is also
/// present.
pub fn playable_link(body: &Value) -> Result<String, ResolveError> {
    let link = LINK_FIELDS.iter().find_map(|key| {
        body.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    });
    if let Some(link) = link {
        return Ok(link.to_string());
    }

    let message = body
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_PLAYABLE_STREAM);
    Err(ResolveError::NoPlayableLink(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_field_priority() {
        let body = json!({"play": "p", "url": "u", "stream": "s", "realLink": "r"});
        assert_eq!(playable_link(&body).unwrap(), "r");
        let body = json!({"play": "p", "url": "u", "realLink": ""});
        assert_eq!(playable_link(&body).unwrap(), "u");
        let body = json!({"play": "p"});
        assert_eq!(playable_link(&body).unwrap(), "p");
    }

    #[test]
    fn test_server_error_text() {
        let err = playable_link(&json!({"error": "not found"})).unwrap_err();
        assert_eq!(err, ResolveError::NoPlayableLink("not found".to_string()));
        assert_eq!(err.notice(), "not found");
    }

    #[test]
    fn test_generic_message_without_error_field() {
        for body in [json!({}), json!({"stream": 5}), json!([]), json!(null), json!({"error": ""})] {
            let err = playable_link(&body).unwrap_err();
            assert_eq!(err.notice(), NO_PLAYABLE_STREAM, "body = {}", body);
        }
    }

    #[test]
    fn test_link_beats_error_field() {
        let body = json!({"error": "stale", "stream": "https://cdn/x.m3u8"});
        assert_eq!(playable_link(&body).unwrap(), "https://cdn/x.m3u8");
    }

    #[test]
    fn test_gateway_failures_use_generic_notice() {
        let err: ResolveError = GatewayError::Parse("eof".to_string()).into();
        assert_eq!(err.notice(), STREAM_LOAD_ERROR);
        assert_eq!(ResolveError::EmptyReference.notice(), NO_STREAM_PROVIDED);
    }
}
