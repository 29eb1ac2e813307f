//! Canonical card model: one display-ready record per upstream event.

use serde::Serialize;
use serde_json::Value;

/// Title used when a record carries nothing usable as a title.
pub const FALLBACK_TITLE: &str = "Untitled";

const LOGO_KEYS: &[&str] = &["logo", "home_logo"];
const LEAGUE_LOGO_KEYS: &[&str] = &["leagueLogo", "league_logo"];
const STREAM_KEYS: &[&str] = &["stream", "link", "url"];

/// Normalized form of one upstream record. Immutable once built.
///
/// `title` is never empty. Every other field may be empty and callers omit the
/// corresponding element instead of drawing it blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalCard {
    pub title: String,
    pub note: String,
    pub is_live: bool,
    pub logo: String,
    pub league_logo: String,
    /// Opaque locator handed to the resolution endpoint. Empty = not playable.
    pub stream_ref: String,
}

impl CanonicalCard {
    /// Build a card from an arbitrary JSON value. Never fails: anything that is
    /// not an object simply has no fields.
    pub fn from_raw(raw: &Value) -> Self {
        let raw_note = text_field(raw, "note");

        let title = text_field(raw, "title")
            .or_else(|| match (text_field(raw, "home"), text_field(raw, "away")) {
                (Some(home), Some(away)) => Some(format!("{} vs {}", home, away)),
                _ => None,
            })
            .or_else(|| raw_note.clone())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());

        let note = match (&raw_note, text_field(raw, "league")) {
            (Some(note), _) => note.clone(),
            (None, Some(league)) => {
                format!("{} • {}", league, text_field(raw, "time").unwrap_or_default())
            }
            (None, None) => String::new(),
        };

        let is_live = raw_note
            .as_deref()
            .map(|n| n.to_uppercase().contains("LIVE"))
            .unwrap_or(false);

        Self {
            title,
            note,
            is_live,
            logo: first_field(raw, LOGO_KEYS),
            league_logo: first_field(raw, LEAGUE_LOGO_KEYS),
            stream_ref: first_field(raw, STREAM_KEYS),
        }
    }

    pub fn has_stream(&self) -> bool {
        !self.stream_ref.is_empty()
    }
}

/// A field counts as present when it is a non-empty string or a number.
fn text_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_field(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| text_field(raw, key))
        .unwrap_or_default()
}
