//! Payload shape inference for the `/scrape` endpoint.
//!
//! Upstream has shipped several layouts over time. Rather than trusting key
//! iteration order, every payload is classified into exactly one
//! `ResponseShape`, checked in this fixed priority:
//!
//! ```text
//!  1. TopLevelArray   [..]                               -> all live
//!  2. Partitioned     {live_matches, upcoming_matches}   -> direct
//!  3. Matches         {matches: [..]}                    -> all live
//!  4. SingleArray     exactly one array-valued key       -> all live
//!  5. MultiArray      several array-valued keys          -> keys containing
//!                                                           "live" are live,
//!                                                           the rest upcoming
//!  -  Unrecognized    anything else                      -> both empty
//! ```
//!
//! Keys are visited in document order (`serde_json` is built with
//! `preserve_order`), so concatenation in the multi-array case is stable.

use serde_json::{Map, Value};

/// The two ordered record sequences a payload reduces to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub live: Vec<Value>,
    pub upcoming: Vec<Value>,
}

impl Normalized {
    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.upcoming.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    TopLevelArray(Vec<Value>),
    Partitioned { live: Vec<Value>, upcoming: Vec<Value> },
    Matches(Vec<Value>),
    SingleArray { key: String, items: Vec<Value> },
    MultiArray { groups: Vec<(String, Vec<Value>)> },
    Unrecognized,
}

impl ResponseShape {
    pub fn classify(payload: &Value) -> Self {
        match payload {
            Value::Array(items) => Self::TopLevelArray(items.clone()),
            Value::Object(map) => Self::classify_object(map),
            _ => Self::Unrecognized,
        }
    }

    fn classify_object(map: &Map<String, Value>) -> Self {
        let live = map.get("live_matches").and_then(Value::as_array);
        let upcoming = map.get("upcoming_matches").and_then(Value::as_array);
        if live.is_some() || upcoming.is_some() {
            return Self::Partitioned {
                live: live.cloned().unwrap_or_default(),
                upcoming: upcoming.cloned().unwrap_or_default(),
            };
        }

        if let Some(matches) = map.get("matches").and_then(Value::as_array) {
            return Self::Matches(matches.clone());
        }

        let mut groups: Vec<(String, Vec<Value>)> = map
            .iter()
            .filter_map(|(k, v)| v.as_array().map(|items| (k.clone(), items.clone())))
            .collect();

        match groups.len() {
            0 => Self::Unrecognized,
            1 => {
                let (key, items) = groups.remove(0);
                Self::SingleArray { key, items }
            }
            _ => Self::MultiArray { groups },
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopLevelArray(_) => "top-level array",
            Self::Partitioned { .. } => "live/upcoming partition",
            Self::Matches(_) => "matches key",
            Self::SingleArray { .. } => "single array key",
            Self::MultiArray { .. } => "multiple array keys",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn into_normalized(self) -> Normalized {
        match self {
            Self::TopLevelArray(live) | Self::Matches(live) => Normalized {
                live,
                upcoming: Vec::new(),
            },
            Self::Partitioned { live, upcoming } => Normalized { live, upcoming },
            Self::SingleArray { items, .. } => Normalized {
                live: items,
                upcoming: Vec::new(),
            },
            Self::MultiArray { groups } => {
                let mut out = Normalized::default();
                for (key, items) in groups {
                    if key.contains("live") {
                        out.live.extend(items);
                    } else {
                        out.upcoming.extend(items);
                    }
                }
                out
            }
            Self::Unrecognized => Normalized::default(),
        }
    }
}

/// Reduce any JSON value to live/upcoming lists. Total; never fails.
pub fn normalize(payload: &Value) -> Normalized {
    ResponseShape::classify(payload).into_normalized()
}
