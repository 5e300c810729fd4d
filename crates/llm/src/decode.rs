//! Two-stage decoding of model replies.
//!
//! Stage one parses the whole reply. Stage two recovers an object wrapped in
//! prose by taking everything from the first `{` to the last `}`, which is
//! the same span a greedy, newline-spanning `\{.*\}` match selects. Both
//! stages only accept a JSON object.

use serde::Serialize;
use serde_json::{Map, Value};

/// Which stage produced the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePath {
    Strict,
    Embedded,
}

/// Parse the entire reply as a JSON object.
pub fn decode_strict(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

/// The span from the first `{` to the last `}`, if any.
pub fn embedded_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse the brace-delimited span of a reply as a JSON object.
pub fn decode_embedded(raw: &str) -> Option<Map<String, Value>> {
    embedded_object(raw).and_then(decode_strict)
}

/// Try strict decoding, then embedded recovery.
pub fn decode_reply(raw: &str) -> Option<(Map<String, Value>, DecodePath)> {
    if let Some(obj) = decode_strict(raw) {
        return Some((obj, DecodePath::Strict));
    }
    decode_embedded(raw).map(|obj| (obj, DecodePath::Embedded))
}
