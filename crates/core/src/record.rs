use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Width of an hour-precision ISO key: `YYYY-MM-DDTHH`.
pub const HOUR_KEY_LEN: usize = 13;

/// Timestamp format of source records.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format of an hour bucket key.
pub const HOUR_KEY_FORMAT: &str = "%Y-%m-%dT%H";

/// A timestamp truncated to hour precision (`YYYY-MM-DDTHH`).
///
/// The format is fixed-width and zero-padded, so the derived lexicographic
/// ordering on the inner string is also the chronological ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HourBucketKey(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hour bucket key '{0}': expected YYYY-MM-DDTHH")]
pub struct InvalidBucketKey(pub String);

impl HourBucketKey {
    /// Parse an exact `YYYY-MM-DDTHH` string.
    pub fn parse(raw: &str) -> Result<Self, InvalidBucketKey> {
        if raw.len() != HOUR_KEY_LEN || !raw.is_ascii() {
            return Err(InvalidBucketKey(raw.to_string()));
        }
        // chrono needs a minute to build a time, so pin it to zero.
        let dt = NaiveDateTime::parse_from_str(&format!("{raw}:00"), "%Y-%m-%dT%H:%M")
            .map_err(|_| InvalidBucketKey(raw.to_string()))?;
        // chrono accepts unpadded fields and leading spaces; only the
        // zero-padded form sorts chronologically.
        if dt.format(HOUR_KEY_FORMAT).to_string() != raw {
            return Err(InvalidBucketKey(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Keep the first 13 characters of `raw`, then validate.
    ///
    /// `"2019-05-01T00:00:00"` becomes `"2019-05-01T00"`.
    pub fn truncate(raw: &str) -> Result<Self, InvalidBucketKey> {
        let head: String = raw.chars().take(HOUR_KEY_LEN).collect();
        Self::parse(&head).map_err(|_| InvalidBucketKey(raw.to_string()))
    }

    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        Self(dt.format(HOUR_KEY_FORMAT).to_string())
    }

    /// Start of the hour this key covers.
    pub fn to_datetime(&self) -> NaiveDateTime {
        // The inner string was validated on construction.
        NaiveDateTime::parse_from_str(&format!("{}:00", self.0), "%Y-%m-%dT%H:%M")
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HourBucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HourBucketKey {
    type Error = InvalidBucketKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HourBucketKey> for String {
    fn from(key: HourBucketKey) -> Self {
        key.0
    }
}

impl AsRef<str> for HourBucketKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One entry of the source dataset: a seconds-precision timestamp and an
/// opaque health-domain payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    #[serde(rename = "dateTime")]
    pub timestamp: String,
    #[serde(rename = "healthDomain")]
    pub domain: serde_json::Value,
}

impl HealthRecord {
    pub fn new(timestamp: impl Into<String>, domain: serde_json::Value) -> Self {
        Self {
            timestamp: timestamp.into(),
            domain,
        }
    }

    /// Parse the timestamp and truncate it to its hour bucket.
    pub fn hour_key(&self) -> Result<HourBucketKey, chrono::ParseError> {
        let dt = NaiveDateTime::parse_from_str(&self.timestamp, RECORD_TIMESTAMP_FORMAT)?;
        Ok(HourBucketKey::from_datetime(&dt))
    }
}
