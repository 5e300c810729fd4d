use serde::{Deserialize, Serialize};

use crate::record::HourBucketKey;

/// Structured form of a natural-language health query.
///
/// Only complete extractions are represented; a failed extraction never
/// produces a partially filled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedQuery {
    pub ailment: String,
    pub start: HourBucketKey,
    pub end: HourBucketKey,
}

impl ExtractedQuery {
    pub fn new(ailment: impl Into<String>, start: HourBucketKey, end: HourBucketKey) -> Self {
        Self {
            ailment: ailment.into(),
            start,
            end,
        }
    }

    /// True when the query names a single hour rather than a window.
    pub fn is_single_hour(&self) -> bool {
        self.start == self.end
    }

    /// True when `start` sorts after `end`.
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    /// Whether `key` falls inside `[start, end]`.
    pub fn covers(&self, key: &HourBucketKey) -> bool {
        &self.start <= key && key <= &self.end
    }
}
