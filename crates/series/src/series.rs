use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vitals_core::HourBucketKey;

/// Hour-bucketed health series: at most one payload per hour, kept in the
/// order the source records were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    entries: IndexMap<HourBucketKey, Value>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `payload` unless the hour is already taken.
    ///
    /// Returns `false` when an earlier record already owns the bucket.
    pub fn insert_first(&mut self, key: HourBucketKey, payload: Value) -> bool {
        match self.entries.entry(key) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(payload);
                true
            }
        }
    }

    pub fn get(&self, key: &HourBucketKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &HourBucketKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HourBucketKey, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &HourBucketKey> {
        self.entries.keys()
    }

    /// Last key in insertion order. This is the present-date anchor, which is
    /// deliberately not the maximum key.
    pub fn last_key(&self) -> Option<&HourBucketKey> {
        self.entries.last().map(|(k, _)| k)
    }

    pub fn first_key(&self) -> Option<&HourBucketKey> {
        self.entries.first().map(|(k, _)| k)
    }

    /// Smallest and largest keys, regardless of insertion order.
    pub fn key_span(&self) -> Option<(&HourBucketKey, &HourBucketKey)> {
        let min = self.entries.keys().min()?;
        let max = self.entries.keys().max()?;
        Some((min, max))
    }

    /// Inclusive `[start, end]` slice; see [`crate::resolver::resolve`].
    pub fn resolve(&self, start: &HourBucketKey, end: &HourBucketKey) -> TimeSeries {
        crate::resolver::resolve(start, end, self)
    }
}

impl FromIterator<(HourBucketKey, Value)> for TimeSeries {
    /// First-write-wins collection, same policy as the indexer.
    fn from_iter<I: IntoIterator<Item = (HourBucketKey, Value)>>(iter: I) -> Self {
        let mut series = TimeSeries::new();
        for (key, payload) in iter {
            series.insert_first(key, payload);
        }
        series
    }
}
