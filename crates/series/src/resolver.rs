use vitals_core::HourBucketKey;

use crate::series::TimeSeries;

/// Return every entry of `series` whose key lies in `[start, end]`.
///
/// Keys compare lexicographically, which matches chronological order for the
/// fixed-width hour format. A reversed window (`start > end`) matches nothing.
/// The result keeps `series` iteration order.
pub fn resolve(start: &HourBucketKey, end: &HourBucketKey, series: &TimeSeries) -> TimeSeries {
    if start > end {
        return TimeSeries::new();
    }
    series
        .iter()
        .filter(|(key, _)| start <= *key && *key <= end)
        .map(|(key, payload)| (key.clone(), payload.clone()))
        .collect()
}
