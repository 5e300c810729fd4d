use tracing::debug;

use vitals_core::{DatasetLoadError, HealthRecord};

use crate::series::TimeSeries;

/// Compress records into one payload per hour.
///
/// Records are visited in input order; each timestamp is truncated to its hour
/// and only the first record of an hour is kept; later readings in the same
/// hour are dropped. A single malformed timestamp fails the whole index.
pub fn index(records: &[HealthRecord]) -> Result<TimeSeries, DatasetLoadError> {
    let mut series = TimeSeries::new();
    let mut collapsed = 0usize;

    for (i, record) in records.iter().enumerate() {
        let key = record
            .hour_key()
            .map_err(|_| DatasetLoadError::InvalidTimestamp {
                index: i,
                value: record.timestamp.clone(),
            })?;
        if !series.insert_first(key, record.domain.clone()) {
            collapsed += 1;
        }
    }

    debug!(
        records = records.len(),
        buckets = series.len(),
        collapsed,
        "Indexed health records into hour buckets"
    );
    Ok(series)
}
