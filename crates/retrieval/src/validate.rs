use tracing::{debug, warn};

use vitals_core::ExtractedQuery;
use vitals_series::TimeSeries;

/// Normalise an extracted query against the series it will be resolved on.
///
/// Reversed bounds are swapped. Bounds outside the series' key span are kept;
/// they simply match less (or nothing).
pub fn normalize(mut query: ExtractedQuery, series: &TimeSeries) -> ExtractedQuery {
    if query.is_reversed() {
        warn!(
            start = %query.start,
            end = %query.end,
            "Model returned reversed timeframe, swapping bounds"
        );
        std::mem::swap(&mut query.start, &mut query.end);
    }

    if let Some((first, last)) = series.key_span() {
        if query.end < *first || query.start > *last {
            debug!(
                start = %query.start,
                end = %query.end,
                data_start = %first,
                data_end = %last,
                "Timeframe lies outside the dataset"
            );
        } else if query.start < *first || query.end > *last {
            debug!(
                start = %query.start,
                end = %query.end,
                data_start = %first,
                data_end = %last,
                "Timeframe extends past the dataset"
            );
        }
    }

    query
}
