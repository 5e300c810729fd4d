use std::fs;
use std::path::Path;

use tracing::info;

use vitals_core::VitalsError;

use crate::series::TimeSeries;

/// Default file name for a dumped range.
pub const DEFAULT_EXPORT_FILE: &str = "health_data_timeframe.json";

/// Render a series as a JSON object indented with two spaces.
pub fn to_pretty_json(series: &TimeSeries) -> Result<String, VitalsError> {
    serde_json::to_string_pretty(series).map_err(|e| VitalsError::Serialize(e.to_string()))
}

/// Write a series to `path`, replacing any previous dump.
pub fn write_json(series: &TimeSeries, path: &Path) -> Result<(), VitalsError> {
    let body = to_pretty_json(series)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    info!(path = %path.display(), entries = series.len(), "Exported matched range");
    Ok(())
}
