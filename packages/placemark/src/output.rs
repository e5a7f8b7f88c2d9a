//! JSON output.

use std::path::Path;

use kml_placemarks_models::PlacemarkRecord;

use crate::KmlError;

/// Serializes `records` as a pretty-printed JSON array.
///
/// Non-ASCII text is written as-is rather than `\u` escaped.
///
/// # Errors
///
/// Returns [`KmlError::Json`] if serialization fails.
pub fn to_json(records: &[PlacemarkRecord]) -> Result<String, KmlError> {
    let mut output = serde_json::to_string_pretty(records)?;
    output.push('\n');
    Ok(output)
}

/// Writes `records` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// * [`KmlError::Json`] if serialization fails
/// * [`KmlError::Io`] if the directory or file cannot be written
pub fn write_records(path: &Path, records: &[PlacemarkRecord]) -> Result<(), KmlError> {
    let output = to_json(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| KmlError::io(parent, e))?;
    }
    std::fs::write(path, output).map_err(|e| KmlError::io(path, e))?;

    log::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
