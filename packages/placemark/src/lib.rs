#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! KML style resolution and placemark extraction.
//!
//! Reads a KML document, resolves `<Style>`/`<StyleMap>` definitions into
//! icon and color attributes, and flattens every `<Placemark>` with a
//! Point, `LineString` or Polygon geometry into a [`PlacemarkRecord`]
//! carrying `[lon, lat]` coordinates.
//!
//! The pipeline is a single synchronous pass:
//!
//! 1. [`loader`] parses the file (retrying once with control characters
//!    stripped)
//! 2. [`style::StyleLookup::build`] resolves styles
//! 3. [`extract::extract`] walks placemarks in document order
//! 4. [`output::write_records`] writes the JSON array

pub mod color;
pub mod config;
pub mod extract;
pub mod geometry;
pub mod loader;
pub mod node;
pub mod output;
pub mod style;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use kml_placemarks_models::{
    DEFAULT_DESCRIPTION, DEFAULT_NAME, GeometryKind, LonLat, PlacemarkRecord, StyleEntry,
};

/// XML namespace every KML element is matched against.
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Errors that can occur while loading, extracting or writing placemarks.
#[derive(Debug, Error)]
pub enum KmlError {
    /// The input file does not exist.
    #[error("KML file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not well-formed XML, even after sanitizing.
    #[error("Failed to parse KML even after cleaning: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Serializing the output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The run configuration is incomplete or malformed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

impl KmlError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Loads `path` and extracts its placemark records.
///
/// # Errors
///
/// * [`KmlError::MissingFile`] if `path` does not exist
/// * [`KmlError::Io`] if the file cannot be read as UTF-8 text
/// * [`KmlError::Xml`] if the document fails to parse after the
///   control-character cleanup retry
pub fn try_extract_file(path: &Path) -> Result<Vec<PlacemarkRecord>, KmlError> {
    let text = loader::read_document(path)?;
    loader::with_document(&text, extract::extract)
}

/// Loads `path` and extracts its placemark records, reporting failures as
/// an empty result.
///
/// A missing file or an unparseable document is logged and yields no
/// records; nothing is propagated to the caller.
#[must_use]
pub fn extract_file(path: &Path) -> Vec<PlacemarkRecord> {
    match try_extract_file(path) {
        Ok(records) => records,
        Err(e) => {
            log::error!("{e}");
            Vec::new()
        }
    }
}

/// Runs a full export: stages the fallback input if needed, extracts
/// placemarks and writes them as JSON.
///
/// When no record is extracted the output file is left untouched. Returns
/// the number of records written.
///
/// # Errors
///
/// Returns an error only if writing the output fails. Input problems are
/// logged and treated as an empty extraction.
pub fn export(paths: &config::ExportPaths) -> Result<usize, KmlError> {
    if let Some(fallback) = &paths.fallback_input_path
        && let Err(e) = loader::copy_fallback_input(&paths.input_path, fallback)
    {
        log::error!("Error copying file: {e}. Ensure both files are accessible.");
    }

    let records = extract_file(&paths.input_path);
    if records.is_empty() {
        log::warn!("No placemarks with coordinates found, or the KML file could not be parsed.");
        return Ok(0);
    }

    output::write_records(&paths.output_path, &records)?;
    log::info!(
        "Successfully extracted and saved details for {} placemarks to {}.",
        records.len(),
        paths.output_path.display()
    );

    Ok(records.len())
}
