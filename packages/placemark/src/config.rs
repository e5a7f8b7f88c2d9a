//! Run configuration.
//!
//! An export needs an input KML path and an output JSON path, plus an
//! optional fallback input copied into place when the input is missing.
//! Values come from a TOML file and/or command-line overrides:
//!
//! ```toml
//! input_path = "outputs/downloaded/8_lin_map.kml"
//! output_path = "outputs/spatial_info_json/8_spatial_info.json"
//! fallback_input_path = "uploads/map.kml"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::KmlError;

/// Partially specified configuration, as read from TOML or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// KML document to read.
    pub input_path: Option<PathBuf>,
    /// JSON file to write.
    pub output_path: Option<PathBuf>,
    /// Copied onto `input_path` when that file does not exist.
    pub fallback_input_path: Option<PathBuf>,
}

/// Fully resolved configuration for a single export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// KML document to read.
    pub input_path: PathBuf,
    /// JSON file to write.
    pub output_path: PathBuf,
    /// Copied onto `input_path` when that file does not exist.
    pub fallback_input_path: Option<PathBuf>,
}

impl ExportConfig {
    /// Parses a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KmlError::Config`] if the TOML is malformed or contains
    /// unknown keys.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, KmlError> {
        toml::from_str(toml_str).map_err(|e| KmlError::Config {
            message: e.to_string(),
        })
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// * [`KmlError::Io`] if the file cannot be read
    /// * [`KmlError::Config`] if its contents are invalid
    pub fn load(path: &Path) -> Result<Self, KmlError> {
        let toml_str = std::fs::read_to_string(path).map_err(|e| KmlError::io(path, e))?;
        Self::from_toml_str(&toml_str)
    }

    /// Layers `overrides` on top of `self`; any value set in `overrides`
    /// wins.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            input_path: overrides.input_path.or(self.input_path),
            output_path: overrides.output_path.or(self.output_path),
            fallback_input_path: overrides.fallback_input_path.or(self.fallback_input_path),
        }
    }

    /// Checks that both required paths are present.
    ///
    /// # Errors
    ///
    /// Returns [`KmlError::Config`] naming the first missing path.
    pub fn resolve(self) -> Result<ExportPaths, KmlError> {
        let input_path = self.input_path.ok_or_else(|| missing("input_path"))?;
        let output_path = self.output_path.ok_or_else(|| missing("output_path"))?;

        Ok(ExportPaths {
            input_path,
            output_path,
            fallback_input_path: self.fallback_input_path,
        })
    }
}

fn missing(key: &str) -> KmlError {
    KmlError::Config {
        message: format!("missing required setting '{key}'"),
    }
}
