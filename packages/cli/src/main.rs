#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the KML placemark exporter.
//!
//! Reads paths from an optional TOML config file, applies command-line
//! overrides, and converts the input KML into a JSON array of placemarks.
//! Log verbosity defaults to `info` and follows `RUST_LOG` when set.

use std::path::PathBuf;

use clap::Parser;
use kml_placemarks::config::ExportConfig;

#[derive(Parser)]
#[command(
    name = "kml_placemarks",
    about = "Extract KML placemarks and their styles into JSON"
)]
struct Cli {
    /// TOML file providing `input_path`, `output_path` and optionally
    /// `fallback_input_path`
    #[arg(long)]
    config: Option<PathBuf>,
    /// KML document to read (overrides the config file)
    #[arg(long)]
    input: Option<PathBuf>,
    /// JSON file to write (overrides the config file)
    #[arg(long)]
    output: Option<PathBuf>,
    /// File copied onto the input path when the input does not exist
    #[arg(long)]
    fallback_input: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ExportConfig {
        ExportConfig {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            fallback_input_path: self.fallback_input.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .try_init()
        .ok();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => ExportConfig::load(path)?,
        None => ExportConfig::default(),
    };
    let paths = base.merge(cli.overrides()).resolve()?;
    log::debug!("Resolved paths: {paths:?}");

    kml_placemarks::export(&paths)?;

    Ok(())
}
