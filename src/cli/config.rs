//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file passed with `--config`:
//!
//! ```toml
//! # mznet.toml
//! [loader]
//! delimiter = "tab"
//!
//! [loader.isf]
//! rt_tolerance = 0.02
//! mz_tolerance = 0.01
//!
//! [display]
//! color_scheme = "tableau"
//! node_size_field = "mz"
//! hide_endogenous = false
//!
//! [ion_filter]
//! tolerance = 0.005
//! intensity_percentile = 50
//! ```
//!
//! Command-line flags take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mznet::encoding::{ColorScheme, DEFAULT_SIZE_FIELD};
use mznet::graph::{IonFilter, LoaderConfig};

/// Root configuration structure for mznet.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Table loading settings.
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Rendering defaults.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Fragment-ion filter defaults.
    #[serde(default)]
    pub ion_filter: IonFilterConfig,
}

/// Rendering defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DisplayConfig {
    /// Ratio color scheme.
    pub color_scheme: Option<ColorScheme>,

    /// Node field mapped to node size.
    pub node_size_field: Option<String>,

    /// Hide components without a prototype node.
    pub hide_endogenous: Option<bool>,
}

/// Fragment-ion filter defaults.
#[derive(Debug, Default, Deserialize)]
pub struct IonFilterConfig {
    /// Allowed m/z deviation.
    pub tolerance: Option<f64>,

    /// Share of the most intense peaks to search, in percent.
    pub intensity_percentile: Option<f64>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file if one was given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Color scheme, CLI flag first.
    pub fn color_scheme(&self, flag: Option<ColorScheme>) -> ColorScheme {
        flag.or(self.display.color_scheme).unwrap_or_default()
    }

    /// Node size field, CLI flag first.
    pub fn node_size_field(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.display.node_size_field.clone())
            .unwrap_or_else(|| DEFAULT_SIZE_FIELD.to_string())
    }

    /// Whether to hide endogenous components; `--all` always shows them.
    pub fn hide_endogenous(&self, show_all: bool) -> bool {
        !show_all && self.display.hide_endogenous.unwrap_or(true)
    }

    /// Ion filter for `mz`, CLI flags first.
    pub fn ion_filter(&self, mz: f64, tolerance: Option<f64>, intensity: Option<f64>) -> IonFilter {
        IonFilter::new(mz)
            .with_tolerance(
                tolerance
                    .or(self.ion_filter.tolerance)
                    .unwrap_or(IonFilter::DEFAULT_TOLERANCE),
            )
            .with_intensity_percentile(
                intensity
                    .or(self.ion_filter.intensity_percentile)
                    .unwrap_or(IonFilter::DEFAULT_INTENSITY_PERCENTILE),
            )
    }
}
