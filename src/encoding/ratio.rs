use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::palette::{
    interpolate_rainbow, interpolate_ramp, ACCENT, CATEGORY10, GREENS, ORANGES, PURPLES,
    TABLEAU10,
};
use crate::graph::Node;

/// Suffix appended to a sample group name to form its ratio column
pub const RATIO_SUFFIX: &str = "_ratio";

/// A biological sample group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioSample {
    /// Group name
    pub name: String,
    /// Blank file names
    #[serde(default)]
    pub blank: Vec<String>,
    /// Sample file names
    #[serde(default)]
    pub sample: Vec<String>,
}

/// The drug sample group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugSample {
    /// Group name
    pub name: String,
    /// File groups
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Analysis parameters as produced by the analysis backend.
///
/// Only the sample groups drive visual encoding; thresholds are carried for
/// display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Biological sample groups, in configured order
    #[serde(default)]
    pub bio_samples: Vec<BioSample>,
    /// Optional drug sample group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_sample: Option<DrugSample>,
    /// Sample correlation threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_threshold: Option<f64>,
    /// MS/MS similarity threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ms2_similarity_threshold: Option<f64>,
    /// m/z error threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mz_error_threshold: Option<f64>,
    /// Retention-time window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rt_time_window: Option<f64>,
    /// Signal enrichment factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_enrichment_factor: Option<f64>,
    /// Minimum signal threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_signal_threshold: Option<f64>,
}

impl AnalysisConfig {
    /// Parse the backend's JSON representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Ratio column names: bio samples in order, then the drug sample
    pub fn ratio_fields(&self) -> Vec<String> {
        self.bio_samples
            .iter()
            .map(|s| s.name.as_str())
            .chain(self.drug_sample.iter().map(|d| d.name.as_str()))
            .map(|name| format!("{}{}", name, RATIO_SUFFIX))
            .collect()
    }
}

/// Ratio color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Accent categorical palette
    #[default]
    Accent,
    /// Tableau 10 categorical palette
    Tableau,
    /// Sequential purples
    Purple,
    /// Sequential greens
    Green,
    /// Sequential oranges
    Orange,
    /// Category 10 categorical palette
    Classic,
    /// Cyclical rainbow
    Rainbow,
}

impl ColorScheme {
    /// Every scheme, in menu order
    pub const ALL: [ColorScheme; 7] = [
        ColorScheme::Accent,
        ColorScheme::Tableau,
        ColorScheme::Purple,
        ColorScheme::Green,
        ColorScheme::Orange,
        ColorScheme::Classic,
        ColorScheme::Rainbow,
    ];

    /// Lowercase scheme name
    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Accent => "accent",
            ColorScheme::Tableau => "tableau",
            ColorScheme::Purple => "purple",
            ColorScheme::Green => "green",
            ColorScheme::Orange => "orange",
            ColorScheme::Classic => "classic",
            ColorScheme::Rainbow => "rainbow",
        }
    }

    /// Fixed palette for categorical schemes, `None` for continuous ones
    pub fn palette(&self) -> Option<&'static [&'static str]> {
        match self {
            ColorScheme::Accent => Some(&ACCENT[..]),
            ColorScheme::Tableau => Some(&TABLEAU10[..]),
            ColorScheme::Classic => Some(&CATEGORY10[..]),
            _ => None,
        }
    }

    /// Color of entry `index` out of `count`.
    ///
    /// Categorical palettes wrap around. Continuous schemes sample at
    /// `index / count`, so the upper end of the ramp is never reached.
    pub fn color(&self, index: usize, count: usize) -> String {
        if let Some(palette) = self.palette() {
            return palette[index % palette.len()].to_string();
        }
        let t = index as f64 / count.max(1) as f64;
        match self {
            ColorScheme::Purple => interpolate_ramp(&PURPLES, t).to_string(),
            ColorScheme::Green => interpolate_ramp(&GREENS, t).to_string(),
            ColorScheme::Orange => interpolate_ramp(&ORANGES, t).to_string(),
            _ => interpolate_rainbow(t).to_string(),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorScheme::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown color scheme: {}. Valid options: accent, tableau, purple, green, orange, classic, rainbow",
                    s
                )
            })
    }
}

/// Color assigned to one ratio column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatioColor {
    /// Ratio column name
    pub field: String,
    /// CSS color
    pub color: String,
}

/// One color per ratio column, in configured order
pub fn ratio_colors(config: &AnalysisConfig, scheme: ColorScheme) -> Vec<RatioColor> {
    let fields = config.ratio_fields();
    let count = fields.len();
    fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| RatioColor {
            field,
            color: scheme.color(i, count),
        })
        .collect()
}

/// A pie slice of a node's sample ratios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioSlice {
    /// Ratio column name
    pub field: String,
    /// CSS color
    pub color: String,
    /// Share of the node's ratio total, in `(0, 1]`
    pub fraction: f64,
}

/// Pie slices for a node: positive ratio values only, normalised to sum to 1
pub fn ratio_slices(node: &Node, colors: &[RatioColor]) -> Vec<RatioSlice> {
    let values: Vec<f64> = colors
        .iter()
        .map(|c| node.numeric_field(&c.field).unwrap_or(0.0))
        .collect();
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    colors
        .iter()
        .zip(values)
        .filter(|(_, v)| *v > 0.0)
        .map(|(c, v)| RatioSlice {
            field: c.field.clone(),
            color: c.color.clone(),
            fraction: v / total,
        })
        .collect()
}
