use anyhow::{Context, Result};
use std::path::Path;

use mznet::encoding::{ratio_colors, AnalysisConfig, ColorScheme};

/// Print the color assigned to every ratio field of an analysis
pub fn run(analysis: &Path, scheme: ColorScheme) -> Result<()> {
    let json = std::fs::read_to_string(analysis)
        .with_context(|| format!("Failed to read analysis config: {}", analysis.display()))?;
    let config = AnalysisConfig::from_json(&json).context("Failed to parse analysis config")?;

    let colors = ratio_colors(&config, scheme);
    if colors.is_empty() {
        log::warn!("Analysis defines no sample groups");
    }

    println!("Scheme: {}", scheme);
    for color in &colors {
        println!("{}\t{}", color.field, color.color);
    }
    Ok(())
}
