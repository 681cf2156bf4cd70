use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

use mznet::reactions::{validate_tolerance, ReactionIndex};

/// Look up enzymes and pathways for an m/z difference
pub fn run(table: &Path, mz_diff: f64, tolerance: f64, output: Option<PathBuf>) -> Result<()> {
    let tolerance = validate_tolerance(tolerance)?;

    let file = File::open(table)
        .with_context(|| format!("Failed to open reaction table: {}", table.display()))?;
    let index = ReactionIndex::from_reader(file).context("Failed to read reaction table")?;
    let found = index.lookup(mz_diff, tolerance);

    if let Some(output) = output {
        found
            .write_csv(&output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!(
            "Wrote {} enzymes and {} pathways to {}",
            found.enzymes.len(),
            found.pathways.len(),
            output.display()
        );
        return Ok(());
    }

    if found.is_empty() {
        println!("No reactions within {} Da of {}", tolerance, mz_diff);
        return Ok(());
    }

    println!("Enzymes ({}):", found.enzymes.len());
    for enzyme in &found.enzymes {
        println!("  {}", enzyme);
    }
    println!("Pathways ({}):", found.pathways.len());
    for pathway in &found.pathways {
        println!("  {}", pathway);
    }
    Ok(())
}
