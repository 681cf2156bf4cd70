//! # Reaction Lookup
//!
//! Maps an edge's m/z difference to candidate enzymes and pathways using a
//! reaction-pair table (one row per KEGG compound pair).
//!
//! Rows are grouped by their `Δm/z` rounded to four decimals. A lookup unions
//! every group whose key lies within the tolerance of the query, keeping the
//! first-seen order of enzymes and pathways.
//!
//! ```rust
//! use mznet::reactions::ReactionIndex;
//!
//! let index = ReactionIndex::from_str(
//!     "Δm/z,ENZYME ID,PATHWAY\n\
//!      79.96633,2.7.1.1,rn00010 /// rn00051\n",
//! )?;
//! let found = index.lookup(79.9663, 0.01);
//! assert_eq!(found.enzymes, vec!["2.7.1.1"]);
//! assert_eq!(found.pathways, vec!["00010", "00051"]);
//! # Ok::<(), mznet::reactions::ReactionError>(())
//! ```

mod error;


pub use error::ReactionError;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::tabular::{ParseOptions, Record, Table, TabularParser};

/// m/z difference column
pub const MZ_DIFF_COLUMN: &str = "Δm/z";
/// Enzyme (EC number) column
pub const ENZYME_COLUMN: &str = "ENZYME ID";
/// Pathway column, `///`-separated
pub const PATHWAY_COLUMN: &str = "PATHWAY";

/// Default lookup tolerance in Da
pub const DEFAULT_TOLERANCE: f64 = 0.01;
/// Smallest accepted tolerance in Da
pub const MIN_TOLERANCE: f64 = 0.001;
/// Largest accepted tolerance in Da
pub const MAX_TOLERANCE: f64 = 0.1;

const PATHWAY_SEPARATOR: &str = "///";

/// Four-decimal group key for an m/z difference.
///
/// Values exactly halfway between two keys round away from zero.
fn group_key(mz_diff: f64) -> String {
    // Only multiples of 1/32 can sit exactly on a fifth-decimal half.
    if (mz_diff * 32.0).fract() == 0.0 {
        let scaled = mz_diff * 1e4;
        if scaled.fract().abs() == 0.5 {
            return format!("{:.4}", scaled.round() / 1e4);
        }
    }
    format!("{:.4}", mz_diff)
}

/// Check a user-supplied tolerance against the accepted window
pub fn validate_tolerance(tolerance: f64) -> Result<f64, ReactionError> {
    if (MIN_TOLERANCE..=MAX_TOLERANCE).contains(&tolerance) {
        Ok(tolerance)
    } else {
        Err(ReactionError::ToleranceOutOfRange(tolerance))
    }
}

/// Enzymes and pathways for one rounded m/z difference
#[derive(Debug, Clone, Default, PartialEq)]
struct ReactionGroup {
    mz_diff: f64,
    enzymes: Vec<String>,
    pathways: Vec<String>,
}

/// Candidate reactions for an m/z difference
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReactionMatch {
    /// Enzyme identifiers, deduplicated in first-seen order
    pub enzymes: Vec<String>,
    /// Pathway identifiers, deduplicated in first-seen order
    pub pathways: Vec<String>,
}

impl ReactionMatch {
    /// True when nothing matched
    pub fn is_empty(&self) -> bool {
        self.enzymes.is_empty() && self.pathways.is_empty()
    }

    /// Render as a two-column `Type,Value` CSV document.
    ///
    /// Enzyme rows come first, then pathway rows.
    pub fn to_csv(&self) -> Result<String, ReactionError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(["Type", "Value"])?;
        for enzyme in &self.enzymes {
            writer.write_record(["Enzyme", enzyme.as_str()])?;
        }
        for pathway in &self.pathways {
            writer.write_record(["Pathway", pathway.as_str()])?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }

    /// Write the CSV document to `path`
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ReactionError> {
        std::fs::write(path.as_ref(), self.to_csv()?)?;
        log::info!(
            "Wrote {} enzymes and {} pathways to {}",
            self.enzymes.len(),
            self.pathways.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

/// Reaction-pair table indexed by rounded m/z difference
#[derive(Debug, Clone, Default)]
pub struct ReactionIndex {
    groups: Vec<ReactionGroup>,
    by_key: HashMap<String, usize>,
    skipped_rows: usize,
}

impl ReactionIndex {
    /// Read a reaction table from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReactionError> {
        let table = TabularParser::new(ParseOptions::text_only()).parse_reader(reader)?;
        Self::from_table(&table)
    }

    /// Parse a reaction table held in memory
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, ReactionError> {
        let table = TabularParser::new(ParseOptions::text_only()).parse_str(text)?;
        Self::from_table(&table)
    }

    fn from_table(table: &Table) -> Result<Self, ReactionError> {
        for column in [MZ_DIFF_COLUMN, ENZYME_COLUMN, PATHWAY_COLUMN] {
            if !table.has_column(column) {
                return Err(ReactionError::MissingColumn(column.to_string()));
            }
        }

        let mut index = ReactionIndex::default();
        for record in table.records() {
            index.add_row(table, record);
        }

        if index.skipped_rows > 0 {
            log::warn!(
                "Skipped {} reaction rows with a non-numeric {}",
                index.skipped_rows,
                MZ_DIFF_COLUMN
            );
        }
        log::info!(
            "Indexed {} reaction rows into {} m/z groups",
            table.len() - index.skipped_rows,
            index.groups.len()
        );

        Ok(index)
    }

    fn add_row(&mut self, table: &Table, record: &Record) {
        let cell = |column: &str| {
            table
                .get(record, column)
                .map(|v| v.to_canonical_string())
                .unwrap_or_default()
        };

        let mz_diff = match cell(MZ_DIFF_COLUMN).trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.skipped_rows += 1;
                return;
            }
        };

        let key = group_key(mz_diff);
        let slot = match self.by_key.get(&key) {
            Some(&i) => i,
            None => {
                self.groups.push(ReactionGroup {
                    // Lookups compare against the rounded key
                    mz_diff: key.parse().unwrap_or(mz_diff),
                    ..Default::default()
                });
                self.by_key.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[slot];

        let enzyme = cell(ENZYME_COLUMN);
        if !enzyme.is_empty() {
            push_unique(&mut group.enzymes, enzyme);
        }
        let pathways = cell(PATHWAY_COLUMN);
        if !pathways.is_empty() {
            for pathway in split_pathways(&pathways) {
                push_unique(&mut group.pathways, pathway);
            }
        }
    }

    /// Number of distinct rounded m/z differences
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Rows dropped because their m/z difference was not numeric
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Every enzyme in the table, first-seen order
    pub fn enzymes(&self) -> Vec<&str> {
        let mut all: Vec<&str> = Vec::new();
        for enzyme in self.groups.iter().flat_map(|g| g.enzymes.iter()) {
            if !all.contains(&enzyme.as_str()) {
                all.push(enzyme);
            }
        }
        all
    }

    /// Every pathway in the table, first-seen order
    pub fn pathways(&self) -> Vec<&str> {
        let mut all: Vec<&str> = Vec::new();
        for pathway in self.groups.iter().flat_map(|g| g.pathways.iter()) {
            if !all.contains(&pathway.as_str()) {
                all.push(pathway);
            }
        }
        all
    }

    /// Union of all groups within `tolerance` Da of `mz_diff`
    pub fn lookup(&self, mz_diff: f64, tolerance: f64) -> ReactionMatch {
        let mut found = ReactionMatch::default();
        for group in self
            .groups
            .iter()
            .filter(|g| (g.mz_diff - mz_diff).abs() <= tolerance)
        {
            for enzyme in &group.enzymes {
                push_unique(&mut found.enzymes, enzyme.clone());
            }
            for pathway in &group.pathways {
                push_unique(&mut found.pathways, pathway.clone());
            }
        }
        log::debug!(
            "Reaction lookup {} ± {}: {} enzymes, {} pathways",
            mz_diff,
            tolerance,
            found.enzymes.len(),
            found.pathways.len()
        );
        found
    }
}

/// Split a `///`-separated pathway cell, dropping the first `rn` of each entry
fn split_pathways(cell: &str) -> impl Iterator<Item = String> + '_ {
    cell.split(PATHWAY_SEPARATOR)
        .map(|p| p.trim().replacen("rn", "", 1))
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
