//! # Visual Encoding
//!
//! Per-node values the visualization layer draws with:
//!
//! - [`node_sizes`]: linear mapping of a numeric field onto node radii
//! - [`ratio_colors`]: one color per sample-ratio column for a chosen scheme
//! - [`ratio_slices`]: a node's ratio pie, using those colors
//!
//! All functions are pure and never fail; degenerate inputs get defined
//! fallbacks (equal values map to the base size, no samples map to no colors).

pub mod palette;
mod ratio;
mod size;


pub use ratio::{
    ratio_colors, ratio_slices, AnalysisConfig, BioSample, ColorScheme, DrugSample, RatioColor,
    RatioSlice, RATIO_SUFFIX,
};
pub use size::{node_sizes, BASE_SIZE, DEFAULT_SIZE_FIELD, SIZE_SCALE};
