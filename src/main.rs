//! # mznet
//!
//! Command-line front end for the molecular network pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Load a network and report what was kept
//! mznet summary nodes.csv edges.csv
//!
//! # Export the prototype view as GraphML
//! mznet export nodes.csv edges.csv -o network.graphml
//!
//! # Export every node carrying a fragment at m/z 91.054 as JSON
//! mznet export nodes.csv edges.csv --all --ion-mz 91.054 -f json
//!
//! # Enzymes and pathways for a phosphorylation
//! mznet reactions kegg-pairs.csv --mz-diff 79.9663
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
