use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use mznet::encoding::ColorScheme;
use mznet::export::ExportFormat;
use mznet::graph::{load_with_report, Graph, LoadReport, LoaderConfig};

mod colors;
mod config;
mod export;
mod reactions;
mod sizes;
mod summary;

pub use config::Config;

/// mznet - Molecular network graph pipeline
#[derive(Parser)]
#[command(name = "mznet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Ratio color scheme.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ColorSchemeArg {
    /// Accent categorical palette
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

impl From<ColorSchemeArg> for ColorScheme {
    fn from(arg: ColorSchemeArg) -> Self {
        match arg {
            ColorSchemeArg::Accent => ColorScheme::Accent,
            ColorSchemeArg::Tableau => ColorScheme::Tableau,
            ColorSchemeArg::Purple => ColorScheme::Purple,
            ColorSchemeArg::Green => ColorScheme::Green,
            ColorSchemeArg::Orange => ColorScheme::Orange,
            ColorSchemeArg::Classic => ColorScheme::Classic,
            ColorSchemeArg::Rainbow => ColorScheme::Rainbow,
        }
    }
}

/// Export file format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// GraphML XML document
    Graphml,
    /// Pretty-printed JSON dump
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Graphml => ExportFormat::GraphMl,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load a network and report its size, components and diagnostics
    Summary {
        /// Node table (CSV or TSV)
        #[arg(value_name = "NODES")]
        nodes: PathBuf,

        /// Edge table (CSV or TSV)
        #[arg(value_name = "EDGES")]
        edges: PathBuf,
    },

    /// Export the displayed network as GraphML or JSON
    Export {
        /// Node table (CSV or TSV)
        #[arg(value_name = "NODES")]
        nodes: PathBuf,

        /// Edge table (CSV or TSV)
        #[arg(value_name = "EDGES")]
        edges: PathBuf,

        /// Output file (defaults to graph-export.graphml / graph-data.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (guessed from the output extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Keep components without a prototype node
        #[arg(long)]
        all: bool,

        /// Only keep nodes whose top MS/MS peaks include this fragment m/z
        #[arg(long, value_name = "MZ")]
        ion_mz: Option<f64>,

        /// m/z tolerance for --ion-mz
        #[arg(long, requires = "ion_mz")]
        tolerance: Option<f64>,

        /// Percent of most intense peaks searched for --ion-mz
        #[arg(long, requires = "ion_mz")]
        intensity: Option<f64>,
    },

    /// Print the color assigned to each ratio field of an analysis
    Colors {
        /// Analysis configuration (JSON)
        #[arg(value_name = "ANALYSIS_JSON")]
        analysis: PathBuf,

        /// Color scheme
        #[arg(short, long, value_enum)]
        scheme: Option<ColorSchemeArg>,
    },

    /// Print the visual size of each node
    Sizes {
        /// Node table (CSV or TSV)
        #[arg(value_name = "NODES")]
        nodes: PathBuf,

        /// Edge table (CSV or TSV)
        #[arg(value_name = "EDGES")]
        edges: PathBuf,

        /// Numeric node field mapped to size
        #[arg(long)]
        field: Option<String>,
    },

    /// Look up enzymes and pathways for an m/z difference
    Reactions {
        /// Reaction-pair table (CSV)
        #[arg(value_name = "TABLE")]
        table: PathBuf,

        /// m/z difference to look up
        #[arg(long, value_name = "MZ")]
        mz_diff: f64,

        /// Lookup tolerance in Da (0.001 - 0.1)
        #[arg(short, long, default_value = "0.01")]
        tolerance: f64,

        /// Write the result as Type,Value CSV instead of printing it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { nodes, edges } => summary::run(&nodes, &edges, &config),
        Commands::Export {
            nodes,
            edges,
            output,
            format,
            all,
            ion_mz,
            tolerance,
            intensity,
        } => {
            let ion_filter = ion_mz.map(|mz| config.ion_filter(mz, tolerance, intensity));
            export::run(
                &nodes,
                &edges,
                output,
                format.map(ExportFormat::from),
                config.hide_endogenous(all),
                ion_filter,
                &config,
            )
        }
        Commands::Colors { analysis, scheme } => {
            colors::run(&analysis, config.color_scheme(scheme.map(ColorScheme::from)))
        }
        Commands::Sizes {
            nodes,
            edges,
            field,
        } => sizes::run(&nodes, &edges, &config.node_size_field(field), &config),
        Commands::Reactions {
            table,
            mz_diff,
            tolerance,
            output,
        } => reactions::run(&table, mz_diff, tolerance, output),
    }
}

/// Read both tables and load the network
fn load_network(nodes: &Path, edges: &Path, config: &LoaderConfig) -> Result<(Graph, LoadReport)> {
    let nodes_text = std::fs::read_to_string(nodes)
        .with_context(|| format!("Failed to read node table: {}", nodes.display()))?;
    let edges_text = std::fs::read_to_string(edges)
        .with_context(|| format!("Failed to read edge table: {}", edges.display()))?;

    load_with_report(&nodes_text, &edges_text, config).context("Failed to load network")
}
