use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use mznet::export::{write_file, ExportFormat};
use mznet::graph::IonFilter;
use mznet::view::{AnalysisView, DisplayState};

use super::{load_network, Config};

/// Export the graph the default view would display
pub fn run(
    nodes: &Path,
    edges: &Path,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
    hide_endogenous: bool,
    ion_filter: Option<IonFilter>,
    config: &Config,
) -> Result<()> {
    let format = format
        .or_else(|| output.as_deref().and_then(ExportFormat::from_path))
        .unwrap_or_default();
    let output = output.unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    let mut view = AnalysisView::new();
    let ticket = view.begin_load();
    let (graph, _) = load_network(nodes, edges, &config.loader)?;
    view.finish_load(ticket, Ok(graph));
    view.set_hide_endogenous(hide_endogenous);

    if let Some(filter) = ion_filter {
        info!(
            "Ion filter: m/z {} ± {}, top {}% of peaks",
            filter.mz, filter.tolerance, filter.intensity_percentile
        );
        view.apply_ion_filter(filter);
    }

    let graph = match view.display() {
        DisplayState::Ready(graph) => graph,
        DisplayState::Empty => {
            warn!("Nothing to display; exporting an empty graph");
            view.displayed().context("View has no graph")?
        }
        DisplayState::Failed(e) => bail!("Failed to load network: {}", e),
        DisplayState::Pending => bail!("Network was not loaded"),
    };

    write_file(graph, format, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} nodes and {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        output.display()
    );
    Ok(())
}
