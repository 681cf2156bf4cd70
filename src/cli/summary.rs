use anyhow::Result;
use log::info;
use std::path::Path;

use mznet::graph::{components, filter_to_prototype_components};

use super::{load_network, Config};

/// Load a network and print what was loaded and what the default view keeps
pub fn run(nodes: &Path, edges: &Path, config: &Config) -> Result<()> {
    info!("Nodes: {}", nodes.display());
    info!("Edges: {}", edges.display());

    let (graph, report) = load_network(nodes, edges, &config.loader)?;
    let components = components(&graph);
    let prototype_view = filter_to_prototype_components(&graph, &components);
    let kept = prototype_view.node_ids();
    let prototype_components = components
        .iter()
        .filter(|c| c.first().is_some_and(|id| kept.contains(id.as_str())))
        .count();
    let largest = components.iter().map(Vec::len).max().unwrap_or(0);

    println!("Network Summary");
    println!("===============");

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    println!();
    println!("Graph:");
    println!("  Nodes: {}", graph.node_count());
    println!("  Edges: {}", graph.edge_count());
    println!("  Components: {}", components.len());
    println!("  Largest component: {} nodes", largest);
    println!(
        "  Singletons: {}",
        components.iter().filter(|c| c.len() == 1).count()
    );
    println!();
    println!("Prototype view:");
    println!("  Components with a prototype: {}", prototype_components);
    println!("  Nodes: {}", prototype_view.node_count());
    println!("  Edges: {}", prototype_view.edge_count());

    Ok(())
}
