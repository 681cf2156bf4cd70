use anyhow::Result;
use std::path::Path;

use mznet::encoding::node_sizes;

use super::{load_network, Config};

/// Print node sizes in node order; nodes without the field are skipped
pub fn run(nodes: &Path, edges: &Path, field: &str, config: &Config) -> Result<()> {
    let (graph, _) = load_network(nodes, edges, &config.loader)?;
    let sizes = node_sizes(&graph, field);

    if sizes.is_empty() {
        log::warn!("No node has a numeric '{}' value", field);
    }

    println!("id\t{}_size", field);
    for node in graph.nodes() {
        if let Some(size) = sizes.get(&node.id) {
            println!("{}\t{:.3}", node.id, size);
        }
    }
    Ok(())
}
