//! # Graph Export
//!
//! Download formats for a displayed graph:
//!
//! - **GraphML** (`.graphml`): typed attribute keys, one `<node>` per node and
//!   one `<edge>` per edge, all text XML-escaped
//! - **JSON** (`.json`): pretty-printed `{"nodes": [...], "edges": [...]}`
//!
//! Both serializers are deterministic: the same graph always yields the same
//! bytes, so exports can be diffed.

mod error;
mod graphml;


pub use error::ExportError;
pub use graphml::{to_graphml, GRAPHML_HEADER, TRANSIENT_EDGE_FIELDS};

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::graph::Graph;

/// Export file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// GraphML XML document
    #[default]
    GraphMl,
    /// Raw JSON dump
    Json,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::GraphMl => "graphml",
            ExportFormat::Json => "json",
        }
    }

    /// Default download file name
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::GraphMl => "graph-export.graphml",
            ExportFormat::Json => "graph-data.json",
        }
    }

    /// MIME type of the output
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::GraphMl => "application/xml",
            ExportFormat::Json => "application/json",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "graphml" | "xml" => Some(ExportFormat::GraphMl),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Pretty-printed JSON dump of the graph
pub fn to_json_pretty(graph: &Graph) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Render the graph in the given format
pub fn render(graph: &Graph, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::GraphMl => Ok(to_graphml(graph)),
        ExportFormat::Json => to_json_pretty(graph),
    }
}

/// Render the graph and write it to `path`
pub fn write_file<P: AsRef<Path>>(
    graph: &Graph,
    format: ExportFormat,
    path: P,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let content = render(graph, format)?;
    fs::write(path, content)?;
    log::info!(
        "Exported {} nodes, {} edges as {} to {}",
        graph.node_count(),
        graph.edge_count(),
        format.extension(),
        path.display()
    );
    Ok(())
}
