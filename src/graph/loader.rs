use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use super::{Attributes, Edge, Graph, LoadError, Node, NodeId, Peak};
use crate::tabular::{Delimiter, DynamicTyping, ParseOptions, Record, Table, TabularParser, Value};

const NODES: &str = "nodes";
const EDGES: &str = "edges";

/// Edge columns that keep their literal text (no numeric coercion)
pub const TEXT_COLUMNS: [&str; 2] = ["matchedFormulaChange", "matchedDescription"];

/// In-source fragment detection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct IsfCriteria {
    /// Maximum retention-time difference between the endpoints (minutes)
    pub rt_tolerance: f64,
    /// Maximum distance between the fragment m/z and a peak of the parent spectrum
    pub mz_tolerance: f64,
}

impl Default for IsfCriteria {
    fn default() -> Self {
        Self {
            rt_tolerance: 0.02,
            mz_tolerance: 0.01,
        }
    }
}

impl IsfCriteria {
    /// True when `fragment` looks like an in-source fragment of `parent`:
    /// co-eluting, lighter, and present in the parent's MS/MS spectrum.
    pub fn is_fragment(&self, fragment: &Node, parent: &Node) -> bool {
        (fragment.rt - parent.rt).abs() <= self.rt_tolerance
            && fragment.mz < parent.mz
            && parent
                .msms_spectrum
                .iter()
                .any(|(mz, _)| (mz - fragment.mz).abs() <= self.mz_tolerance)
    }
}

/// Graph loader configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Field delimiter of both tables
    pub delimiter: Delimiter,
    /// In-source fragment thresholds
    pub isf: IsfCriteria,
}

/// An edge removed because an endpoint is not in the node set
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedEdge {
    /// Position in the input edge sequence
    pub index: usize,
    /// First endpoint as given
    pub id1: NodeId,
    /// Second endpoint as given
    pub id2: NodeId,
}

/// Load diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Node rows read
    pub node_rows: usize,
    /// Edge rows read
    pub edge_rows: usize,
    /// Node rows skipped for lacking an identifier
    pub unidentified_nodes: usize,
    /// Node rows that replaced an earlier row with the same identifier
    pub duplicate_nodes: usize,
    /// Edges removed for referencing missing nodes
    pub dropped_edges: Vec<DroppedEdge>,
    /// Retained edges flagged as in-source fragments
    pub isf_edges: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node rows: {}", self.node_rows)?;
        writeln!(f, "Edge rows: {}", self.edge_rows)?;
        if self.unidentified_nodes > 0 {
            writeln!(f, "Nodes without id: {}", self.unidentified_nodes)?;
        }
        if self.duplicate_nodes > 0 {
            writeln!(f, "Duplicate node ids: {}", self.duplicate_nodes)?;
        }
        writeln!(f, "Dropped edges: {}", self.dropped_edges.len())?;
        write!(f, "ISF edges: {}", self.isf_edges)
    }
}

impl LoadReport {
    /// Format the report with terminal colors (requires `colorized_output` feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::style;

            let mut output = String::new();
            output.push_str(&format!("{}: {}\n", style("Node rows").bold(), self.node_rows));
            output.push_str(&format!("{}: {}\n", style("Edge rows").bold(), self.edge_rows));
            if self.unidentified_nodes > 0 {
                output.push_str(&format!(
                    "{}: {}\n",
                    style("Nodes without id").bold(),
                    style(self.unidentified_nodes).yellow()
                ));
            }
            if self.duplicate_nodes > 0 {
                output.push_str(&format!(
                    "{}: {}\n",
                    style("Duplicate node ids").bold(),
                    style(self.duplicate_nodes).yellow()
                ));
            }

            let dropped = self.dropped_edges.len();
            let dropped = if dropped > 0 {
                style(dropped).yellow()
            } else {
                style(dropped).green()
            };
            output.push_str(&format!("{}: {}\n", style("Dropped edges").bold(), dropped));
            for edge in self.dropped_edges.iter().take(10) {
                output.push_str(&format!(
                    "  - edge #{}: {} -- {}\n",
                    edge.index, edge.id1, edge.id2
                ));
            }
            if self.dropped_edges.len() > 10 {
                output.push_str(&format!("  ... and {} more\n", self.dropped_edges.len() - 10));
            }
            output.push_str(&format!(
                "{}: {}",
                style("ISF edges").bold(),
                style(self.isf_edges).cyan()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

/// Load a graph with the default configuration
pub fn load(nodes_text: &str, edges_text: &str) -> Result<Graph, LoadError> {
    load_with_report(nodes_text, edges_text, &LoaderConfig::default()).map(|(graph, _)| graph)
}

/// Load a graph and return diagnostics alongside it
pub fn load_with_report(
    nodes_text: &str,
    edges_text: &str,
    config: &LoaderConfig,
) -> Result<(Graph, LoadReport), LoadError> {
    let parser = TabularParser::new(ParseOptions {
        delimiter: config.delimiter,
        dynamic_typing: DynamicTyping::Except(TEXT_COLUMNS.iter().map(|c| c.to_string()).collect()),
    });

    let nodes_table = parser
        .parse_str(nodes_text)
        .map_err(|source| LoadError::Parse { table: NODES, source })?;
    let edges_table = parser
        .parse_str(edges_text)
        .map_err(|source| LoadError::Parse { table: EDGES, source })?;

    let (nodes, unidentified) = nodes_from_table(&nodes_table)?;
    let edges = edges_from_table(&edges_table)?;

    let (graph, mut report) = assemble(nodes, edges, config);
    let graph = graph.with_columns(
        nodes_table.headers().to_vec(),
        edges_table.headers().to_vec(),
    );
    report.node_rows = nodes_table.len();
    report.edge_rows = edges_table.len();
    report.unidentified_nodes = unidentified;

    info!(
        "Loaded graph: {} nodes, {} edges ({} dropped, {} ISF)",
        graph.node_count(),
        graph.edge_count(),
        report.dropped_edges.len(),
        report.isf_edges
    );

    Ok((graph, report))
}

/// Validate typed records into a graph.
///
/// Duplicate node ids keep the first position with the last row's data.
/// Edges with a missing endpoint are dropped and reported, never stored.
/// `isIsf` is recomputed for every retained edge.
pub fn assemble(nodes: Vec<Node>, edges: Vec<Edge>, config: &LoaderConfig) -> (Graph, LoadReport) {
    let mut report = LoadReport {
        node_rows: nodes.len(),
        edge_rows: edges.len(),
        ..Default::default()
    };

    let mut index: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
    let mut unique: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if node.id.is_empty() {
            report.unidentified_nodes += 1;
            continue;
        }
        match index.get(&node.id) {
            Some(&pos) => {
                warn!("Duplicate node id '{}', keeping the later row", node.id);
                report.duplicate_nodes += 1;
                unique[pos] = node;
            }
            None => {
                index.insert(node.id.clone(), unique.len());
                unique.push(node);
            }
        }
    }

    let mut kept = Vec::with_capacity(edges.len());
    for (i, mut edge) in edges.into_iter().enumerate() {
        let endpoints = index.get(&edge.id1).zip(index.get(&edge.id2));
        let Some((&source, &target)) = endpoints else {
            debug!("Dropping edge {} ({} -> {}): missing endpoint", i, edge.id1, edge.id2);
            report.dropped_edges.push(DroppedEdge {
                index: i,
                id1: edge.id1,
                id2: edge.id2,
            });
            continue;
        };

        edge.is_isf = config.isf.is_fragment(&unique[source], &unique[target]);
        if edge.is_isf {
            report.isf_edges += 1;
        }
        kept.push(edge);
    }

    if !report.dropped_edges.is_empty() {
        warn!(
            "Dropped {} edge(s) referencing missing nodes",
            report.dropped_edges.len()
        );
    }

    (Graph::from_validated(unique, kept), report)
}

fn require_columns(table: &Table, name: &'static str, columns: &[&str]) -> Result<(), LoadError> {
    for column in columns {
        if !table.has_column(column) {
            return Err(LoadError::MissingColumn {
                table: name,
                column: column.to_string(),
            });
        }
    }
    if table.is_empty() {
        return Err(LoadError::EmptyInput { table: name });
    }
    Ok(())
}

fn invalid(table: &'static str, record: &Record, column: &str, value: &Value) -> LoadError {
    LoadError::InvalidValue {
        table,
        line: record.line(),
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn number(table: &'static str, record: &Record, column: &str, value: &Value) -> Result<f64, LoadError> {
    value
        .as_f64()
        .ok_or_else(|| invalid(table, record, column, value))
}

fn optional_number(
    table: &'static str,
    record: &Record,
    column: &str,
    value: &Value,
) -> Result<Option<f64>, LoadError> {
    match value {
        Value::Empty => Ok(None),
        Value::Number(n) => Ok(Some(*n)),
        other => Err(invalid(table, record, column, other)),
    }
}

fn optional_bool(
    table: &'static str,
    record: &Record,
    column: &str,
    value: &Value,
) -> Result<Option<bool>, LoadError> {
    match value {
        Value::Empty => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        other => Err(invalid(table, record, column, other)),
    }
}

fn optional_text(value: &Value) -> Option<String> {
    (!value.is_empty()).then(|| value.to_canonical_string())
}

fn parse_spectrum(record: &Record, value: &Value) -> Result<Vec<Peak>, LoadError> {
    let text = match value {
        Value::Empty => return Ok(Vec::new()),
        Value::Text(text) => text,
        other => {
            return Err(LoadError::InvalidSpectrum {
                line: record.line(),
                reason: format!("expected a JSON array, found {:?}", other.to_string()),
            })
        }
    };
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    serde_json::from_str(&compact).map_err(|e| LoadError::InvalidSpectrum {
        line: record.line(),
        reason: e.to_string(),
    })
}

/// Returns the nodes and the number of rows skipped for lacking an id.
fn nodes_from_table(table: &Table) -> Result<(Vec<Node>, usize), LoadError> {
    require_columns(table, NODES, &["id", "mz", "rt"])?;

    let mut nodes = Vec::with_capacity(table.len());
    let mut unidentified = 0;

    for record in table.records() {
        let mut id = String::new();
        let mut mz = None;
        let mut rt = None;
        let mut is_prototype = None;
        let mut msms_spectrum = Vec::new();
        let mut attributes = Attributes::new();

        for (column, value) in table.fields(record) {
            match column {
                "id" => id = value.to_canonical_string(),
                "mz" => mz = Some(number(NODES, record, column, value)?),
                "rt" => rt = Some(number(NODES, record, column, value)?),
                "isPrototype" => is_prototype = optional_bool(NODES, record, column, value)?,
                "msmsSpectrum" => msms_spectrum = parse_spectrum(record, value)?,
                _ => attributes.insert(column, value.clone()),
            }
        }

        if id.is_empty() {
            unidentified += 1;
            continue;
        }

        // Both columns exist, so both were visited.
        let (Some(mz), Some(rt)) = (mz, rt) else {
            continue;
        };

        nodes.push(Node {
            id,
            mz,
            rt,
            is_prototype,
            msms_spectrum,
            attributes,
        });
    }

    Ok((nodes, unidentified))
}

fn edges_from_table(table: &Table) -> Result<Vec<Edge>, LoadError> {
    require_columns(table, EDGES, &["id1", "id2", "mzDiff", "rtDiff"])?;

    let mut edges = Vec::with_capacity(table.len());
    for record in table.records() {
        let mut edge = Edge::new(String::new(), String::new(), 0.0, 0.0);

        for (column, value) in table.fields(record) {
            match column {
                "id1" => edge.id1 = value.to_canonical_string(),
                "id2" => edge.id2 = value.to_canonical_string(),
                "mzDiff" => edge.mz_diff = number(EDGES, record, column, value)?,
                "rtDiff" => edge.rt_diff = number(EDGES, record, column, value)?,
                "matchedMzDiff" => {
                    edge.matched_mz_diff = optional_number(EDGES, record, column, value)?
                }
                "matchedFormulaChange" => edge.matched_formula_change = optional_text(value),
                "matchedDescription" => edge.matched_description = optional_text(value),
                "correlation" => edge.correlation = optional_number(EDGES, record, column, value)?,
                "modCos" => edge.mod_cos = optional_number(EDGES, record, column, value)?,
                "redundantData" => {
                    edge.redundant_data = optional_bool(EDGES, record, column, value)?
                }
                // Recomputed during assembly.
                "isIsf" => {}
                _ => edge.attributes.insert(column, value.clone()),
            }
        }

        edges.push(edge);
    }

    Ok(edges)
}
