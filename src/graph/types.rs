use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

use crate::tabular::Value;

/// Node identifier in canonical string form
pub type NodeId = String;

/// MS/MS fragmentation peak as `(mz, intensity)`
pub type Peak = (f64, f64);

/// Opaque pass-through attributes, kept in source column order.
///
/// Empty values are never stored, so every entry is a present field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, Value)>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute. Empty values are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up an attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A detected ion in the molecular network
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique, non-empty identifier
    pub id: NodeId,
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Retention time
    pub rt: f64,
    /// Anchor/reference compound flag (absent in the source means `false`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_prototype: Option<bool>,
    /// Fragmentation spectrum
    pub msms_spectrum: Vec<Peak>,
    /// Ratio columns and any other pass-through fields
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Node {
    /// Create a node with no spectrum and no extra fields
    pub fn new(id: impl Into<NodeId>, mz: f64, rt: f64) -> Self {
        Self {
            id: id.into(),
            mz,
            rt,
            is_prototype: None,
            msms_spectrum: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Set the prototype flag
    pub fn prototype(mut self, is_prototype: bool) -> Self {
        self.is_prototype = Some(is_prototype);
        self
    }

    /// Set the MS/MS spectrum
    pub fn spectrum(mut self, peaks: Vec<Peak>) -> Self {
        self.msms_spectrum = peaks;
        self
    }

    /// Add a pass-through attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Effective prototype flag
    pub fn is_prototype(&self) -> bool {
        self.is_prototype.unwrap_or(false)
    }

    /// Numeric value of a named field (`mz`, `rt` or a numeric attribute).
    ///
    /// Returns `None` for missing, non-numeric and NaN values.
    pub fn numeric_field(&self, name: &str) -> Option<f64> {
        let value = match name {
            "mz" => Some(self.mz),
            "rt" => Some(self.rt),
            _ => self.attributes.get(name).and_then(Value::as_f64),
        };
        value.filter(|v| !v.is_nan())
    }
}

/// A relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// First endpoint
    pub id1: NodeId,
    /// Second endpoint
    pub id2: NodeId,
    /// m/z difference between endpoints
    pub mz_diff: f64,
    /// Retention-time difference between endpoints
    pub rt_diff: f64,
    /// m/z difference of the matched reaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_mz_diff: Option<f64>,
    /// Formula change of the matched reaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_formula_change: Option<String>,
    /// Description of the matched reaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_description: Option<String>,
    /// Sample intensity correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<f64>,
    /// Modified cosine similarity of the MS/MS spectra
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_cos: Option<f64>,
    /// Edge duplicates information captured elsewhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redundant_data: Option<bool>,
    /// In-source fragment relationship, computed at load time
    pub is_isf: bool,
    /// Pass-through fields
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Edge {
    /// Create an edge with only the required fields
    pub fn new(id1: impl Into<NodeId>, id2: impl Into<NodeId>, mz_diff: f64, rt_diff: f64) -> Self {
        Self {
            id1: id1.into(),
            id2: id2.into(),
            mz_diff,
            rt_diff,
            matched_mz_diff: None,
            matched_formula_change: None,
            matched_description: None,
            correlation: None,
            mod_cos: None,
            redundant_data: None,
            is_isf: false,
            attributes: Attributes::new(),
        }
    }

    /// Set the matched reaction fields
    pub fn matched(
        mut self,
        mz_diff: f64,
        formula_change: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.matched_mz_diff = Some(mz_diff);
        self.matched_formula_change = Some(formula_change.into());
        self.matched_description = Some(description.into());
        self
    }

    /// Set the similarity fields
    pub fn similarity(mut self, correlation: f64, mod_cos: f64) -> Self {
        self.correlation = Some(correlation);
        self.mod_cos = Some(mod_cos);
        self
    }

    /// Set the redundancy flag
    pub fn redundant(mut self, redundant: bool) -> Self {
        self.redundant_data = Some(redundant);
        self
    }

    /// Add a pass-through attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

/// Validated molecular network.
///
/// Every edge endpoint exists in the node set. Graphs are never mutated;
/// derived views produce new values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    // Header order of the source tables; empty for graphs built in code.
    #[serde(skip)]
    node_columns: Vec<String>,
    #[serde(skip)]
    edge_columns: Vec<String>,
}

impl Graph {
    /// Graph with no nodes and no edges
    pub fn empty() -> Self {
        Self::default()
    }

    /// Caller guarantees referential integrity.
    pub(crate) fn from_validated(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        debug_assert!({
            let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
            edges
                .iter()
                .all(|e| ids.contains(e.id1.as_str()) && ids.contains(e.id2.as_str()))
        });
        Self {
            nodes,
            edges,
            ..Self::default()
        }
    }

    /// Record the source tables' column order
    pub(crate) fn with_columns(mut self, node_columns: Vec<String>, edge_columns: Vec<String>) -> Self {
        self.node_columns = node_columns;
        self.edge_columns = edge_columns;
        self
    }

    /// Node table columns in header order (empty when not loaded from a table)
    pub fn node_columns(&self) -> &[String] {
        &self.node_columns
    }

    /// Edge table columns in header order (empty when not loaded from a table)
    pub fn edge_columns(&self) -> &[String] {
        &self.edge_columns
    }

    /// Nodes in load order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in load order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no nodes ("no data to display")
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by identifier
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Set of node identifiers
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Subgraph induced by `keep`, preserving node and edge order
    pub(crate) fn induced(&self, keep: &HashSet<&str>) -> Graph {
        let nodes = self
            .nodes
            .iter()
            .filter(|n| keep.contains(n.id.as_str()))
            .cloned()
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| keep.contains(e.id1.as_str()) && keep.contains(e.id2.as_str()))
            .cloned()
            .collect();
        Graph {
            nodes,
            edges,
            node_columns: self.node_columns.clone(),
            edge_columns: self.edge_columns.clone(),
        }
    }
}
