use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Component, Graph, Node};

/// Keep only components that contain at least one prototype node.
///
/// Output preserves the original node and edge order. When no component has
/// a prototype the result is the empty graph.
pub fn filter_to_prototype_components(graph: &Graph, components: &[Component]) -> Graph {
    let prototypes: HashSet<&str> = graph
        .nodes()
        .iter()
        .filter(|n| n.is_prototype())
        .map(|n| n.id.as_str())
        .collect();

    let keep: HashSet<&str> = components
        .iter()
        .filter(|c| c.iter().any(|id| prototypes.contains(id.as_str())))
        .flat_map(|c| c.iter().map(String::as_str))
        .collect();

    let filtered = graph.induced(&keep);
    log::debug!(
        "Prototype filter kept {}/{} nodes, {}/{} edges",
        filtered.node_count(),
        graph.node_count(),
        filtered.edge_count(),
        graph.edge_count()
    );
    filtered
}

/// Fragment-ion filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IonFilter {
    /// Target fragment m/z
    pub mz: f64,
    /// Allowed absolute m/z deviation
    pub tolerance: f64,
    /// Share of the most intense peaks to search, in percent
    pub intensity_percentile: f64,
}

impl IonFilter {
    /// Default m/z tolerance
    pub const DEFAULT_TOLERANCE: f64 = 0.01;
    /// Default intensity percentile (all peaks)
    pub const DEFAULT_INTENSITY_PERCENTILE: f64 = 100.0;

    /// Filter for `mz` with default tolerance and percentile
    pub fn new(mz: f64) -> Self {
        Self {
            mz,
            tolerance: Self::DEFAULT_TOLERANCE,
            intensity_percentile: Self::DEFAULT_INTENSITY_PERCENTILE,
        }
    }

    /// Set the m/z tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the intensity percentile
    pub fn with_intensity_percentile(mut self, percentile: f64) -> Self {
        self.intensity_percentile = percentile;
        self
    }

    /// Number of top-intensity peaks searched for a spectrum of `len` peaks
    pub fn top_count(&self, len: usize) -> usize {
        let count = (len as f64 * (self.intensity_percentile / 100.0)).ceil();
        if count <= 0.0 || count.is_nan() {
            0
        } else {
            (count as usize).min(len)
        }
    }

    /// True when one of the node's most intense peaks lies within tolerance
    pub fn matches(&self, node: &Node) -> bool {
        let mut peaks = node.msms_spectrum.clone();
        peaks.sort_by(|a, b| b.1.total_cmp(&a.1));
        peaks
            .iter()
            .take(self.top_count(peaks.len()))
            .any(|(mz, _)| (mz - self.mz).abs() <= self.tolerance)
    }
}

/// Nodes whose spectrum carries the fragment ion, plus the edges between them
pub fn filter_by_ion(graph: &Graph, filter: &IonFilter) -> Graph {
    let keep: HashSet<&str> = graph
        .nodes()
        .iter()
        .filter(|n| filter.matches(n))
        .map(|n| n.id.as_str())
        .collect();

    let filtered = graph.induced(&keep);
    log::info!(
        "Ion filter m/z {} ± {} (top {}%) kept {} node(s)",
        filter.mz,
        filter.tolerance,
        filter.intensity_percentile,
        filtered.node_count()
    );
    filtered
}
