use std::collections::HashMap;

use crate::graph::{Graph, NodeId};

/// Smallest visual node size
pub const BASE_SIZE: f64 = 5.0;

/// Span of visual node sizes above [`BASE_SIZE`]
pub const SIZE_SCALE: f64 = 10.0;

/// Field used for node size unless the user picks another
pub const DEFAULT_SIZE_FIELD: &str = "rt";

/// Map a numeric node field linearly onto `[BASE_SIZE, BASE_SIZE + SIZE_SCALE]`.
///
/// Nodes without a numeric value for `field` are left out of the mapping.
/// When every value is equal, all included nodes get [`BASE_SIZE`].
pub fn node_sizes(graph: &Graph, field: &str) -> HashMap<NodeId, f64> {
    let values: Vec<(&NodeId, f64)> = graph
        .nodes()
        .iter()
        .filter_map(|n| n.numeric_field(field).map(|v| (&n.id, v)))
        .collect();

    let Some(min) = values.iter().map(|(_, v)| *v).reduce(f64::min) else {
        return HashMap::new();
    };
    let max = values.iter().map(|(_, v)| *v).fold(min, f64::max);
    // Halved operands keep the span finite for any pair of finite extremes.
    let (min, range) = (min / 2.0, max / 2.0 - min / 2.0);

    values
        .into_iter()
        .map(|(id, value)| {
            let size = if range > 0.0 {
                (value / 2.0 - min) / range * SIZE_SCALE + BASE_SIZE
            } else {
                BASE_SIZE
            };
            (id.clone(), size)
        })
        .collect()
}
