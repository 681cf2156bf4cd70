//! Property tests for the derived graph views.

use proptest::prelude::*;
use std::collections::HashSet;

use mznet::encoding::{node_sizes, BASE_SIZE, SIZE_SCALE};
use mznet::export::to_graphml;
use mznet::graph::{
    assemble, components, filter_by_ion, filter_to_prototype_components, Edge, Graph, IonFilter,
    LoaderConfig, Node,
};

/// Random graph: up to 40 nodes, edges between arbitrary (possibly missing) ids
fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..40).prop_flat_map(|n| {
        let spectrum = prop::collection::vec((0.0f64..500.0, 0.0f64..100.0), 0..6);
        let nodes = prop::collection::vec((0.0f64..1000.0, 0.0f64..20.0, any::<bool>(), spectrum), n);
        let edges = prop::collection::vec((0..n + 5, 0..n + 5), 0..60);
        (nodes, edges).prop_map(|(nodes, edges)| {
            let nodes = nodes
                .into_iter()
                .enumerate()
                .map(|(i, (mz, rt, proto, spectrum))| {
                    Node::new(i.to_string(), mz, rt).prototype(proto).spectrum(spectrum)
                })
                .collect();
            let edges = edges
                .into_iter()
                .map(|(a, b)| Edge::new(a.to_string(), b.to_string(), 1.0, 0.0))
                .collect();
            assemble(nodes, edges, &LoaderConfig::default()).0
        })
    })
}

proptest! {
    /// Every retained edge references existing nodes
    #[test]
    fn test_referential_integrity(graph in arb_graph()) {
        let ids = graph.node_ids();
        for edge in graph.edges() {
            prop_assert!(ids.contains(edge.id1.as_str()));
            prop_assert!(ids.contains(edge.id2.as_str()));
        }
    }

    /// Components partition the node set
    #[test]
    fn test_components_partition_nodes(graph in arb_graph()) {
        let components = components(&graph);
        let mut seen = HashSet::new();
        for component in &components {
            prop_assert!(!component.is_empty());
            for id in component {
                prop_assert!(seen.insert(id.clone()), "node {} in two components", id);
            }
        }
        prop_assert_eq!(seen.len(), graph.node_count());

        // Edges never cross components
        for edge in graph.edges() {
            let holder = components.iter().position(|c| c.contains(&edge.id1));
            prop_assert_eq!(holder, components.iter().position(|c| c.contains(&edge.id2)));
        }
    }

    /// A node survives the prototype filter iff its component has a prototype
    #[test]
    fn test_prototype_filter_monotonic(graph in arb_graph()) {
        let components = components(&graph);
        let filtered = filter_to_prototype_components(&graph, &components);
        let kept = filtered.node_ids();

        prop_assert!(kept.is_subset(&graph.node_ids()));
        for component in &components {
            let has_prototype = component
                .iter()
                .any(|id| graph.node(id).map_or(false, |n| n.is_prototype()));
            for id in component {
                prop_assert_eq!(kept.contains(id.as_str()), has_prototype);
            }
        }
        for edge in filtered.edges() {
            prop_assert!(kept.contains(edge.id1.as_str()) && kept.contains(edge.id2.as_str()));
        }
    }

    /// Sizes stay within [BASE_SIZE, BASE_SIZE + SIZE_SCALE]
    #[test]
    fn test_sizes_bounded(graph in arb_graph()) {
        for field in ["mz", "rt"] {
            let sizes = node_sizes(&graph, field);
            prop_assert_eq!(sizes.len(), graph.node_count());
            for size in sizes.values() {
                prop_assert!(*size >= BASE_SIZE && *size <= BASE_SIZE + SIZE_SCALE);
            }
        }
    }

    /// Sizes stay bounded even when field values span the whole f64 range
    #[test]
    fn test_sizes_bounded_for_extreme_values(
        values in prop::collection::vec(prop::num::f64::NORMAL | prop::num::f64::ZERO, 1..20)
    ) {
        let nodes = values
            .iter()
            .enumerate()
            .map(|(i, mz)| Node::new(i.to_string(), *mz, 0.0))
            .collect();
        let graph = assemble(nodes, Vec::new(), &LoaderConfig::default()).0;

        let sizes = node_sizes(&graph, "mz");
        prop_assert_eq!(sizes.len(), values.len());
        for size in sizes.values() {
            prop_assert!(*size >= BASE_SIZE && *size <= BASE_SIZE + SIZE_SCALE, "size {}", size);
        }
    }

    /// The ion filter only removes nodes, and only keeps edges between survivors
    #[test]
    fn test_ion_filter_subset(graph in arb_graph(), mz in 0.0f64..500.0, pct in 0.0f64..=100.0) {
        let filter = IonFilter::new(mz).with_tolerance(5.0).with_intensity_percentile(pct);
        let filtered = filter_by_ion(&graph, &filter);
        let kept = filtered.node_ids();

        prop_assert!(kept.is_subset(&graph.node_ids()));
        for node in filtered.nodes() {
            prop_assert!(filter.matches(node));
        }
        for edge in filtered.edges() {
            prop_assert!(kept.contains(edge.id1.as_str()) && kept.contains(edge.id2.as_str()));
        }
    }

    /// GraphML output is a pure function of the graph
    #[test]
    fn test_graphml_deterministic(graph in arb_graph()) {
        prop_assert_eq!(to_graphml(&graph), to_graphml(&graph.clone()));
    }
}
