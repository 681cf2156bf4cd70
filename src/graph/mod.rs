//! # Graph Assembly
//!
//! Turns the analysis service's node and edge tables into a validated
//! [`Graph`] and derives views from it:
//!
//! - [`load`] / [`load_with_report`]: parse, canonicalise identifiers, drop
//!   edges whose endpoints are missing, flag in-source fragments
//! - [`components`]: undirected connected components (BFS)
//! - [`filter_to_prototype_components`]: hide components without a prototype
//! - [`filter_by_ion`]: keep nodes whose top MS/MS peaks carry a fragment ion
//!
//! Every derived view is a new `Graph`; nothing is mutated in place.
//!
//! ```rust
//! use mznet::graph::{components, filter_to_prototype_components, load};
//!
//! let nodes = "id,mz,rt,isPrototype\n1,100,1,true\n2,118,1.5,false\n3,200,3,false\n";
//! let edges = "id1,id2,mzDiff,rtDiff\n1,2,18,0.5\n1,99,5,0\n";
//!
//! let graph = load(nodes, edges)?;
//! assert_eq!(graph.edge_count(), 1);
//!
//! let view = filter_to_prototype_components(&graph, &components(&graph));
//! assert_eq!(view.node_count(), 2);
//! # Ok::<(), mznet::graph::LoadError>(())
//! ```

mod components;
mod error;
mod filter;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use components::{component_of, components, Component};
pub use error::LoadError;
pub use filter::{filter_by_ion, filter_to_prototype_components, IonFilter};
pub use loader::{
    assemble, load, load_with_report, DroppedEdge, IsfCriteria, LoadReport, LoaderConfig,
    TEXT_COLUMNS,
};
pub use types::{Attributes, Edge, Graph, Node, NodeId, Peak};
