//! # mznet - Molecular Network Graph Pipeline
//!
//! `mznet` turns the node and edge tables produced by an untargeted
//! metabolomics analysis into a validated molecular network and derives the
//! views a visualization layer needs.
//!
//! ## Pipeline
//!
//! ```text
//! nodes.csv ─┐
//!            ├─ tabular ─ graph::load ─┬─ graph::components ─ filter_to_prototype_components ─┐
//! edges.csv ─┘                          └─ graph::filter_by_ion ───────────────────────────────┤
//!                                                                                               ├─ export (GraphML / JSON)
//!                                       encoding::node_sizes / ratio_colors ── rendering hints ─┘
//! ```
//!
//! - **Tabular parsing** with explicit, testable type coercion
//! - **Referential integrity**: edges pointing at unknown nodes are dropped
//!   and reported, never stored
//! - **Derived views** are new immutable graphs; nothing is mutated in place
//! - **Deterministic export**: the same graph always serializes to the same
//!   bytes
//!
//! ## Quick Start
//!
//! ```rust
//! use mznet::prelude::*;
//!
//! let nodes = "id,mz,rt,isPrototype\n1,100.0,1.0,true\n2,118.0,1.5,false\n3,250.0,4.0,false\n";
//! let edges = "id1,id2,mzDiff,rtDiff\n1,2,18.0,0.5\n1,99,5.0,0.0\n";
//!
//! let graph = load(nodes, edges)?;
//! assert_eq!(graph.edge_count(), 1);
//!
//! let view = filter_to_prototype_components(&graph, &components(&graph));
//! assert_eq!(view.node_count(), 2);
//!
//! let sizes = node_sizes(&view, "mz");
//! assert_eq!(sizes["1"], 5.0);
//! assert_eq!(sizes["2"], 15.0);
//!
//! let xml = to_graphml(&view);
//! assert!(xml.contains("<node id=\"n1\">"));
//! # Ok::<(), mznet::graph::LoadError>(())
//! ```
//!
//! ## Modules
//!
//! - [`tabular`]: delimited-text parsing and cell coercion
//! - [`graph`]: graph model, loader, components, prototype and ion filters
//! - [`encoding`]: node size and ratio color mappings
//! - [`export`]: GraphML and JSON serializers
//! - [`reactions`]: m/z difference to enzyme/pathway lookup
//! - [`view`]: which derived graph is on screen

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod encoding;
pub mod export;
pub mod graph;
pub mod reactions;
pub mod tabular;
pub mod view;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::encoding::{
        node_sizes, ratio_colors, ratio_slices, AnalysisConfig, ColorScheme, RatioColor,
        RatioSlice,
    };
    pub use crate::export::{render, to_graphml, to_json_pretty, write_file, ExportError, ExportFormat};
    pub use crate::graph::{
        component_of, components, filter_by_ion, filter_to_prototype_components, load,
        load_with_report, Component, Edge, Graph, IonFilter, LoadError, LoadReport, LoaderConfig,
        Node, NodeId,
    };
    pub use crate::reactions::{ReactionError, ReactionIndex, ReactionMatch};
    pub use crate::tabular::{ParseError, ParseOptions, Table, TabularParser, Value};
    pub use crate::view::{AnalysisView, DisplayState, LoadTicket};
}
