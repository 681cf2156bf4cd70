#![no_main]

use libfuzzer_sys::fuzz_target;
use mznet::graph::{components, filter_to_prototype_components, load};
use mznet::tabular::{ParseOptions, TabularParser};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // The parser must reject malformed input with an error, never a panic
    let _ = TabularParser::new(ParseOptions::default()).parse_str(text);

    // Split at the first NUL into node and edge tables
    let (nodes, edges) = text.split_once('\0').unwrap_or((text, "id1,id2,mzDiff,rtDiff\n"));
    if let Ok(graph) = load(nodes, edges) {
        let ids = graph.node_ids();
        for edge in graph.edges() {
            assert!(ids.contains(edge.id1.as_str()) && ids.contains(edge.id2.as_str()));
        }
        let comps = components(&graph);
        let _ = filter_to_prototype_components(&graph, &comps);
    }
});
