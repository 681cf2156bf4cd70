use super::*;
use crate::tabular::Value;

const NODES: &str = "id,mz,rt,isPrototype,msmsSpectrum,S1_ratio
1,100.05,1.00,true,\"[[50.0, 10], [100.05, 5]]\",0.4
2,180.06,1.01,false,\"[[100.05, 80], [162.05, 20]]\",0.6
3,250.10,4.50,,,
4,300.00,7.20,false,[],0.1";

const EDGES: &str = "id1,id2,mzDiff,rtDiff,matchedFormulaChange,correlation,redundantData,isIsf,source
1,2,80.01,0.01,C3H4O2,0.91,false,false,ms2
2,3,70.04,3.49,-2,,true,true,
1,99,5.0,0.0,,,,,
3,4,49.9,2.7,H2O,0.5,,,";

fn sample() -> (Graph, LoadReport) {
    load_with_report(NODES, EDGES, &LoaderConfig::default()).unwrap()
}

#[test]
fn test_referential_integrity() {
    let nodes = "id\tmz\trt\n1\t100\t1\n2\t200\t2\n";
    let edges = "id1\tid2\tmzDiff\trtDiff\n1\t2\t100\t1\n1\t99\t1\t1\n";
    let graph = load(nodes, edges).unwrap();

    assert_eq!(graph.edge_count(), 1);
    let ids = graph.node_ids();
    for edge in graph.edges() {
        assert!(ids.contains(edge.id1.as_str()));
        assert!(ids.contains(edge.id2.as_str()));
    }
}

#[test]
fn test_load_typed_fields() {
    let (graph, report) = sample();

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(report.node_rows, 4);
    assert_eq!(report.edge_rows, 4);
    assert_eq!(report.dropped_edges.len(), 1);
    assert_eq!(report.dropped_edges[0].index, 2);
    assert_eq!(report.dropped_edges[0].id2, "99");

    let n1 = graph.node("1").unwrap();
    assert_eq!(n1.mz, 100.05);
    assert!(n1.is_prototype());
    assert_eq!(n1.msms_spectrum, vec![(50.0, 10.0), (100.05, 5.0)]);
    assert_eq!(n1.attributes.get("S1_ratio"), Some(&Value::Number(0.4)));

    let n3 = graph.node("3").unwrap();
    assert_eq!(n3.is_prototype, None);
    assert!(!n3.is_prototype());
    assert!(n3.msms_spectrum.is_empty());
    assert!(n3.attributes.is_empty());

    let e = &graph.edges()[0];
    assert_eq!(e.matched_formula_change.as_deref(), Some("C3H4O2"));
    assert_eq!(e.correlation, Some(0.91));
    assert_eq!(e.redundant_data, Some(false));
    assert_eq!(e.attributes.get("source"), Some(&Value::Text("ms2".into())));

    // Formula changes keep their literal text
    assert_eq!(graph.edges()[1].matched_formula_change.as_deref(), Some("-2"));
    assert_eq!(graph.edges()[1].correlation, None);
}

#[test]
fn test_numeric_ids_canonicalised() {
    let nodes = "id,mz,rt\n12,100,1\n7.0,200,2\n";
    let edges = "id1,id2,mzDiff,rtDiff\n12.0,7,100,1\n";
    let graph = load(nodes, edges).unwrap();

    assert_eq!(graph.nodes()[0].id, "12");
    assert_eq!(graph.nodes()[1].id, "7");
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges()[0].id1, "12");
}

#[test]
fn test_large_integer_ids_stay_distinct() {
    let nodes = "id,mz,rt\n9007199254740993,100,1\n9007199254740992,200,2\n";
    let edges = "id1,id2,mzDiff,rtDiff\n9007199254740993,9007199254740992,100,1\n";
    let (graph, report) = load_with_report(nodes, edges, &LoaderConfig::default()).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(report.duplicate_nodes, 0);
    assert_eq!(graph.nodes()[0].id, "9007199254740993");
    assert_eq!(graph.nodes()[1].id, "9007199254740992");

    let edge = &graph.edges()[0];
    assert_eq!(edge.id1, "9007199254740993");
    assert_eq!(edge.id2, "9007199254740992");
}

#[test]
fn test_isf_detection() {
    let (graph, report) = sample();

    // Node 1 (m/z 100.05) co-elutes with node 2 and appears in its spectrum.
    assert!(graph.edges()[0].is_isf);
    // The input column is ignored: 2 -> 3 does not co-elute.
    assert!(!graph.edges()[1].is_isf);
    assert!(!graph.edges()[2].is_isf);
    assert_eq!(report.isf_edges, 1);
}

#[test]
fn test_isf_criteria_direction() {
    let criteria = IsfCriteria::default();
    let fragment = Node::new("f", 100.0, 1.0);
    let parent = Node::new("p", 150.0, 1.01).spectrum(vec![(100.005, 1.0)]);

    assert!(criteria.is_fragment(&fragment, &parent));
    assert!(!criteria.is_fragment(&parent, &fragment));

    let late = Node::new("p", 150.0, 1.5).spectrum(vec![(100.0, 1.0)]);
    assert!(!criteria.is_fragment(&fragment, &late));
}

#[test]
fn test_missing_id_column() {
    let err = load("name,mz,rt\na,1,2\n", "id1,id2,mzDiff,rtDiff\n1,2,3,4\n").unwrap_err();
    match err {
        LoadError::MissingColumn { table, column } => {
            assert_eq!(table, "nodes");
            assert_eq!(column, "id");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_edge_column() {
    let err = load("id,mz,rt\n1,1,2\n", "id1,id2,mzDiff\n1,2,3\n").unwrap_err();
    assert!(matches!(
        err,
        LoadError::MissingColumn { table: "edges", ref column } if column == "rtDiff"
    ));
}

#[test]
fn test_empty_input() {
    let err = load("id,mz,rt\n", "id1,id2,mzDiff,rtDiff\n1,2,3,4\n").unwrap_err();
    assert!(matches!(err, LoadError::EmptyInput { table: "nodes" }));

    let err = load("id,mz,rt\n1,1,1\n", "id1,id2,mzDiff,rtDiff\n").unwrap_err();
    assert!(matches!(err, LoadError::EmptyInput { table: "edges" }));
}

#[test]
fn test_parse_error_propagates_line() {
    let err = load("id,mz,rt\n1,1,1\n2,2\n", "id1,id2,mzDiff,rtDiff\n1,2,3,4\n").unwrap_err();
    assert!(matches!(err, LoadError::Parse { table: "nodes", .. }));
    assert_eq!(err.line(), Some(3));
}

#[test]
fn test_invalid_numeric_value() {
    let err = load("id,mz,rt\n1,abc,1\n", "id1,id2,mzDiff,rtDiff\n1,1,3,4\n").unwrap_err();
    match err {
        LoadError::InvalidValue {
            line, column, value, ..
        } => {
            assert_eq!(line, 2);
            assert_eq!(column, "mz");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_spectrum() {
    let err = load(
        "id,mz,rt,msmsSpectrum\n1,1,1,\"[[1,2],\"\n",
        "id1,id2,mzDiff,rtDiff\n1,1,3,4\n",
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::InvalidSpectrum { line: 2, .. }));
}

#[test]
fn test_duplicate_and_unidentified_nodes() {
    let nodes = "id,mz,rt\n1,100,1\n,150,1\n2,200,2\n1,111,1\n";
    let edges = "id1,id2,mzDiff,rtDiff\n1,2,100,1\n";
    let (graph, report) = load_with_report(nodes, edges, &LoaderConfig::default()).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.nodes()[0].id, "1");
    assert_eq!(graph.nodes()[0].mz, 111.0);
    assert_eq!(report.duplicate_nodes, 1);
    assert_eq!(report.unidentified_nodes, 1);
}

#[test]
fn test_components_cover_every_node() {
    let (graph, _) = sample();
    let comps = components(&graph);

    assert_eq!(comps, vec![vec!["1".to_string(), "2".into(), "3".into(), "4".into()]]);
}

#[test]
fn test_components_bfs_order() {
    let nodes = "id,mz,rt\na,1,1\nb,2,2\nc,3,3\nd,4,4\ne,5,5\nf,6,6\n";
    let edges = "id1,id2,mzDiff,rtDiff\nd,a,1,1\na,b,1,1\nb,e,1,1\nc,f,1,1\n";
    let graph = load(nodes, edges).unwrap();

    let comps = components(&graph);
    assert_eq!(
        comps,
        vec![
            vec!["a".to_string(), "d".into(), "b".into(), "e".into()],
            vec!["c".to_string(), "f".into()],
        ]
    );
    assert_eq!(components(&graph), comps);

    assert_eq!(component_of(&comps, "f"), Some(&comps[1]));
    assert_eq!(component_of(&comps, "zz"), None);
}

#[test]
fn test_singleton_components() {
    let graph = load("id,mz,rt\n1,1,1\n2,2,2\n3,3,3\n", "id1,id2,mzDiff,rtDiff\n1,3,1,1\n").unwrap();
    let comps = components(&graph);
    assert_eq!(comps.len(), 2);
    assert_eq!(comps[1], vec!["2".to_string()]);
}

#[test]
fn test_prototype_filter() {
    let nodes = "id,mz,rt,isPrototype\n1,100,1,true\n2,200,2,\n3,300,3,\n";
    let edges = "id1,id2,mzDiff,rtDiff\n1,2,100,1\n";
    let graph = load(nodes, edges).unwrap();

    let filtered = filter_to_prototype_components(&graph, &components(&graph));
    let ids: Vec<&str> = filtered.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(filtered.edge_count(), 1);
    assert_eq!(filtered.edges()[0].id1, "1");
    assert_eq!(filtered.edges()[0].id2, "2");
}

#[test]
fn test_prototype_filter_preserves_graph_order() {
    let nodes = "id,mz,rt,isPrototype\n1,1,1,\n2,2,2,\n3,3,3,true\n4,4,4,\n";
    let edges = "id1,id2,mzDiff,rtDiff\n3,1,1,1\n2,4,1,1\n";
    let graph = load(nodes, edges).unwrap();

    let filtered = filter_to_prototype_components(&graph, &components(&graph));
    let ids: Vec<&str> = filtered.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(filtered.edge_count(), 1);
}

#[test]
fn test_prototype_filter_without_prototypes_is_empty() {
    let graph = load("id,mz,rt\n1,1,1\n2,2,2\n", "id1,id2,mzDiff,rtDiff\n1,2,1,1\n").unwrap();
    let filtered = filter_to_prototype_components(&graph, &components(&graph));
    assert!(filtered.is_empty());
    assert_eq!(filtered.edge_count(), 0);
}

#[test]
fn test_ion_filter_top_percentile() {
    let node = Node::new("1", 300.0, 1.0).spectrum(vec![(100.0, 10.0), (200.0, 90.0)]);
    let graph = assemble(vec![node], Vec::new(), &LoaderConfig::default()).0;

    let keep = IonFilter::new(200.0)
        .with_tolerance(0.5)
        .with_intensity_percentile(50.0);
    assert_eq!(filter_by_ion(&graph, &keep).node_count(), 1);

    let drop = IonFilter::new(100.0)
        .with_tolerance(0.5)
        .with_intensity_percentile(50.0);
    assert!(filter_by_ion(&graph, &drop).is_empty());

    let all = drop.with_intensity_percentile(100.0);
    assert_eq!(filter_by_ion(&graph, &all).node_count(), 1);
}

#[test]
fn test_ion_filter_edges_and_original_untouched() {
    let (graph, _) = sample();
    let filter = IonFilter::new(100.05).with_tolerance(0.01);

    let filtered = filter_by_ion(&graph, &filter);
    let ids: Vec<&str> = filtered.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(filtered.edge_count(), 1);

    // Source spectra keep their original order
    assert_eq!(graph.node("1").unwrap().msms_spectrum[0], (50.0, 10.0));
}

#[test]
fn test_ion_filter_top_count() {
    let filter = IonFilter::new(1.0).with_intensity_percentile(50.0);
    assert_eq!(filter.top_count(0), 0);
    assert_eq!(filter.top_count(1), 1);
    assert_eq!(filter.top_count(3), 2);
    assert_eq!(filter.with_intensity_percentile(0.0).top_count(5), 0);
    assert_eq!(filter.with_intensity_percentile(250.0).top_count(5), 5);
}
