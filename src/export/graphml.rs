use quick_xml::escape::escape;

use crate::graph::{Edge, Graph, Node, Peak};
use crate::tabular::Value;

/// Edge fields used only by the rendering layer, never exported
pub const TRANSIENT_EDGE_FIELDS: [&str; 2] = ["source", "target"];

/// Document prologue and attribute key declarations
pub const GRAPHML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns
         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">
  
  <!-- Node Attributes -->
  <key id="mz" for="node" attr.name="mz" attr.type="double"/>
  <key id="rt" for="node" attr.name="rt" attr.type="double"/>
  <key id="intensity" for="node" attr.name="intensity" attr.type="double"/>
  <key id="formula" for="node" attr.name="formula" attr.type="string"/>
  <key id="inchikey" for="node" attr.name="inchikey" attr.type="string"/>
  <key id="name" for="node" attr.name="name" attr.type="string"/>
  <key id="smiles" for="node" attr.name="smiles" attr.type="string"/>
  <key id="ratio" for="node" attr.name="ratio" attr.type="double"/>
  <key id="isPrototype" for="node" attr.name="isPrototype" attr.type="boolean"/>
  
  <!-- Edge Attributes -->
  <key id="mzDiff" for="edge" attr.name="mzDiff" attr.type="double"/>
  <key id="rtDiff" for="edge" attr.name="rtDiff" attr.type="double"/>
  <key id="correlation" for="edge" attr.name="correlation" attr.type="double"/>
  <key id="modCos" for="edge" attr.name="modCos" attr.type="double"/>
  <key id="matchedMzDiff" for="edge" attr.name="matchedMzDiff" attr.type="double"/>
  <key id="matchedFormulaChange" for="edge" attr.name="matchedFormulaChange" attr.type="string"/>
  <key id="matchedDescription" for="edge" attr.name="matchedDescription" attr.type="string"/>"#;

/// Serialize a graph as a GraphML document.
///
/// Output depends only on the graph, so identical graphs produce identical
/// bytes. Absent fields are omitted rather than written empty. `<data>`
/// children follow the source table's column order; fields the table did not
/// have (such as the computed `isIsf`) come after it.
pub fn to_graphml(graph: &Graph) -> String {
    let nodes: Vec<String> = graph
        .nodes()
        .iter()
        .map(|n| node_element(n, graph.node_columns()))
        .collect();
    let edges: Vec<String> = graph
        .edges()
        .iter()
        .enumerate()
        .map(|(i, e)| edge_element(i, e, graph.edge_columns()))
        .collect();

    let mut out = String::with_capacity(GRAPHML_HEADER.len() + 128 * (nodes.len() + edges.len()));
    out.push_str(GRAPHML_HEADER);
    out.push_str("\n\n  <graph id=\"G\" edgedefault=\"undirected\">\n");
    out.push_str(&nodes.join("\n"));
    out.push_str("\n\n");
    out.push_str(&edges.join("\n"));
    out.push_str("\n  </graph>\n</graphml>");
    out
}

fn data(key: &str, value: &str) -> String {
    format!("    <data key=\"{}\">{}</data>", escape(key), escape(value))
}

fn spectrum_text(peaks: &[Peak]) -> String {
    let pairs: Vec<String> = peaks
        .iter()
        .map(|(mz, intensity)| format!("[{},{}]", mz, intensity))
        .collect();
    format!("[{}]", pairs.join(","))
}

/// Typed node fields, in the order used when no source columns are known
const NODE_FIELDS: [&str; 4] = ["mz", "rt", "isPrototype", "msmsSpectrum"];

/// Typed edge fields, in the order used when no source columns are known
const EDGE_FIELDS: [&str; 9] = [
    "mzDiff",
    "rtDiff",
    "matchedMzDiff",
    "matchedFormulaChange",
    "matchedDescription",
    "correlation",
    "modCos",
    "redundantData",
    "isIsf",
];

/// Source columns first, then any remaining keys in `fallback` order.
///
/// Keys in `skip` are written as element attributes instead of `<data>`.
fn ordered_keys<'a>(
    columns: &'a [String],
    fallback: impl Iterator<Item = &'a str>,
    skip: impl Fn(&str) -> bool,
) -> Vec<&'a str> {
    let mut keys: Vec<&str> = Vec::new();
    for key in columns.iter().map(String::as_str).chain(fallback) {
        if !skip(key) && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

fn attribute_text(value: Option<&Value>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(Value::to_string)
}

fn node_field(node: &Node, key: &str) -> Option<String> {
    match key {
        "mz" => Some(node.mz.to_string()),
        "rt" => Some(node.rt.to_string()),
        "isPrototype" => node.is_prototype.map(|b| b.to_string()),
        "msmsSpectrum" => {
            (!node.msms_spectrum.is_empty()).then(|| spectrum_text(&node.msms_spectrum))
        }
        _ => attribute_text(node.attributes.get(key)),
    }
}

fn edge_field(edge: &Edge, key: &str) -> Option<String> {
    match key {
        "mzDiff" => Some(edge.mz_diff.to_string()),
        "rtDiff" => Some(edge.rt_diff.to_string()),
        "matchedMzDiff" => edge.matched_mz_diff.map(|v| v.to_string()),
        "matchedFormulaChange" => edge.matched_formula_change.clone(),
        "matchedDescription" => edge.matched_description.clone(),
        "correlation" => edge.correlation.map(|v| v.to_string()),
        "modCos" => edge.mod_cos.map(|v| v.to_string()),
        "redundantData" => edge.redundant_data.map(|b| b.to_string()),
        "isIsf" => Some(edge.is_isf.to_string()),
        _ => attribute_text(edge.attributes.get(key)),
    }
}

fn node_element(node: &Node, columns: &[String]) -> String {
    let fallback = NODE_FIELDS
        .iter()
        .copied()
        .chain(node.attributes.iter().map(|(key, _)| key));
    let fields: Vec<String> = ordered_keys(columns, fallback, |key| key == "id")
        .into_iter()
        .filter_map(|key| node_field(node, key).map(|value| data(key, &value)))
        .collect();

    format!(
        "  <node id=\"n{}\">\n{}\n  </node>",
        escape(node.id.as_str()),
        fields.join("\n")
    )
}

fn edge_element(index: usize, edge: &Edge, columns: &[String]) -> String {
    let fallback = EDGE_FIELDS
        .iter()
        .copied()
        .chain(edge.attributes.iter().map(|(key, _)| key));
    let skip = |key: &str| key == "id1" || key == "id2" || TRANSIENT_EDGE_FIELDS.contains(&key);
    let fields: Vec<String> = ordered_keys(columns, fallback, skip)
        .into_iter()
        .filter_map(|key| edge_field(edge, key).map(|value| data(key, &value)))
        .collect();

    format!(
        "  <edge id=\"e{}\" source=\"n{}\" target=\"n{}\">\n{}\n  </edge>",
        index,
        escape(edge.id1.as_str()),
        escape(edge.id2.as_str()),
        fields.join("\n")
    )
}
