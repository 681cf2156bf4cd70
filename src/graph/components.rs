use std::collections::{HashMap, VecDeque};

use super::{Graph, NodeId};

/// Node identifiers of one connected component, in discovery order
pub type Component = Vec<NodeId>;

/// Undirected connected components by breadth-first search.
///
/// Components appear in the order of their first node in the graph, and
/// members in BFS discovery order. Neighbours are visited in edge order, so
/// the result depends only on the graph's node and edge sequences.
pub fn components(graph: &Graph) -> Vec<Component> {
    let nodes = graph.nodes();
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for edge in graph.edges() {
        if let (Some(&a), Some(&b)) = (index.get(edge.id1.as_str()), index.get(edge.id2.as_str())) {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
    }

    let mut visited = vec![false; nodes.len()];
    let mut result = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..nodes.len() {
        if visited[start] {
            continue;
        }

        let mut component = Vec::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            component.push(nodes[current].id.clone());
            for &neighbor in &adjacency[current] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        result.push(component);
    }

    log::debug!(
        "Found {} connected component(s) over {} nodes",
        result.len(),
        nodes.len()
    );

    result
}

/// Component containing `id`, if any
pub fn component_of<'a>(components: &'a [Component], id: &str) -> Option<&'a Component> {
    components.iter().find(|c| c.iter().any(|member| member == id))
}
