use crate::graph::edge::EdgeId;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::routing::path::Path;
use log::{debug, warn};
use petgraph::algo::all_simple_paths;
use petgraph::graph::{DiGraph, NodeIndex};

/// Directed view of `graph` whose node indices match `NodeId`s.
fn network(graph: &Graph) -> DiGraph<NodeId, EdgeId> {
    let mut network = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    graph.nodes().iter().for_each(|n| {
        network.add_node(n.id());
    });
    // petgraph walks a node's edges newest first
    graph.edges().iter().rev().for_each(|e| {
        network.add_edge(NodeIndex::new(e.from().index()), NodeIndex::new(e.to().index()), e.id());
    });
    network
}

fn to_path(network: &DiGraph<NodeId, EdgeId>, indices: Vec<NodeIndex>) -> Path {
    let edges = indices
        .windows(2)
        .filter_map(|pair| network.find_edge(pair[0], pair[1]))
        .map(|e| network[e])
        .collect();
    let nodes = indices.into_iter().map(|i| network[i]).collect();
    Path::new(nodes, edges)
}

/// Every simple directed path from `source` to `sink`, depth first in edge declaration order.
///
/// The number of simple paths can grow exponentially with graph size. With
/// `limit` set, enumeration stops after that many paths and the social
/// optimum is then computed over this subset only, which can overestimate
/// the true optimum.
pub fn enumerate_simple_paths(
    graph: &Graph,
    source: NodeId,
    sink: NodeId,
    limit: Option<usize>,
) -> Vec<Path> {
    if source == sink {
        return vec![Path::new(vec![source], Vec::new())];
    }
    let network = network(graph);
    let mut found = all_simple_paths::<Vec<NodeIndex>, _>(
        &network,
        NodeIndex::new(source.index()),
        NodeIndex::new(sink.index()),
        0,
        None,
    )
    .take(limit.map_or(usize::MAX, |l| l.saturating_add(1)))
    .map(|indices| to_path(&network, indices))
    .collect::<Vec<Path>>();

    if let Some(limit) = limit.filter(|l| found.len() > *l) {
        found.truncate(limit);
        warn!(
            "path enumeration stopped at the cap of {} paths; the social optimum is approximate",
            limit
        );
    }
    debug!("enumerated {} simple paths", found.len());
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::graph::GraphBuilder;
    use crate::scenario::{braess, random_layered};
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn test_braess_has_three_paths() {
        let graph = braess();
        let a = graph.node_by_name("A").unwrap();
        let d = graph.node_by_name("D").unwrap();

        let paths = enumerate_simple_paths(&graph, a, d, None);
        let described = paths
            .iter()
            .map(|p| p.describe(&graph))
            .collect::<HashSet<String>>();

        assert_eq!(3, paths.len());
        assert!(described.contains("A -> B -> D"));
        assert!(described.contains("A -> C -> D"));
        assert!(described.contains("A -> B -> C -> D"));
    }

    #[test]
    fn test_cycles_are_not_followed() {
        let mut builder = GraphBuilder::new();
        builder.add_edge("S", "A", 1.0, 0.0).unwrap();
        builder.add_edge("A", "S", 1.0, 0.0).unwrap();
        builder.add_edge("A", "B", 1.0, 0.0).unwrap();
        builder.add_edge("B", "A", 1.0, 0.0).unwrap();
        builder.add_edge("B", "T", 1.0, 0.0).unwrap();
        let graph = builder.build();

        let paths = enumerate_simple_paths(&graph, NodeId(0), NodeId(3), None);
        assert_eq!(1, paths.len());
        assert_eq!("S -> A -> B -> T", paths[0].describe(&graph));
    }

    #[test]
    fn test_no_path_yields_empty() {
        let mut builder = GraphBuilder::new();
        builder.add_edge("S", "A", 1.0, 0.0).unwrap();
        builder.add_edge("T", "A", 1.0, 0.0).unwrap();
        let graph = builder.build();

        assert!(enumerate_simple_paths(&graph, NodeId(0), NodeId(2), None).is_empty());
    }

    #[test]
    fn test_paths_follow_edge_declaration_order() {
        let graph = braess();
        let a = graph.node_by_name("A").unwrap();
        let d = graph.node_by_name("D").unwrap();

        let described = enumerate_simple_paths(&graph, a, d, None)
            .iter()
            .map(|p| p.describe(&graph))
            .collect::<Vec<String>>();
        assert_eq!(
            vec!["A -> B -> D", "A -> B -> C -> D", "A -> C -> D"],
            described
        );
    }

    #[test]
    fn test_source_is_sink() {
        let graph = braess();
        let a = graph.node_by_name("A").unwrap();

        let paths = enumerate_simple_paths(&graph, a, a, None);
        assert_eq!(1, paths.len());
        assert!(paths[0].edges().is_empty());
    }

    #[test]
    fn test_limit_caps_enumeration() {
        let graph = braess();
        let a = graph.node_by_name("A").unwrap();
        let d = graph.node_by_name("D").unwrap();

        assert_eq!(2, enumerate_simple_paths(&graph, a, d, Some(2)).len());
        assert_eq!(3, enumerate_simple_paths(&graph, a, d, Some(3)).len());
        assert_eq!(3, enumerate_simple_paths(&graph, a, d, Some(10)).len());
    }

    #[test]
    fn test_paths_are_unique_and_simple() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let (graph, source, sink) = random_layered(&mut rng, 4, 3);
            let paths = enumerate_simple_paths(&graph, source, sink, None);
            let unique = paths
                .iter()
                .map(|p| p.edges().to_vec())
                .collect::<HashSet<Vec<EdgeId>>>();
            assert_eq!(paths.len(), unique.len());
            for path in &paths {
                let nodes = path.nodes().iter().collect::<HashSet<&NodeId>>();
                assert_eq!(path.nodes().len(), nodes.len());
                assert_eq!(Some(&source), path.nodes().first());
                assert_eq!(Some(&sink), path.nodes().last());
            }
        }
    }
}
