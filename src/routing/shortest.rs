//! Shortest path search over flow-dependent edge weights.
//!
//! Successors are expanded in ascending node order, so among several
//! equal-cost shortest paths the first one found wins and repeated runs on
//! the same input pick the same route.

use crate::graph::edge::EdgeId;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::routing::path::Path;
use ordered_float::OrderedFloat;
use pathfinding::prelude::dijkstra;

fn successors<W>(graph: &Graph, node: NodeId, weight: &W) -> Vec<(NodeId, OrderedFloat<f64>)>
where
    W: Fn(EdgeId) -> f64,
{
    let mut next = graph
        .outgoing(node)
        .iter()
        .map(|id| (graph.edge_by_id(*id).to(), OrderedFloat(weight(*id))))
        .collect::<Vec<(NodeId, OrderedFloat<f64>)>>();
    next.sort_by_key(|(to, _)| *to);
    next
}

/// Cheapest path from `source` to `sink` under `weight`, or `None` when the sink is unreachable.
pub fn shortest_path<W>(graph: &Graph, source: NodeId, sink: NodeId, weight: W) -> Option<Path>
where
    W: Fn(EdgeId) -> f64,
{
    let (nodes, _) = dijkstra(
        &source,
        |&node| successors(graph, node, &weight),
        |&node| node == sink,
    )?;

    // at most one edge per ordered node pair
    let edges = nodes
        .windows(2)
        .map(|pair| {
            graph
                .outgoing(pair[0])
                .iter()
                .copied()
                .find(|id| graph.edge_by_id(*id).to() == pair[1])
        })
        .collect::<Option<Vec<EdgeId>>>()?;
    Some(Path::new(nodes, edges))
}
