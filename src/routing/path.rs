use crate::flow::distribution::FlowDistribution;
use crate::graph::edge::EdgeId;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;

/// Simple directed path. `nodes` has one more entry than `edges`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>, edges: Vec<EdgeId>) -> Self {
        debug_assert_eq!(nodes.len(), edges.len() + 1);
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Cost a vehicle pays on this path under `flows`.
    pub fn cost(&self, graph: &Graph, flows: &FlowDistribution) -> f64 {
        self.edges
            .iter()
            .map(|id| flows.edge_cost(graph, *id))
            .sum()
    }

    pub fn describe(&self, graph: &Graph) -> String {
        self.nodes
            .iter()
            .map(|id| graph.node_by_id(*id).name())
            .collect::<Vec<&str>>()
            .join(" -> ")
    }
}
