use crate::flow::cost::{cost, system_cost};
use crate::graph::edge::EdgeId;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::routing::path::Path;

/// Flow carried by each edge of one graph, indexed by `EdgeId`.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowDistribution {
    /// flow >= 0.0
    flows: Vec<f64>,
}

impl FlowDistribution {
    pub fn zeroed(graph: &Graph) -> Self {
        Self {
            flows: vec![0.0; graph.edge_count()],
        }
    }

    pub fn flow(&self, id: EdgeId) -> f64 {
        self.flows[id.index()]
    }

    pub fn add(&mut self, id: EdgeId, amount: f64) {
        self.flows[id.index()] += amount;
    }

    pub fn add_path(&mut self, path: &Path, amount: f64) {
        path.edges().iter().for_each(|id| self.add(*id, amount));
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, f64)> + '_ {
        self.flows.iter().enumerate().map(|(i, f)| (EdgeId(i), *f))
    }

    pub fn is_zero(&self) -> bool {
        self.flows.iter().all(|f| *f == 0.0)
    }

    /// Per-vehicle cost of `id` at its current flow.
    pub fn edge_cost(&self, graph: &Graph, id: EdgeId) -> f64 {
        let edge = graph.edge_by_id(id);
        cost(self.flow(id), edge.a(), edge.b())
    }

    /// Total system travel time, sum of `cost(flow) * flow` over all edges.
    pub fn total_cost(&self, graph: &Graph) -> f64 {
        graph
            .edges()
            .iter()
            .map(|e| system_cost(self.flow(e.id()), e.a(), e.b()))
            .sum()
    }

    /// Outflow minus inflow at `node`.
    pub fn net_outflow(&self, graph: &Graph, node: NodeId) -> f64 {
        let out: f64 = graph.outgoing(node).iter().map(|id| self.flow(*id)).sum();
        let inc: f64 = graph.incoming(node).iter().map(|id| self.flow(*id)).sum();
        out - inc
    }
}
