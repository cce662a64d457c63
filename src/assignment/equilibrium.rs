use crate::error::{Result, TrafficError};
use crate::flow::distribution::FlowDistribution;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::routing::path::Path;
use crate::routing::shortest::shortest_path;
use log::{debug, info};

/// Routes vehicles one at a time, each on the path that is cheapest given the
/// flow committed by the vehicles before it.
///
/// This is a myopic approximation of selfish routing; the result is not
/// guaranteed to satisfy the Wardrop condition. Ties between equal-cost paths
/// follow [`shortest_path`], so runs are reproducible.
pub struct EquilibriumAssigner<'a> {
    graph: &'a Graph,
    source: NodeId,
    sink: NodeId,
    flows: FlowDistribution,
    routed: u64,
}

impl<'a> EquilibriumAssigner<'a> {
    pub fn new(graph: &'a Graph, source: NodeId, sink: NodeId) -> Self {
        Self {
            graph,
            source,
            sink,
            flows: FlowDistribution::zeroed(graph),
            routed: 0,
        }
    }

    pub fn flows(&self) -> &FlowDistribution {
        &self.flows
    }

    pub fn routed(&self) -> u64 {
        self.routed
    }

    /// Routes the next vehicle and returns the path it took.
    pub fn step(&mut self) -> Result<Path> {
        let graph = self.graph;
        let flows = &self.flows;
        let path = shortest_path(graph, self.source, self.sink, |id| {
            flows.edge_cost(graph, id)
        })
        .ok_or_else(|| TrafficError::NoPath {
            origin: graph.node_by_id(self.source).name().to_string(),
            destination: graph.node_by_id(self.sink).name().to_string(),
        })?;

        self.routed += 1;
        debug!(
            "vehicle {}: {} at cost {:.2}",
            self.routed,
            path.describe(graph),
            path.cost(graph, &self.flows)
        );
        self.flows.add_path(&path, 1.0);
        Ok(path)
    }

    pub fn into_flows(self) -> FlowDistribution {
        self.flows
    }
}

/// Sequential assignment of `n` vehicles from `source` to `sink`.
pub fn assign(graph: &Graph, n: u64, source: NodeId, sink: NodeId) -> Result<FlowDistribution> {
    let mut assigner = EquilibriumAssigner::new(graph, source, sink);
    for _ in 0..n {
        assigner.step()?;
    }
    info!(
        "equilibrium: {} vehicles routed, total cost {:.2}",
        assigner.routed(),
        assigner.flows().total_cost(graph)
    );
    Ok(assigner.into_flows())
}
