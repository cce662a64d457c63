use crate::assignment::solver::{Objective, minimize};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::flow::cost::{cost, system_cost};
use crate::flow::distribution::FlowDistribution;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::routing::enumerate::enumerate_simple_paths;
use crate::routing::path::Path;
use log::{info, warn};

/// Total system travel time as a function of path flows.
struct SystemCost<'a> {
    graph: &'a Graph,
    /// edge indices traversed by each path
    incidence: Vec<Vec<usize>>,
}

impl<'a> SystemCost<'a> {
    fn new(graph: &'a Graph, paths: &[Path]) -> Self {
        let incidence = paths
            .iter()
            .map(|p| p.edges().iter().map(|e| e.index()).collect())
            .collect();
        Self { graph, incidence }
    }

    fn edge_flows(&self, x: &[f64]) -> Vec<f64> {
        let mut flows = vec![0.0; self.graph.edge_count()];
        self.incidence
            .iter()
            .zip(x.iter())
            .for_each(|(edges, f)| edges.iter().for_each(|e| flows[*e] += f));
        flows
    }
}

impl Objective for SystemCost<'_> {
    fn value(&self, x: &[f64]) -> f64 {
        self.edge_flows(x)
            .iter()
            .zip(self.graph.edges())
            .map(|(f, e)| system_cost(*f, e.a(), e.b()))
            .sum()
    }

    fn gradient(&self, x: &[f64]) -> Vec<f64> {
        // d/dy (a*y + b)*y = 2*a*y + b, the marginal cost of an edge
        let marginal = self
            .edge_flows(x)
            .iter()
            .zip(self.graph.edges())
            .map(|(f, e)| cost(2.0 * f, e.a(), e.b()))
            .collect::<Vec<f64>>();
        self.incidence
            .iter()
            .map(|edges| edges.iter().map(|e| marginal[*e]).sum())
            .collect()
    }

    fn lipschitz(&self) -> f64 {
        // Gershgorin bound on the Hessian 2 * A^T diag(a) A, whose entries are non-negative.
        let mut usage = vec![0.0; self.graph.edge_count()];
        self.incidence
            .iter()
            .flatten()
            .for_each(|e| usage[*e] += 1.0);
        self.incidence
            .iter()
            .map(|edges| {
                edges
                    .iter()
                    .map(|e| 2.0 * self.graph.edges()[*e].a() * usage[*e])
                    .sum::<f64>()
            })
            .fold(0.0, f64::max)
    }
}

/// Social optimum together with the path decomposition that produced it.
#[derive(Debug)]
pub struct SocialOptimum {
    paths: Vec<(Path, f64)>,
    flows: FlowDistribution,
    iterations: usize,
}

impl SocialOptimum {
    pub fn paths(&self) -> &[(Path, f64)] {
        &self.paths
    }

    pub fn flows(&self) -> &FlowDistribution {
        &self.flows
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn into_flows(self) -> FlowDistribution {
        self.flows
    }
}

/// Splits `n` vehicles over the simple source-sink paths so that total system cost is minimal.
///
/// Path flows are continuous. When no path exists the result is the all-zero
/// distribution rather than an error, unlike [`crate::assignment::equilibrium::assign`].
pub fn solve(
    graph: &Graph,
    n: u64,
    source: NodeId,
    sink: NodeId,
    config: &AnalysisConfig,
) -> Result<SocialOptimum> {
    let paths = enumerate_simple_paths(graph, source, sink, config.max_paths);
    if paths.is_empty() {
        warn!(
            "no path from '{}' to '{}'; social optimum is empty",
            graph.node_by_id(source).name(),
            graph.node_by_id(sink).name()
        );
        return Ok(SocialOptimum {
            paths: Vec::new(),
            flows: FlowDistribution::zeroed(graph),
            iterations: 0,
        });
    }

    let total = n as f64;
    let objective = SystemCost::new(graph, &paths);
    let x0 = vec![total / paths.len() as f64; paths.len()];
    let solution = minimize(&objective, x0, total, &config.solver)?;

    let mut flows = FlowDistribution::zeroed(graph);
    paths
        .iter()
        .zip(solution.x.iter())
        .for_each(|(p, f)| flows.add_path(p, *f));

    info!(
        "social optimum over {} paths: total cost {:.2} after {} iterations",
        paths.len(),
        solution.value,
        solution.iterations
    );
    Ok(SocialOptimum {
        paths: paths.into_iter().zip(solution.x).collect(),
        flows,
        iterations: solution.iterations,
    })
}

pub fn optimize(
    graph: &Graph,
    n: u64,
    source: NodeId,
    sink: NodeId,
    config: &AnalysisConfig,
) -> Result<FlowDistribution> {
    solve(graph, n, source, sink, config).map(SocialOptimum::into_flows)
}
