use crate::assignment::social::SocialOptimum;
use crate::flow::distribution::FlowDistribution;
use crate::graph::graph::Graph;
use std::fmt::Write;

/// Path flows below this are treated as unused when listing routes.
const USED_PATH_FLOW: f64 = 1e-6;

/// Both flow distributions of one analysis run.
#[derive(Debug)]
pub struct Report {
    vehicles: u64,
    source: String,
    sink: String,
    equilibrium: FlowDistribution,
    social: SocialOptimum,
    equilibrium_cost: f64,
    social_cost: f64,
}

impl Report {
    pub fn new(
        graph: &Graph,
        vehicles: u64,
        source: String,
        sink: String,
        equilibrium: FlowDistribution,
        social: SocialOptimum,
    ) -> Self {
        let equilibrium_cost = equilibrium.total_cost(graph);
        let social_cost = social.flows().total_cost(graph);
        Self {
            vehicles,
            source,
            sink,
            equilibrium,
            social,
            equilibrium_cost,
            social_cost,
        }
    }

    pub fn vehicles(&self) -> u64 {
        self.vehicles
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sink(&self) -> &str {
        &self.sink
    }

    pub fn equilibrium(&self) -> &FlowDistribution {
        &self.equilibrium
    }

    pub fn social(&self) -> &FlowDistribution {
        self.social.flows()
    }

    pub fn equilibrium_cost(&self) -> f64 {
        self.equilibrium_cost
    }

    pub fn social_cost(&self) -> f64 {
        self.social_cost
    }

    /// Equilibrium cost over social cost; `None` when the social cost is zero.
    pub fn price_of_anarchy(&self) -> Option<f64> {
        if self.social_cost > 0.0 {
            Some(self.equilibrium_cost / self.social_cost)
        } else {
            None
        }
    }

    pub fn render(&self, graph: &Graph) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Equilibrium flow ({} vehicles, {} -> {}):",
            self.vehicles, self.source, self.sink
        );
        write_flows(&mut out, graph, &self.equilibrium);

        let _ = writeln!(out, "\nSocial optimum flow:");
        write_flows(&mut out, graph, self.social.flows());

        let used = self
            .social
            .paths()
            .iter()
            .filter(|(_, f)| *f > USED_PATH_FLOW)
            .collect::<Vec<_>>();
        if !used.is_empty() {
            let _ = writeln!(out, "\nSocial optimum routes:");
            for (path, flow) in used {
                let _ = writeln!(out, "  {}: {:.2}", path.describe(graph), flow);
            }
        }

        let _ = writeln!(out, "\nTotal cost (equilibrium): {:.2}", self.equilibrium_cost);
        let _ = writeln!(out, "Total cost (social optimum): {:.2}", self.social_cost);
        if let Some(poa) = self.price_of_anarchy() {
            let _ = writeln!(out, "Price of anarchy: {:.2}", poa);
        }
        out
    }
}

fn write_flows(out: &mut String, graph: &Graph, flows: &FlowDistribution) {
    for (id, flow) in flows.iter() {
        let _ = writeln!(out, "  {}: {:.2}", graph.edge_label(id), flow);
    }
}
