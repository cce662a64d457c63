use crate::analysis::report::Report;
use crate::assignment::equilibrium::assign;
use crate::assignment::social::solve;
use crate::config::AnalysisConfig;
use crate::error::{Result, TrafficError};
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;

fn resolve(graph: &Graph, name: &str, role: &str) -> Result<NodeId> {
    graph.node_by_name(name).ok_or_else(|| {
        TrafficError::input(format!("{} node '{}' is not in the graph", role, name))
    })
}

/// Runs the equilibrium assignment and then the social optimum, once each.
pub fn analyze(
    graph: &Graph,
    vehicles: u64,
    source: &str,
    sink: &str,
    config: &AnalysisConfig,
) -> Result<Report> {
    let source_id = resolve(graph, source, "initial")?;
    let sink_id = resolve(graph, sink, "final")?;

    let equilibrium = assign(graph, vehicles, source_id, sink_id)?;
    let social = solve(graph, vehicles, source_id, sink_id, config)?;

    Ok(Report::new(
        graph,
        vehicles,
        source.to_string(),
        sink.to_string(),
        equilibrium,
        social,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::EdgeId;
    use crate::graph::graph::GraphBuilder;
    use crate::scenario::{braess, parallel_links};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_unknown_nodes_are_input_errors() {
        let graph = braess();
        let config = AnalysisConfig::default();

        let err = analyze(&graph, 4, "Z", "D", &config).unwrap_err();
        assert!(matches!(&err, TrafficError::InputValidation(m) if m.contains("'Z'")));

        let err = analyze(&graph, 4, "A", "Q", &config).unwrap_err();
        assert!(matches!(&err, TrafficError::InputValidation(m) if m.contains("'Q'")));
    }

    #[test]
    fn test_no_path_propagates_from_equilibrium() {
        let mut builder = GraphBuilder::new();
        builder.add_edge("S", "A", 1.0, 0.0).unwrap();
        builder.add_node("T");
        let graph = builder.build();

        let err = analyze(&graph, 3, "S", "T", &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, TrafficError::NoPath { .. }));
    }

    #[test]
    fn test_braess_report() {
        let graph = braess();
        let report = analyze(&graph, 4, "A", "D", &AnalysisConfig::default()).unwrap();

        assert_eq!(4, report.vehicles());
        assert_relative_eq!(72.0, report.equilibrium_cost());
        assert_abs_diff_eq!(72.0, report.social_cost(), epsilon = 1e-4);
        assert_abs_diff_eq!(1.0, report.price_of_anarchy().unwrap(), epsilon = 1e-4);

        let text = report.render(&graph);
        assert!(text.contains("Equilibrium flow (4 vehicles, A -> D):"));
        assert!(text.contains("  B -> C: 4.00"));
        assert!(text.contains("  A -> B -> C -> D: 4.00"));
        assert!(text.contains("Total cost (equilibrium): 72.00"));
    }

    #[test]
    fn test_parallel_links_price_of_anarchy() {
        let graph = parallel_links(1.0, 10.0);
        let report = analyze(&graph, 15, "S", "T", &AnalysisConfig::default()).unwrap();

        assert_relative_eq!(11.0, report.equilibrium().flow(EdgeId(0)));
        assert_abs_diff_eq!(5.0, report.social().flow(EdgeId(0)), epsilon = 1e-4);
        // 161 / 125
        assert_abs_diff_eq!(1.288, report.price_of_anarchy().unwrap(), epsilon = 1e-4);
    }

    #[test]
    fn test_zero_vehicles() {
        let graph = braess();
        let report = analyze(&graph, 0, "A", "D", &AnalysisConfig::default()).unwrap();

        assert!(report.equilibrium().is_zero());
        assert!(report.social().is_zero());
        assert_eq!(None, report.price_of_anarchy());
    }
}
