/// Per-vehicle traversal cost of an edge carrying `flow` vehicles: `a * flow + b`.
///
/// `cost(0.0, a, b)` is the free-flow cost `b`. Callers keep `flow`, `a` and `b` non-negative.
pub fn cost(flow: f64, a: f64, b: f64) -> f64 {
    a * flow + b
}

/// Contribution of one edge to total system travel time.
pub fn system_cost(flow: f64, a: f64, b: f64) -> f64 {
    cost(flow, a, b) * flow
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_free_flow_cost() {
        assert_relative_eq!(50.0, cost(0.0, 0.0, 50.0));
        assert_relative_eq!(0.0, cost(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_cost_grows_linearly_with_flow() {
        assert_relative_eq!(4.0, cost(4.0, 1.0, 0.0));
        assert_relative_eq!(17.5, cost(2.5, 3.0, 10.0));
    }

    #[test]
    fn test_system_cost_is_flow_times_cost() {
        assert_relative_eq!(16.0, system_cost(4.0, 1.0, 0.0));
        assert_relative_eq!(0.0, system_cost(0.0, 2.0, 7.0));
        assert_relative_eq!(2.0 * (3.0 * 2.0 + 1.0), system_cost(2.0, 3.0, 1.0));
    }
}
