use std::time::Duration;

/// Stopping rules for the social optimum solver.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// Converged once the optimality gap is at most `tolerance * max(objective, 1)`.
    pub tolerance: f64,
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            tolerance: 1e-9,
            time_limit: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnalysisConfig {
    /// Upper bound on enumerated source-sink paths; `None` enumerates all of them.
    pub max_paths: Option<usize>,
    pub solver: SolverConfig,
}
