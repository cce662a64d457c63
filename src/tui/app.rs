use crate::analysis::report::Report;
use crate::graph::graph::Graph;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SortMode {
    Declaration,
    Equilibrium,
    Gap,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Declaration => SortMode::Equilibrium,
            SortMode::Equilibrium => SortMode::Gap,
            SortMode::Gap => SortMode::Declaration,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Declaration => "edge order",
            SortMode::Equilibrium => "equilibrium flow",
            SortMode::Gap => "flow gap",
        }
    }
}

/// Terminal view over a finished report. Restores the terminal when dropped.
pub struct App<'a> {
    pub graph: &'a Graph,
    pub report: &'a Report,
    pub sort_mode: SortMode,
}

impl<'a> App<'a> {
    pub fn new(graph: &'a Graph, report: &'a Report) -> Self {
        Self {
            graph,
            report,
            sort_mode: SortMode::Declaration,
        }
    }

    pub fn cycle_sort(&mut self) {
        self.sort_mode = self.sort_mode.next();
    }
}

impl Drop for App<'_> {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
