use crate::analysis::analysis::analyze;
use crate::analysis::report::Report;
use crate::config::{AnalysisConfig, SolverConfig};
use crate::error::Result;
use crate::graph::graph::Graph;
use crate::graph::loader::load_graph;
use crate::tui::app::App;
use crate::tui::draw::draw_app;
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

mod analysis;
mod assignment;
mod config;
mod error;
mod flow;
mod graph;
mod routing;
#[cfg(test)]
mod scenario;
mod tui;

#[derive(Parser)]
#[command(name = "braessflow")]
#[command(version)]
#[command(about = "Compare selfish traffic assignment with the social optimum")]
struct Cli {
    /// Input graph file (.gml, or .json)
    #[arg(value_name = "GRAPH_FILE")]
    graph_file: PathBuf,

    /// Number of vehicles
    #[arg(value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    n: u64,

    /// Starting node
    #[arg(value_name = "INITIAL")]
    initial: String,

    /// Ending node
    #[arg(value_name = "FINAL")]
    final_node: String,

    /// Show both flow distributions in an interactive terminal view
    #[arg(long)]
    plot: bool,

    /// Stop enumerating source-sink paths after this many (approximate social optimum)
    #[arg(long, value_name = "COUNT")]
    max_paths: Option<usize>,

    /// Iteration budget of the social optimum solver
    #[arg(long, default_value_t = SolverConfig::default().max_iterations)]
    max_iterations: usize,

    /// Convergence tolerance of the social optimum solver, relative to the total cost
    #[arg(long, default_value_t = SolverConfig::default().tolerance)]
    tolerance: f64,

    /// Abort the social optimum solve after this many seconds
    #[arg(long, value_name = "SECS")]
    time_limit: Option<f64>,

    /// Log every routed vehicle and solver progress
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            max_paths: self.max_paths,
            solver: SolverConfig {
                max_iterations: self.max_iterations,
                tolerance: self.tolerance,
                time_limit: self.time_limit.map(Duration::from_secs_f64),
            },
        }
    }
}

fn plot(graph: &Graph, report: &Report) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut app = App::new(graph, report);

    loop {
        terminal.draw(|frame| draw_app(frame, &app))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            match crossterm::event::read()? {
                Event::Key(key)
                    if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') =>
                {
                    break;
                }
                Event::Key(key)
                    if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('s') =>
                {
                    app.cycle_sort()
                }
                _ => continue,
            }
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let graph = load_graph(&cli.graph_file)?;
    let report = analyze(
        &graph,
        cli.n,
        &cli.initial,
        &cli.final_node,
        &cli.analysis_config(),
    )?;

    print!("{}", report.render(&graph));

    if cli.plot {
        plot(&graph, &report)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
