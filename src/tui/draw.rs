use crate::graph::edge::EdgeId;
use crate::tui::app::{App, SortMode};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table};

pub struct EdgeRow {
    pub id: EdgeId,
    pub equilibrium: f64,
    pub social: f64,
}

impl EdgeRow {
    /// Vehicles the selfish assignment puts on this edge beyond the social optimum.
    pub fn gap(&self) -> f64 {
        self.equilibrium - self.social
    }
}

pub fn edge_rows(app: &App) -> Vec<EdgeRow> {
    let mut rows = app
        .report
        .equilibrium()
        .iter()
        .map(|(id, equilibrium)| EdgeRow {
            id,
            equilibrium,
            social: app.report.social().flow(id),
        })
        .collect::<Vec<EdgeRow>>();
    match app.sort_mode {
        SortMode::Declaration => {}
        SortMode::Equilibrium => rows.sort_by(|a, b| b.equilibrium.total_cmp(&a.equilibrium)),
        SortMode::Gap => rows.sort_by(|a, b| b.gap().abs().total_cmp(&a.gap().abs())),
    }
    rows
}

pub fn draw_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_totals(app), chunks[2]);
    frame.render_widget(build_edge_table(app), chunks[3]);
    frame.render_widget(
        Paragraph::new(format!(
            " q quit | s sort (by {})",
            app.sort_mode.label()
        ))
        .style(Style::default().add_modifier(Modifier::DIM)),
        chunks[4],
    );
}

fn gap_style(gap: f64) -> Style {
    if gap > 1e-6 {
        Style::default().fg(Color::Red)
    } else if gap < -1e-6 {
        Style::default().fg(Color::Green)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    }
}

fn build_header<'a>(app: &'a App) -> Block<'a> {
    Block::new()
        .title(Line::from(vec![
            Span::raw(" Braessflow ").style(Style::default().bold().cyan()),
            Span::raw("|").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(" Vehicles: ").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!("{}", app.report.vehicles())).style(Style::default().bold()),
            Span::raw(" Route: ").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!("{} -> {}", app.report.source(), app.report.sink()))
                .style(Style::default().bold()),
            Span::raw(" "),
        ]))
        .title_alignment(Alignment::Center)
}

fn build_totals<'a>(app: &'a App) -> Paragraph<'a> {
    let report = app.report;
    let poa = report
        .price_of_anarchy()
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "n/a".to_string());
    Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Equilibrium cost:    "),
            Span::raw(format!("{:>10.2}", report.equilibrium_cost())).bold(),
        ]),
        Line::from(vec![
            Span::raw("Social optimum cost: "),
            Span::raw(format!("{:>10.2}", report.social_cost())).bold(),
        ]),
        Line::from(vec![
            Span::raw("Price of anarchy:    "),
            Span::raw(format!("{:>10}", poa)).bold().yellow(),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Totals ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_edge_table<'a>(app: &'a App) -> Table<'a> {
    let graph = app.graph;
    let report = app.report;

    Table::new(
        edge_rows(app).into_iter().map(|row| {
            let edge = graph.edge_by_id(row.id);
            Row::new(vec![
                Cell::from(graph.edge_label(row.id)),
                Cell::from(format!("{:>6.2}", edge.a())),
                Cell::from(format!("{:>6.2}", edge.b())),
                Cell::from(format!("{:>8.2}", row.equilibrium)),
                Cell::from(format!(
                    "{:>8.2}",
                    report.equilibrium().edge_cost(graph, row.id)
                )),
                Cell::from(format!("{:>8.2}", row.social)),
                Cell::from(format!("{:>8.2}", report.social().edge_cost(graph, row.id))),
                Cell::from(format!("{:>+8.2}", row.gap())).style(gap_style(row.gap())),
            ])
        }),
        [
            Constraint::Length(24),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new([
            Cell::from("Edge"),
            Cell::from("     a"),
            Cell::from("     b"),
            Cell::from("  Eq flow"),
            Cell::from("  Eq cost"),
            Cell::from(" Opt flow"),
            Cell::from(" Opt cost"),
            Cell::from("      Gap"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Edges ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analysis::analyze;
    use crate::analysis::report::Report;
    use crate::config::AnalysisConfig;
    use crate::graph::graph::Graph;
    use crate::scenario::parallel_links;

    fn rows(graph: &Graph, report: &Report, sort_mode: SortMode) -> Vec<usize> {
        // App restores the terminal on drop, so build the view state without it.
        let app = std::mem::ManuallyDrop::new(App {
            graph,
            report,
            sort_mode,
        });
        edge_rows(&app).iter().map(|r| r.id.index()).collect()
    }

    #[test]
    fn test_edge_rows_sorting() {
        let graph = parallel_links(1.0, 10.0);
        let report = analyze(&graph, 15, "S", "T", &AnalysisConfig::default()).unwrap();

        // equilibrium 11 / 4 / 4, social 5 / 10 / 10
        assert_eq!(vec![0, 1, 2], rows(&graph, &report, SortMode::Declaration));
        assert_eq!(vec![0, 1, 2], rows(&graph, &report, SortMode::Equilibrium));
        let mut by_gap = rows(&graph, &report, SortMode::Gap);
        by_gap.sort();
        assert_eq!(vec![0, 1, 2], by_gap);
    }
}
