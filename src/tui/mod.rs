//! Ratatui-based terminal UI.
//!
//! The TUI shows the loaded file, a start/end date panel, the KPI block and a
//! sales chart with its trend line. Every date change reruns the pipeline.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::analysis::date_ordinal;
use crate::app::pipeline::{self, Derived};
use crate::cli::TuiArgs;
use crate::domain::{FilteredSeries, SalesDataset, TrendLine};
use crate::error::AppError;
use crate::report::fmt_thousands;

mod plotters_chart;

use plotters_chart::SalesPlottersChart;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    // Resolve and load before touching the terminal so the picker prompt and
    // any load error print normally.
    let source = crate::app::resolve_csv_path(&args.input)?;
    let columns = crate::app::columns_from_args(&args.input);
    let dataset = crate::io::ingest::load_path(&source, &columns)?;

    let mut app = App::new(source, dataset, args.export)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Start,
    End,
}

/// Last successfully computed selection.
#[derive(Debug, Clone)]
struct View {
    series: FilteredSeries,
    derived: Derived,
}

struct App {
    source: PathBuf,
    dataset: SalesDataset,
    export_path: PathBuf,
    start: NaiveDate,
    end: NaiveDate,
    selected: Field,
    editing: bool,
    input: String,
    status: String,
    view: Option<View>,
}

impl App {
    fn new(source: PathBuf, dataset: SalesDataset, export_path: PathBuf) -> Result<Self, AppError> {
        let Some(span) = dataset.span() else {
            return Err(AppError::new(3, format!("No data rows in '{}'.", source.display())));
        };

        let mut app = Self {
            source,
            dataset,
            export_path,
            start: span.start(),
            end: span.end(),
            selected: Field::Start,
            editing: false,
            input: String::new(),
            status: String::new(),
            view: None,
        };
        app.recompute();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.selected = Field::Start,
            KeyCode::Down => self.selected = Field::End,
            KeyCode::Left => self.shift_selected(-1),
            KeyCode::Right => self.shift_selected(1),
            KeyCode::Enter => {
                self.editing = true;
                self.input = self.selected_date().format("%Y-%m-%d").to_string();
                self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('x') => {
                if let Some(span) = self.dataset.span() {
                    self.start = span.start();
                    self.end = span.end();
                    self.recompute();
                }
            }
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('s') => {
                let path = PathBuf::from(crate::data::SAMPLE_FILE_NAME);
                self.status = match crate::data::write_sample_csv(&path) {
                    Ok(()) => format!("Wrote sample: {}", path.display()),
                    Err(err) => format!("Sample write failed: {err}"),
                };
            }
            _ => {}
        }

        false
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = false;
                self.apply_date_input();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn selected_date(&self) -> NaiveDate {
        match self.selected {
            Field::Start => self.start,
            Field::End => self.end,
        }
    }

    fn set_selected_date(&mut self, date: NaiveDate) {
        match self.selected {
            Field::Start => self.start = date,
            Field::End => self.end = date,
        }
    }

    fn shift_selected(&mut self, days: i64) {
        let Some(date) = self
            .selected_date()
            .checked_add_signed(chrono::Duration::days(days))
        else {
            return;
        };
        self.set_selected_date(date);
        self.recompute();
    }

    fn apply_date_input(&mut self) {
        let trimmed = self.input.trim();
        match crate::cli::parse_iso_date(trimmed) {
            Ok(date) => {
                self.set_selected_date(date);
                self.recompute();
            }
            Err(e) => {
                self.status = format!("Invalid date '{trimmed}': {e}");
            }
        }
    }

    /// Rerun filter + derive. On an invalid range the previous view stays.
    fn recompute(&mut self) {
        match pipeline::filter(&self.dataset, self.start, self.end) {
            Ok(series) => {
                let derived = pipeline::derive_and_summarize(&series);
                self.status = if series.is_empty() {
                    "No rows in the selected range.".to_string()
                } else {
                    format!("{} row(s) selected.", series.len())
                };
                self.view = Some(View { series, derived });
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn export(&mut self) {
        let Some(view) = &self.view else {
            self.status = "Nothing to export.".to_string();
            return;
        };
        self.status = match pipeline::export_to_path(&self.export_path, &view.series, &view.derived) {
            Ok(()) => format!("Wrote report: {}", self.export_path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let selected = self.view.as_ref().map(|v| v.series.len()).unwrap_or(0);
        let lines = vec![
            Line::from(vec![
                Span::styled("sales", Style::default().fg(Color::Cyan)),
                Span::raw(format!(": {}", self.source.display())),
            ]),
            Line::from(Span::styled(
                format!(
                    "rows: {} loaded | {selected} selected | range: {} .. {}",
                    self.dataset.len(),
                    self.start,
                    self.end,
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);

        self.draw_chart(frame, cols[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0)])
            .split(cols[1]);

        self.draw_kpis(frame, side[0]);
        self.draw_settings(frame, side[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Sales").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(view) = self.view.as_ref().filter(|v| !v.series.is_empty()) else {
            let msg = Paragraph::new("No data for the selected range.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let data = chart_series(&view.series, view.derived.trend.as_ref());
        let widget = SalesPlottersChart {
            sales: &data.sales,
            trend: &data.trend,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            x_label: "date",
            y_label: "sales",
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_sales,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_kpis(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Key figures").borders(Borders::ALL);
        let lines = match self.view.as_ref().and_then(|v| v.derived.kpis) {
            Some(k) => vec![
                kpi_line("Total sales", fmt_thousands(k.total, 0)),
                kpi_line("Average sales", fmt_thousands(k.mean, 2)),
                kpi_line("Max sales", fmt_thousands(k.max, 0)),
                kpi_line("Min sales", fmt_thousands(k.min, 0)),
                Line::from(Span::styled(
                    self.view
                        .as_ref()
                        .and_then(|v| v.derived.trend)
                        .map(|t| format!("trend: {:+.2}/day", t.slope))
                        .unwrap_or_else(|| "trend: -".to_string()),
                    Style::default().fg(Color::Gray),
                )),
            ],
            None => vec![Line::from("-")],
        };
        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Start: {}", self.start)),
            ListItem::new(format!("End:   {}", self.end)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Range").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(match self.selected {
            Field::Start => 0,
            Field::End => 1,
        }));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing {
            let hint = Paragraph::new(format!("> {}", self.input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ ±1 day  Enter edit  x full range  e export  s sample  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn kpi_line(label: &str, value: String) -> Line<'static> {
    Line::from(format!("{label:<14}{value:>16}"))
}

/// Chart inputs for one filtered series.
#[derive(Debug, Clone, PartialEq)]
struct ChartData {
    sales: Vec<(f64, f64)>,
    trend: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series (x = date ordinal) and padded bounds.
fn chart_series(series: &FilteredSeries, trend: Option<&TrendLine>) -> ChartData {
    let sales: Vec<(f64, f64)> = series.rows.iter().map(|r| (date_ordinal(r.date), r.sales)).collect();

    let mut x0 = sales.first().map(|p| p.0).unwrap_or(0.0);
    let mut x1 = sales.last().map(|p| p.0).unwrap_or(1.0);
    if x1 <= x0 {
        x0 -= 1.0;
        x1 += 1.0;
    }

    let trend: Vec<(f64, f64)> = trend
        .map(|t| vec![(x0, t.slope * x0 + t.intercept), (x1, t.slope * x1 + t.intercept)])
        .unwrap_or_default();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in sales.iter().chain(trend.iter()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    if y_max <= y_min {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    ChartData {
        sales,
        trend,
        x_bounds: [x0, x1],
        y_bounds: [y_min - pad, y_max + pad],
    }
}

fn fmt_axis_date(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_axis_sales(v: f64) -> String {
    format!("{v:.0}")
}
