//! Ratatui-based terminal UI.
//!
//! The TUI provides an identifier box for choosing a planet, a parameter panel
//! showing what the catalog resolved, and the transit (left) and RV (right)
//! panels rendered with Plotters.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::Simulator;
use crate::cli::TuiArgs;
use crate::data::Catalog;
use crate::domain::{InputValues, Panel, PlotPayload};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::CurvePanelChart;

/// Parameters listed in the side panel, in display order.
const PARAMETER_KEYS: [&str; 11] = [
    "period", "ecc", "omega", "aRs", "orbinc", "RpRs", "K", "vsys", "T14", "yerr_lc", "yerr_rv",
];

/// Start the TUI.
pub fn run<C: Catalog>(simulator: Simulator<C>, args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(simulator, args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

struct App<C> {
    simulator: Simulator<C>,
    rng: StdRng,
    id_input: String,
    editing_id: bool,
    inputs: Option<InputValues>,
    payload: Option<PlotPayload>,
    status: String,
}

impl<C: Catalog> App<C> {
    fn new(simulator: Simulator<C>, args: TuiArgs) -> Self {
        let mut app = Self {
            simulator,
            rng: crate::app::make_rng(args.seed),
            id_input: args.id.clone().unwrap_or_default(),
            editing_id: args.id.is_none(),
            inputs: None,
            payload: None,
            status: "Type a planet name and press Enter.".to_string(),
        };
        if args.id.is_some() {
            app.resolve_input();
        }
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
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
        if self.editing_id {
            self.handle_id_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Enter | KeyCode::Char('/') => {
                self.editing_id = true;
                self.status = "Editing planet name. Enter to resolve, Esc to cancel.".to_string();
            }
            KeyCode::Char('r') => self.redraw_noise(),
            KeyCode::Char('e') => self.export_payload(),
            _ => {}
        }

        false
    }

    fn handle_id_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_id = false;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_id = false;
                self.resolve_input();
            }
            KeyCode::Backspace => {
                self.id_input.pop();
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    self.id_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn resolve_input(&mut self) {
        let Some(id) = lookup_key(&self.id_input).map(str::to_string) else {
            self.status = "Enter a planet name.".to_string();
            return;
        };

        let inputs = self.simulator.resolve(&id).to_input_values();
        self.inputs = Some(inputs);
        self.simulate();
        if self.payload.is_some() {
            self.status = format!("Resolved '{id}'.");
        }
    }

    fn redraw_noise(&mut self) {
        if self.inputs.is_none() {
            self.status = "Nothing to redraw yet.".to_string();
            return;
        }
        self.simulate();
        if self.payload.is_some() {
            self.status = "Drew new observations.".to_string();
        }
    }

    fn simulate(&mut self) {
        let Some(inputs) = &self.inputs else {
            return;
        };
        match self.simulator.plot(inputs, &mut self.rng) {
            Ok(payload) => self.payload = Some(payload),
            Err(err) => {
                tracing::warn!(error = %err, "simulation failed");
                self.payload = None;
                self.status = format!("Cannot plot: {err}");
            }
        }
    }

    fn export_payload(&mut self) {
        let Some(payload) = &self.payload else {
            self.status = "No plot to export.".to_string();
            return;
        };
        let path = export_file_name(payload.planet_name.as_deref());
        self.status = match crate::io::write_payload_json(&path, payload) {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
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
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("exo", Style::default().fg(Color::Cyan)),
            Span::raw(" - transit & radial velocity curves"),
        ]));

        let input_style = if self.editing_id {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if self.editing_id { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled("planet: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}{cursor}", self.id_input), input_style),
        ]));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(28),
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ])
            .split(area);

        self.draw_parameters(frame, chunks[0]);
        match &self.payload {
            Some(payload) => {
                draw_panel(frame, chunks[1], &payload.transit, fmt_axis_flux);
                draw_panel(frame, chunks[2], &payload.rv, fmt_axis_rv);
            }
            None => {
                draw_waiting(frame, chunks[1], "Transit lightcurve");
                draw_waiting(frame, chunks[2], "Radial velocity curve");
            }
        }
    }

    fn draw_parameters(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = match &self.inputs {
            Some(inputs) => PARAMETER_KEYS
                .iter()
                .map(|key| ListItem::new(format!("{key:<8} {}", parameter_text(inputs, key))))
                .collect(),
            None => vec![ListItem::new("-")],
        };

        let list = List::new(items).block(Block::default().title("Parameters").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Enter / edit planet  r new noise  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_waiting(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let msg = Paragraph::new("Waiting for a planet...").style(Style::default().fg(Color::Yellow));
    frame.render_widget(msg, inner);
}

fn draw_panel(frame: &mut ratatui::Frame<'_>, area: Rect, panel: &Panel, fmt_y: fn(f64) -> String) {
    let block = Block::default().title(panel.title.clone()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let series = PanelSeries::from_panel(panel);
    let (chart_rect, insets) = chart_layout(inner);
    let widget = CurvePanelChart {
        model: &series.model,
        observed: &series.observed,
        x_bounds: series.x_bounds,
        y_bounds: series.y_bounds,
        x_label: &panel.x_label,
        y_label: &panel.y_label,
        fmt_x: fmt_axis_x,
        fmt_y,
    };

    frame.render_widget(widget, chart_rect);
    if let Some(insets) = insets {
        let axes = AxisText {
            x_label: &panel.x_label,
            y_label: &panel.y_label,
            fmt_y,
        };
        draw_axis_ticks(frame, inner, chart_rect, insets, series.x_bounds, series.y_bounds, &axes);
    }
}

/// Chart-ready series and bounds for one panel.
#[derive(Debug, Clone, PartialEq)]
struct PanelSeries {
    model: Vec<(f64, f64)>,
    observed: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl PanelSeries {
    fn from_panel(panel: &Panel) -> Self {
        let model = panel.curve.model_points();
        let observed = panel.curve.observed_points();

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, _) in &model {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
        }
        if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
            x_min = 0.0;
            x_max = 1.0;
        }

        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(_, y) in model.iter().chain(&observed) {
            if y.is_finite() {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        } else if y_max <= y_min {
            // Flat curve: open a small band around it.
            let half = (y_min.abs() * 1e-3).max(1e-6);
            y_min -= half;
            y_max += half;
        }

        let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

        Self {
            model,
            observed,
            x_bounds: [x_min, x_max],
            y_bounds: [y_min - pad, y_max + pad],
        }
    }
}

/// The catalog key for the typed name, or `None` if nothing was typed.
///
/// The name is passed on exactly as typed.
fn lookup_key(input: &str) -> Option<&str> {
    (!input.trim().is_empty()).then_some(input)
}

fn parameter_text(inputs: &InputValues, key: &'static str) -> String {
    match inputs.number(key) {
        Ok(v) => format!("{v:.5}"),
        Err(_) => "-".to_string(),
    }
}

/// `exo_<planet>.json` in the working directory, with the name made file-safe.
fn export_file_name(planet_name: Option<&str>) -> PathBuf {
    let slug: String = planet_name
        .unwrap_or("plot")
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let slug = if slug.is_empty() { "plot".to_string() } else { slug };
    PathBuf::from(format!("exo_{slug}.json"))
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.1}")
}

fn fmt_axis_flux(v: f64) -> String {
    format!("{v:.4}")
}

fn fmt_axis_rv(v: f64) -> String {
    format!("{v:.2}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

struct AxisText<'a> {
    x_label: &'a str,
    y_label: &'a str,
    fmt_y: fn(f64) -> String,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 9,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    axes: &AxisText<'_>,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_x(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = (axes.fmt_y)(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(axes.x_label.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(axes.y_label.to_string())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.min(axes.y_label.len() as u16),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
