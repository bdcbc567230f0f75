//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel (language, PPP rate, household size,
//! period, currency, income, standardization), then renders the comparison,
//! the distribution charts and the key-percentile table. The percentile table
//! is loaded once; a PPP change rebuilds the comparator from it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::app::pipeline::{self, QueryOutput};
use crate::compare::{IncomeComparator, default_amount, max_amount};
use crate::domain::{CalculatorConfig, ChartKind, PercentileTable, Series};
use crate::error::AppError;
use crate::i18n::{Strings, TextDirection, fill};
use crate::io::ingest::load_percentile_table;
use crate::report::format::period_label;
use crate::report::{Interpretation, fmt_money, format_key_table, group_thousands};

mod plotters_chart;

use plotters_chart::{DistributionChart, IncomeOverlay};

const PPP_MIN: f64 = 1.0;
const PPP_MAX: f64 = 10.0;
const PPP_STEP: f64 = 0.1;
const HOUSEHOLD_MIN: i64 = 1;
const HOUSEHOLD_MAX: i64 = 20;

/// Start the TUI.
pub fn run(config: CalculatorConfig) -> Result<(), AppError> {
    // Load before touching the terminal so load errors print normally.
    let ingest = load_percentile_table(&config.data_path)?;
    let mut app = App::new(ingest.table, config)?;

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

/// Settings rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Language,
    Ppp,
    Household,
    Period,
    Currency,
    Income,
    Standardize,
}

const FIELDS: [Field; 7] = [
    Field::Language,
    Field::Ppp,
    Field::Household,
    Field::Period,
    Field::Currency,
    Field::Income,
    Field::Standardize,
];

struct App {
    table: PercentileTable,
    config: CalculatorConfig,
    comparator: IncomeComparator,
    query: QueryOutput,
    selected_field: usize,
    editing_income: bool,
    income_input: String,
    chart: ChartKind,
    status: String,
}

impl App {
    fn new(table: PercentileTable, config: CalculatorConfig) -> Result<Self, AppError> {
        let comparator = pipeline::build_comparator(&table, config.ppp_rate)?;
        let query = pipeline::run_query(&comparator, &config);
        let status = config.language.strings().data_loaded.to_string();
        Ok(Self {
            table,
            config,
            comparator,
            query,
            selected_field: 0,
            editing_income: false,
            income_input: String::new(),
            chart: ChartKind::Income,
            status,
        })
    }

    fn strings(&self) -> &'static Strings {
        self.config.language.strings()
    }

    fn rtl(&self) -> bool {
        self.config.language.direction() == TextDirection::Rtl
    }

    fn alignment(&self) -> Alignment {
        if self.rtl() { Alignment::Right } else { Alignment::Left }
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

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_income {
            self.handle_income_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELDS.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(if self.rtl() { 1 } else { -1 }),
            KeyCode::Right => self.adjust_field(if self.rtl() { -1 } else { 1 }),
            KeyCode::Char(' ') => self.adjust_field(1),
            KeyCode::Enter => {
                if FIELDS[self.selected_field] == Field::Income {
                    self.editing_income = true;
                    self.income_input = format!("{:.0}", self.config.input.amount);
                    self.status = self.strings().tui_editing.to_string();
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.chart = self.chart.toggle();
            }
            _ => {}
        }

        false
    }

    fn handle_income_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_income = false;
                self.status.clear();
            }
            KeyCode::Enter => {
                self.editing_income = false;
                self.apply_income_input();
            }
            KeyCode::Backspace => {
                self.income_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || (c == '.' && !self.income_input.contains('.')) => {
                self.income_input.push(c);
            }
            _ => {}
        }
    }

    fn apply_income_input(&mut self) {
        let trimmed = self.income_input.trim().replace(',', "");
        let max = max_amount(self.config.input.period, self.config.input.currency);
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && (0.0..=max).contains(&v) => {
                self.config.input.amount = v;
                self.requery();
            }
            Ok(v) => {
                self.status = format!("Income must be between 0 and {}", group_thousands(max, 0));
                log::debug!("rejected income {v}");
            }
            Err(e) => {
                self.status = format!("Invalid income '{trimmed}': {e}");
            }
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        let input = &mut self.config.input;
        match FIELDS[self.selected_field] {
            Field::Language => {
                self.config.language = self.config.language.toggle();
                self.status = self.strings().language_name.to_string();
                return;
            }
            Field::Ppp => {
                let next = self.config.ppp_rate + f64::from(delta) * PPP_STEP;
                let next = ((next * 100.0).round() / 100.0).clamp(PPP_MIN, PPP_MAX);
                if next != self.config.ppp_rate {
                    self.config.ppp_rate = next;
                    self.rebuild_comparator();
                }
                return;
            }
            Field::Household => {
                input.household_size = (input.household_size + i64::from(delta)).clamp(HOUSEHOLD_MIN, HOUSEHOLD_MAX);
            }
            Field::Period => {
                input.period = input.period.toggle();
                input.amount = default_amount(input.period, input.currency, self.config.ppp_rate);
            }
            Field::Currency => {
                input.currency = input.currency.toggle();
                input.amount = default_amount(input.period, input.currency, self.config.ppp_rate);
            }
            Field::Income => {
                let step = match input.period {
                    crate::domain::Period::Annual => 1_000.0,
                    crate::domain::Period::Monthly => 100.0,
                };
                let max = max_amount(input.period, input.currency);
                input.amount = (input.amount + f64::from(delta) * step).clamp(0.0, max);
            }
            Field::Standardize => {
                input.standardize = !input.standardize;
            }
        }
        self.requery();
    }

    fn rebuild_comparator(&mut self) {
        match pipeline::build_comparator(&self.table, self.config.ppp_rate) {
            Ok(comparator) => {
                self.comparator = comparator;
                self.requery();
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn requery(&mut self) {
        self.query = pipeline::run_query(&self.comparator, &self.config);
        self.status = if self.query.standardization_fallback {
            self.strings().standardize_warning.to_string()
        } else {
            String::new()
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let s = self.strings();
        let line = Line::from(vec![
            Span::styled(s.page_title, Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  ({} rows)", self.table.len()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line)
            .alignment(self.alignment())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(13),
                Constraint::Min(0),
                Constraint::Length(self.query.summary.rows.len() as u16 + 5),
            ])
            .split(area);

        let (settings_width, results_width) = (Constraint::Length(42), Constraint::Min(0));
        let constraints = if self.rtl() {
            [results_width, settings_width]
        } else {
            [settings_width, results_width]
        };
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[0]);
        let (settings_area, results_area) = if self.rtl() { (top[1], top[0]) } else { (top[0], top[1]) };

        self.draw_settings(frame, settings_area);
        self.draw_results(frame, results_area);
        self.draw_chart(frame, rows[1]);
        self.draw_key_table(frame, rows[2]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let s = self.strings();
        let input = &self.config.input;
        let income = if self.editing_income {
            format!("{}{}_", input.currency.symbol(), self.income_input)
        } else {
            fmt_money(input.currency, input.amount, 0)
        };
        let yes_no = |v: bool| if v { s.yes } else { s.no };

        let items: Vec<ListItem> = FIELDS
            .iter()
            .map(|field| {
                let (label, value) = match field {
                    Field::Language => (s.language, s.language_name.to_string()),
                    Field::Ppp => (s.ppp_rate, format!("{:.2}", self.config.ppp_rate)),
                    Field::Household => (s.household_size, input.household_size.to_string()),
                    Field::Period => (s.income_period, period_label(s, input.period).to_string()),
                    Field::Currency => (s.currency, input.currency.code().to_string()),
                    Field::Income => (s.income, income.clone()),
                    Field::Standardize => (s.standardize, yes_no(input.standardize).to_string()),
                };
                ListItem::new(Line::from(format!("{label}: {value}")).alignment(self.alignment()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title(s.config).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let s = self.strings();
        let q = &self.query;
        let r = &q.result;
        let mut lines: Vec<Line> = Vec::new();

        let figures = if self.config.input.standardize {
            &q.income.standardized
        } else {
            &q.income.raw
        };
        let heading = if self.config.input.standardize { s.std_income } else { s.raw_income };
        lines.push(Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))));
        lines.push(Line::from(format!(
            "{} {}  {} {}",
            s.annual_usd_short,
            fmt_money(crate::domain::Currency::Usd, figures.annual_usd, 2),
            s.annual_ils_short,
            fmt_money(crate::domain::Currency::Ils, figures.annual_ils, 2),
        )));
        lines.push(Line::from(format!(
            "{} {}  {} {}",
            s.monthly_usd_short,
            fmt_money(crate::domain::Currency::Usd, figures.monthly_usd, 2),
            s.monthly_ils_short,
            fmt_money(crate::domain::Currency::Ils, figures.monthly_ils, 2),
        )));
        if self.config.input.standardize {
            lines.push(Line::from(fill(
                s.divided_by,
                &[&q.income.household_size.to_string(), &format!("{:.3}", q.income.scale)],
            )));
        }
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(
            s.percentile_position,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", s.us_dist)),
            Span::styled(format!("{:.1}%", r.us_percentile), Style::default().fg(Color::Cyan)),
            Span::raw(format!("  {} ", s.il_dist)),
            Span::styled(format!("{:.1}%", r.israel_percentile), Style::default().fg(Color::Magenta)),
            Span::raw(format!("  {} {:.1} {}", s.difference, r.percentile_difference, s.points)),
        ]));
        if r.series == Series::Standardized {
            lines.push(Line::from(Span::styled(s.using_precalc, Style::default().fg(Color::Gray))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(
            Interpretation::classify(r.percentile_difference).sentence(s),
        ));
        if q.standardization_fallback {
            lines.push(Line::from(Span::styled(
                s.standardize_warning,
                Style::default().fg(Color::Yellow),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .alignment(self.alignment())
            .wrap(Wrap { trim: true })
            .block(Block::default().title(s.results).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let s = self.strings();
        let block = Block::default().title(s.visual_analysis).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let selected = match self.chart {
            ChartKind::Income => 0,
            ChartKind::Distribution => 1,
        };
        let tabs = Tabs::new(vec![s.your_position, s.income_distributions])
            .select(selected)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, split[0]);

        let series = chart_series(&self.comparator, &self.query, self.config.input.standardize, self.rtl());
        let overlay = match self.chart {
            ChartKind::Income => Some(series.overlay),
            ChartKind::Distribution => None,
        };
        let label = match series.series {
            Series::Raw => s.chart_raw,
            Series::Standardized => s.chart_standardized,
        };
        let y_label = fill(s.chart_annual_income, &[label]);

        let widget = DistributionChart {
            us: &series.us,
            israel: &series.israel,
            overlay,
            x_bounds: [0.0, 100.0],
            y_bounds: series.y_bounds,
            x_label: s.chart_percentile,
            y_label: &y_label,
            fmt_x: if self.rtl() { fmt_axis_x_mirrored } else { fmt_axis_x },
            fmt_y: fmt_axis_y_usd,
        };
        frame.render_widget(widget, split[1]);
    }

    fn draw_key_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let s = self.strings();
        let text = format_key_table(&self.query.summary, self.config.language);
        let p = Paragraph::new(text)
            .alignment(self.alignment())
            .block(Block::default().title(s.key_thresholds).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(self.strings().tui_help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line)
            .alignment(self.alignment())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Data prepared for the Plotters chart.
struct ChartSeries {
    series: Series,
    us: Vec<(f64, f64)>,
    israel: Vec<(f64, f64)>,
    overlay: IncomeOverlay,
    y_bounds: [f64; 2],
}

/// Build chart series; x is mirrored (`100 - percentile`) for right-to-left layouts.
fn chart_series(comparator: &IncomeComparator, query: &QueryOutput, standardized: bool, mirror: bool) -> ChartSeries {
    let x = |p: f64| if mirror { 100.0 - p } else { p };
    let (series, points) = comparator.distribution(standardized);

    let us: Vec<(f64, f64)> = points.iter().map(|p| (x(p.percentile), p.us_income_usd)).collect();
    let israel: Vec<(f64, f64)> = points.iter().map(|p| (x(p.percentile), p.israel_income_usd)).collect();

    let income = query.result.income_usd;
    let overlay = IncomeOverlay {
        income,
        us_x: x(query.result.us_percentile),
        israel_x: x(query.result.israel_percentile),
    };

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for y in us.iter().chain(&israel).map(|&(_, y)| y).chain([income]) {
        if y.is_finite() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    ChartSeries {
        series,
        us,
        israel,
        overlay,
        y_bounds: [y_min - pad, y_max + pad],
    }
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_x_mirrored(v: f64) -> String {
    format!("{:.0}", 100.0 - v)
}

fn fmt_axis_y_usd(v: f64) -> String {
    if v.abs() >= 1_000.0 {
        format!("${}k", group_thousands(v / 1_000.0, 0))
    } else {
        format!("${v:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, DEFAULT_KEY_PERCENTILES, IncomeInput, Language, PercentileRow, Period};

    fn app() -> App {
        let table = PercentileTable::from_rows(&[
            PercentileRow::raw(10.0, 20_000.0, 74_000.0),
            PercentileRow::raw(50.0, 50_000.0, 185_000.0),
            PercentileRow::raw(90.0, 120_000.0, 444_000.0),
        ])
        .unwrap();
        let config = CalculatorConfig {
            data_path: "data.csv".into(),
            ppp_rate: 3.7,
            language: Language::En,
            input: IncomeInput {
                amount: 50_000.0,
                period: Period::Annual,
                currency: Currency::Usd,
                household_size: 1,
                standardize: false,
            },
            key_percentiles: DEFAULT_KEY_PERCENTILES.to_vec(),
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_json: None,
            export_table: None,
        };
        App::new(table, config).unwrap()
    }

    fn select(app: &mut App, field: Field) {
        app.selected_field = FIELDS.iter().position(|f| *f == field).unwrap();
    }

    #[test]
    fn ppp_change_rebuilds_the_comparator() {
        let mut app = app();
        select(&mut app, Field::Ppp);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.config.ppp_rate, 3.8);
        assert_eq!(app.comparator.ppp_rate(), 3.8);
        // Israeli incomes are worth less in USD, so the same income ranks higher there.
        assert!(app.query.result.israel_percentile > 50.0);
        assert!((app.query.result.us_percentile - 50.0).abs() < 1e-9);
    }

    #[test]
    fn ppp_and_household_are_clamped() {
        let mut app = app();
        select(&mut app, Field::Ppp);
        for _ in 0..100 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.config.ppp_rate, PPP_MAX);

        select(&mut app, Field::Household);
        for _ in 0..30 {
            app.handle_key(KeyCode::Left);
        }
        assert_eq!(app.config.input.household_size, HOUSEHOLD_MIN);
    }

    #[test]
    fn switching_currency_resets_the_default_amount() {
        let mut app = app();
        select(&mut app, Field::Currency);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.config.input.currency, Currency::Ils);
        assert_eq!(app.config.input.amount, 185_000.0);
        assert!((app.query.result.income_usd - 50_000.0).abs() < 1e-9);
    }

    #[test]
    fn income_edit_applies_on_enter_and_rejects_garbage() {
        let mut app = app();
        select(&mut app, Field::Income);
        app.handle_key(KeyCode::Enter);
        assert!(app.editing_income);
        for _ in 0..10 {
            app.handle_key(KeyCode::Backspace);
        }
        for c in "120000".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert!(!app.editing_income);
        assert_eq!(app.config.input.amount, 120_000.0);
        assert!((app.query.result.us_percentile - 90.0).abs() < 1e-9);

        app.handle_key(KeyCode::Enter);
        for _ in 0..10 {
            app.handle_key(KeyCode::Backspace);
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.config.input.amount, 120_000.0);
        assert!(app.status.contains("Invalid income"));
    }

    #[test]
    fn standardize_toggle_without_data_warns() {
        let mut app = app();
        select(&mut app, Field::Standardize);
        app.handle_key(KeyCode::Char(' '));
        assert!(app.config.input.standardize);
        assert!(app.query.standardization_fallback);
        assert_eq!(app.status, app.strings().standardize_warning);
    }

    #[test]
    fn quit_and_chart_tabs() {
        let mut app = app();
        assert_eq!(app.chart, ChartKind::Income);
        assert!(!app.handle_key(KeyCode::Tab));
        assert_eq!(app.chart, ChartKind::Distribution);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn mirrored_series_for_hebrew() {
        let app = app();
        let ltr = chart_series(&app.comparator, &app.query, false, false);
        let rtl = chart_series(&app.comparator, &app.query, false, true);
        assert_eq!(ltr.us[0].0, 10.0);
        assert_eq!(rtl.us[0].0, 90.0);
        assert_eq!(ltr.y_bounds, rtl.y_bounds);
        assert_eq!(fmt_axis_x_mirrored(90.0), "10");
        assert_eq!(fmt_axis_y_usd(120_000.0), "$120k");
    }
}
