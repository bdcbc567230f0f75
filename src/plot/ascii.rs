//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual comparison of the two distributions in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - US distribution: `-` line
//! - Israel distribution (USD at PPP): `~` line
//! - income overlay: `.` horizontal line, `U` / `I` at the two percentiles
//!
//! For right-to-left languages the percentile axis runs right to left.

use crate::compare::DistributionPoint;
use crate::domain::{ComparisonResult, Language, Series};
use crate::i18n::{Strings, TextDirection, fill};
use crate::report::{align_for, group_thousands};

const US_GLYPH: char = '-';
const ISRAEL_GLYPH: char = '~';
const INCOME_GLYPH: char = '.';
const US_MARKER: char = 'U';
const ISRAEL_MARKER: char = 'I';

/// Render the US and Israeli distributions on one chart.
pub fn render_distribution_plot(
    points: &[DistributionPoint],
    series: Series,
    language: Language,
    width: usize,
    height: usize,
) -> String {
    let s = language.strings();
    let label = series_label(s, series);

    let mut header = vec![
        fill(s.chart_distributions_title, &[label]),
        legend(s, series),
    ];
    let canvas = Canvas::new(points, None, language.direction(), width, height);
    header.push(canvas.axis_line(s, label));

    let mut grid = canvas.blank();
    canvas.draw_distributions(&mut grid, points);

    finish(language, header, grid)
}

/// Render both distributions with the income line and the two percentile markers.
pub fn render_income_plot(
    points: &[DistributionPoint],
    series: Series,
    result: &ComparisonResult,
    language: Language,
    width: usize,
    height: usize,
) -> String {
    let s = language.strings();
    let label = series_label(s, series);
    let income = result.income_usd;

    let mut header = vec![
        fill(s.chart_income_title, &[&group_thousands(income, 0)]),
        legend(s, series),
        format!(
            "{US_MARKER} {}  {ISRAEL_MARKER} {}",
            fill(s.chart_us_label, &[&format!("{:.1}", result.us_percentile)]),
            fill(s.chart_il_label, &[&format!("{:.1}", result.israel_percentile)]),
        ),
    ];
    let canvas = Canvas::new(points, Some(income), language.direction(), width, height);
    header.push(canvas.axis_line(s, label));

    let mut grid = canvas.blank();
    canvas.draw_distributions(&mut grid, points);

    let y = canvas.map_y(income);
    for cell in grid[y].iter_mut().filter(|c| **c == ' ') {
        *cell = INCOME_GLYPH;
    }
    grid[y][canvas.map_x(result.us_percentile)] = US_MARKER;
    grid[y][canvas.map_x(result.israel_percentile)] = ISRAEL_MARKER;

    finish(language, header, grid)
}

/// Chart geometry: percentile 0..100 on x, income (USD) on y.
struct Canvas {
    width: usize,
    height: usize,
    y_min: f64,
    y_max: f64,
    direction: TextDirection,
}

impl Canvas {
    fn new(
        points: &[DistributionPoint],
        income: Option<f64>,
        direction: TextDirection,
        width: usize,
        height: usize,
    ) -> Self {
        let (y_min, y_max) = y_range(points, income).unwrap_or((0.0, 1.0));
        let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
        Self {
            width: width.max(10),
            height: height.max(5),
            y_min,
            y_max,
            direction,
        }
    }

    fn blank(&self) -> Vec<Vec<char>> {
        vec![vec![' '; self.width]; self.height]
    }

    fn axis_line(&self, s: &Strings, label: &str) -> String {
        format!(
            "x: {} [0, 100] | y: {} [{}, {}]",
            s.chart_percentile,
            fill(s.chart_annual_income, &[label]),
            group_thousands(self.y_min, 0),
            group_thousands(self.y_max, 0),
        )
    }

    fn map_x(&self, percentile: f64) -> usize {
        let u = (percentile / 100.0).clamp(0.0, 1.0);
        let x = (u * (self.width as f64 - 1.0)).round() as usize;
        match self.direction {
            TextDirection::Ltr => x,
            TextDirection::Rtl => self.width - 1 - x,
        }
    }

    fn map_y(&self, y: f64) -> usize {
        let u = ((y - self.y_min) / (self.y_max - self.y_min)).clamp(0.0, 1.0);
        // y=top is max -> row 0
        (self.height as f64 - 1.0 - (u * (self.height as f64 - 1.0))).round() as usize
    }

    fn draw_distributions(&self, grid: &mut [Vec<char>], points: &[DistributionPoint]) {
        let us: Vec<(usize, usize)> = points
            .iter()
            .map(|p| (self.map_x(p.percentile), self.map_y(p.us_income_usd)))
            .collect();
        let israel: Vec<(usize, usize)> = points
            .iter()
            .map(|p| (self.map_x(p.percentile), self.map_y(p.israel_income_usd)))
            .collect();
        draw_polyline(grid, &us, US_GLYPH);
        draw_polyline(grid, &israel, ISRAEL_GLYPH);
    }
}

fn series_label(s: &Strings, series: Series) -> &'static str {
    match series {
        Series::Raw => s.chart_raw,
        Series::Standardized => s.chart_standardized,
    }
}

fn legend(s: &Strings, series: Series) -> String {
    let label = series_label(s, series);
    format!(
        "{US_GLYPH} {}  {ISRAEL_GLYPH} {}",
        fill(s.chart_us_dist, &[label]),
        fill(s.chart_il_dist, &[label]),
    )
}

fn finish(language: Language, header: Vec<String>, grid: Vec<Vec<char>>) -> String {
    let mut out = String::new();
    for line in header {
        out.push_str(&line);
        out.push('\n');
    }
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    align_for(language.direction(), &out)
}

fn y_range(points: &[DistributionPoint], income: Option<f64>) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    let values = points
        .iter()
        .flat_map(|p| [p.us_income_usd, p.israel_income_usd])
        .chain(income);
    for y in values.filter(|y| y.is_finite()) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn draw_polyline(grid: &mut [Vec<char>], cells: &[(usize, usize)], ch: char) {
    let mut prev = None;
    for &(x, y) in cells {
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch);
        } else if grid[y][x] == ' ' {
            grid[y][x] = ch;
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<DistributionPoint> {
        vec![
            DistributionPoint {
                percentile: 0.0,
                us_income_usd: 0.0,
                israel_income_usd: 0.0,
            },
            DistributionPoint {
                percentile: 50.0,
                us_income_usd: 50_000.0,
                israel_income_usd: 25_000.0,
            },
            DistributionPoint {
                percentile: 100.0,
                us_income_usd: 100_000.0,
                israel_income_usd: 50_000.0,
            },
        ]
    }

    #[test]
    fn distribution_plot_golden_snapshot_small() {
        let txt = render_distribution_plot(&points(), Series::Raw, Language::En, 11, 5);
        let expected = concat!(
            "US vs Israel Household Income Distributions\n",
            "- US Household Income Distribution  ~ Israel Household Income Distribution (USD PPP)\n",
            "x: Percentile [0, 100] | y: Annual Household Income (USD) [-5,000, 105,000]\n",
            "         --\n",
            "       --  \n",
            "    --- ~~~\n",
            "  --~~~~   \n",
            "--~        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn income_plot_marks_both_percentiles_on_the_income_row() {
        let result = ComparisonResult {
            income_usd: 50_000.0,
            income_ils: 185_000.0,
            us_percentile: 50.0,
            israel_percentile: 100.0,
            percentile_difference: 50.0,
            series: Series::Raw,
        };
        let txt = render_income_plot(&points(), Series::Raw, &result, Language::En, 11, 5);
        let rows: Vec<&str> = txt.lines().skip(4).collect();
        assert_eq!(rows.len(), 5);
        let marked: Vec<&&str> = rows.iter().filter(|r| r.contains('U')).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].find('U'), Some(5));
        assert_eq!(marked[0].find('I'), Some(10));
        assert!(txt.starts_with("Income of $50,000 in US vs Israel Distributions\n"));
        assert!(txt.contains("U US: 50.0%  I Israel: 100.0%"));
    }

    #[test]
    fn hebrew_plot_mirrors_the_percentile_axis() {
        let en = render_distribution_plot(&points(), Series::Raw, Language::En, 11, 5);
        let he = render_distribution_plot(&points(), Series::Raw, Language::He, 11, 5);
        let en_rows: Vec<String> = en.lines().skip(3).map(str::to_string).collect();
        let he_rows: Vec<String> = he
            .lines()
            .skip(3)
            .map(|l| l.chars().rev().collect::<String>())
            .map(|l| l.chars().take(11).collect::<String>())
            .collect();
        assert_eq!(en_rows, he_rows);
    }
}
