//! Plotters-powered distribution chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// The user's income drawn over the distributions.
#[derive(Debug, Clone, Copy)]
pub struct IncomeOverlay {
    pub income: f64,
    /// Chart x of the US percentile.
    pub us_x: f64,
    /// Chart x of the Israeli percentile.
    pub israel_x: f64,
}

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call; x values are
/// already mirrored for right-to-left layouts.
pub struct DistributionChart<'a> {
    /// US distribution (percentile, income USD).
    pub us: &'a [(f64, f64)],
    /// Israeli distribution (percentile, income USD at PPP).
    pub israel: &'a [(f64, f64)],
    pub overlay: Option<IncomeOverlay>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for DistributionChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 9)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let us_color = RGBColor(0, 255, 255); // cyan
            let israel_color = RGBColor(255, 0, 255); // magenta
            let income_color = RGBColor(160, 160, 160);
            let marker_color = RGBColor(255, 255, 0);

            chart.draw_series(LineSeries::new(self.us.iter().copied(), &us_color))?;
            chart.draw_series(LineSeries::new(self.israel.iter().copied(), &israel_color))?;

            if let Some(overlay) = self.overlay {
                chart.draw_series(LineSeries::new(
                    [(x0, overlay.income), (x1, overlay.income)],
                    &income_color,
                ))?;
                // Pixels rather than circles: the backend scales circle radii
                // in canvas units, which blows them up.
                chart.draw_series(
                    [overlay.us_x, overlay.israel_x]
                        .into_iter()
                        .map(|x| Pixel::new((x, overlay.income), marker_color)),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
