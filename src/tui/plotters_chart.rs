//! Sales chart widget: Plotters drawing into a Ratatui buffer via
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Precomputed chart inputs. `render()` does no data work.
pub struct SalesPlottersChart<'a> {
    /// Daily sales as `(date ordinal, sales)`.
    pub sales: &'a [(f64, f64)],
    /// Trend line samples (empty when there is no trend).
    pub trend: &'a [(f64, f64)],
    /// X bounds (date ordinals).
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// Tick label formatters.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

const MIN_WIDTH: u16 = 20;
const MIN_HEIGHT: u16 = 8;

impl<'a> Widget for SalesPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters cannot lay out axes in a tiny area.
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let hint = format!("Enlarge the terminal to see the chart ({MIN_WIDTH}x{MIN_HEIGHT} min).");
            buf.set_string(area.x, area.y, hint, Style::default().fg(Color::Yellow));
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        let usable = |lo: f64, hi: f64| lo.is_finite() && hi.is_finite() && lo < hi;
        if !usable(x0, x1) || !usable(y0, y1) {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 8)
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

            let sales_color = RGBColor(0, 255, 255); // cyan
            let trend_color = RGBColor(255, 0, 0); // red

            // 1) Sales line with a dot per day.
            chart.draw_series(LineSeries::new(self.sales.iter().copied(), &sales_color))?;
            chart.draw_series(self.sales.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            // 2) Trend line.
            if self.trend.len() >= 2 {
                chart.draw_series(LineSeries::new(self.trend.iter().copied(), &trend_color))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
