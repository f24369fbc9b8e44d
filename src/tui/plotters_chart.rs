//! Plotters-powered curve panel widget for Ratatui.
//!
//! Plotters output is rendered into the Ratatui buffer through
//! `plotters-ratatui-backend`; the crate's `widget_fn` helper hides the
//! backend types.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

const MODEL_COLOR: RGBColor = RGBColor(0, 255, 255);
const OBSERVED_COLOR: RGBColor = RGBColor(160, 160, 160);

/// Smallest area Plotters can lay out a chart in.
const MIN_WIDTH: u16 = 20;
const MIN_HEIGHT: u16 = 8;

/// A render-only description of one panel (model line over observations).
///
/// All series and bounds are computed outside the render call.
pub struct CurvePanelChart<'a> {
    /// Noiseless model, drawn as a line.
    pub model: &'a [(f64, f64)],
    /// Simulated observations, drawn as dots.
    pub observed: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl CurvePanelChart<'_> {
    fn draw<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            // Terminal cells are low-res, so keep label areas compact.
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

        // Pixels, not `Circle`: the backend scales circle radii into canvas
        // units and they come out huge.
        chart.draw_series(
            self.observed
                .iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|&(x, y)| Pixel::new((x, y), OBSERVED_COLOR)),
        )?;

        // The model goes last so it stays visible over the scatter.
        chart.draw_series(LineSeries::new(self.model.iter().copied(), &MODEL_COLOR))?;

        Ok(())
    }
}

impl Widget for CurvePanelChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if !drawable_bounds(self.x_bounds, self.y_bounds) {
            return;
        }

        let widget = widget_fn(move |root| {
            self.draw(root)?;
            Ok(())
        });
        widget.render(area, buf);
    }
}

/// Plotters needs finite, non-empty ranges on both axes.
fn drawable_bounds(x: [f64; 2], y: [f64; 2]) -> bool {
    let ok = |[lo, hi]: [f64; 2]| lo.is_finite() && hi.is_finite() && hi > lo;
    ok(x) && ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_inverted_ranges_are_not_drawn() {
        assert!(drawable_bounds([-1.0, 1.0], [0.98, 1.01]));
        assert!(!drawable_bounds([1.0, 1.0], [0.0, 1.0]));
        assert!(!drawable_bounds([0.0, 1.0], [2.0, 1.0]));
        assert!(!drawable_bounds([f64::NAN, 1.0], [0.0, 1.0]));
        assert!(!drawable_bounds([0.0, 1.0], [0.0, f64::INFINITY]));
    }
}
