//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - simulated observations: `.`
//! - noiseless model: `-` line (drawn over the observations)

use crate::domain::{Panel, PlotPayload};

/// Render both panels of a payload, one above the other.
pub fn render_payload(payload: &PlotPayload, width: usize, height: usize) -> String {
    let mut out = render_panel(&payload.transit, width, height);
    out.push('\n');
    out.push_str(&render_panel(&payload.rv, width, height));
    out
}

/// Render one panel.
pub fn render_panel(panel: &Panel, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let model = panel.curve.model_points();
    let observed = panel.curve.observed_points();

    let (t_min, t_max) = x_range(&model).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(&model, &observed).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for &(t, y) in &observed {
        if !(t.is_finite() && y.is_finite()) {
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        grid[yy][x] = '.';
    }

    draw_curve(&mut grid, &model, t_min, t_max, y_min, y_max);

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "{}: x=[{t_min:.3}, {t_max:.3}] {} | y=[{y_min:.4}, {y_max:.4}] {}\n",
        panel.title, panel.x_label, panel.y_label
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_t = f64::INFINITY;
    let mut max_t = f64::NEG_INFINITY;
    for &(t, _) in points {
        min_t = min_t.min(t);
        max_t = max_t.max(t);
    }
    if min_t.is_finite() && max_t.is_finite() && max_t > min_t {
        Some((min_t, max_t))
    } else {
        None
    }
}

fn y_range(model: &[(f64, f64)], observed: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(_, y) in model.iter().chain(observed) {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        // Flat curve: open a small band around it.
        let half = (min_y.abs() * 1e-3).max(1e-6);
        Some((min_y - half, max_y + half))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        if !(t.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
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
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
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
    use crate::domain::CurveResult;

    #[test]
    fn plot_golden_snapshot_small() {
        let curve = CurveResult {
            times: vec![0.0, 9.0],
            model: vec![1.0, 1.0],
            observed: vec![1.0, 2.0],
        };
        let panel = Panel::rv(curve);

        let txt = render_panel(&panel, 10, 5);
        let expected = concat!(
            "Radial velocity curve: x=[0.000, 9.000] Time [d] | y=[0.9500, 2.0500] RV [km/s]\n",
            "         .\n",
            "          \n",
            "          \n",
            "          \n",
            "----------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_curve_still_renders() {
        let curve = CurveResult {
            times: vec![-1.0, 0.0, 1.0],
            model: vec![1.0, 1.0, 1.0],
            observed: vec![1.0, 1.0, 1.0],
        };
        let txt = render_panel(&Panel::transit(curve), 12, 6);
        assert_eq!(txt.lines().count(), 7);
        assert!(txt.contains("------------"));
    }
}
