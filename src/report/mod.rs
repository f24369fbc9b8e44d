//! Reporting utilities: curve summary statistics and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{CurveResult, PlotPayload};

/// Headline numbers for a simulated plot.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveStats {
    /// `1 - min(flux)` of the noiseless light curve.
    pub transit_depth: f64,
    /// Half the peak-to-peak range of the noiseless RV curve (km/s).
    pub rv_semi_amplitude: f64,
    /// Mean of the noiseless RV curve (km/s).
    pub rv_mean: f64,
    /// RMS of `observed - model` for each panel.
    pub transit_scatter: f64,
    pub rv_scatter: f64,
}

pub fn compute_stats(payload: &PlotPayload) -> CurveStats {
    let flux = &payload.transit.curve.model;
    let rv = &payload.rv.curve.model;

    let min_flux = flux.iter().cloned().fold(f64::INFINITY, f64::min);
    let (rv_min, rv_max) = rv
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    CurveStats {
        transit_depth: if min_flux.is_finite() { 1.0 - min_flux } else { 0.0 },
        rv_semi_amplitude: if rv.is_empty() { 0.0 } else { 0.5 * (rv_max - rv_min) },
        rv_mean: mean(rv),
        transit_scatter: scatter(&payload.transit.curve),
        rv_scatter: scatter(&payload.rv.curve),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn scatter(curve: &CurveResult) -> f64 {
    if curve.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = curve
        .observed
        .iter()
        .zip(&curve.model)
        .map(|(o, m)| (o - m).powi(2))
        .sum();
    (sum_sq / curve.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::{InputValues, Panel};

    #[test]
    fn stats_basic() {
        let transit = CurveResult {
            times: vec![0.0, 1.0, 2.0],
            model: vec![1.0, 0.99, 1.0],
            observed: vec![1.0, 0.99, 1.0],
        };
        let rv = CurveResult {
            times: vec![0.0, 1.0, 2.0, 3.0],
            model: vec![20.0, 20.05, 20.0, 19.95],
            observed: vec![20.01, 20.04, 20.01, 19.94],
        };
        let payload = PlotPayload {
            tool: "exo".to_string(),
            generated: Utc::now(),
            planet_name: None,
            inputs: InputValues::new(),
            transit: Panel::transit(transit),
            rv: Panel::rv(rv),
        };

        let stats = compute_stats(&payload);
        assert!((stats.transit_depth - 0.01).abs() < 1e-12);
        assert!((stats.rv_semi_amplitude - 0.05).abs() < 1e-12);
        assert!((stats.rv_mean - 20.0).abs() < 1e-12);
        assert_eq!(stats.transit_scatter, 0.0);
        assert!((stats.rv_scatter - 0.01).abs() < 1e-9);
    }
}
