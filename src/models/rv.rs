//! Keplerian radial-velocity model.
//!
//! A single planet on a Keplerian orbit induces a stellar reflex velocity
//!
//! ```text
//! v(t) = K [cos(ν(t) + ω) + e cos ω] + dvdt (t - epoch) + curv (t - epoch)²
//! ```
//!
//! where `ν` is the true anomaly. The orbit is parameterized by the time of
//! inferior conjunction (`tc`), which is converted to a time of periastron for
//! evaluation. Internally velocities are in m/s; inputs and outputs are km/s.

use rand::Rng;

use crate::domain::{CurveResult, InputValues, SAMPLE_COUNT};
use crate::math::{linspace, time_of_periastron, true_anomaly_at};
use crate::models::{ModelError, add_gaussian_noise, check_eccentricity, effective_omega_deg};

const MS_PER_KMS: f64 = 1000.0;

/// Typed RV inputs (already validated).
#[derive(Debug, Clone, PartialEq)]
pub struct RvInputs {
    /// Orbital period (days).
    pub period: f64,
    pub ecc: f64,
    /// Argument of periastron (degrees), as supplied.
    pub omega_deg: f64,
    /// Semi-amplitude (km/s).
    pub k: f64,
    /// Systemic velocity (km/s).
    pub vsys: f64,
    /// Noise sigma (m/s).
    pub yerr: f64,
}

impl TryFrom<&InputValues> for RvInputs {
    type Error = ModelError;

    fn try_from(values: &InputValues) -> Result<Self, Self::Error> {
        Ok(Self {
            period: values.number("period")?,
            ecc: check_eccentricity(values.number("ecc")?)?,
            omega_deg: values.number("omega")?,
            k: values.number("K")?,
            vsys: values.number("vsys")?,
            yerr: values.number("yerr_rv")?,
        })
    }
}

/// Single-planet Keplerian signal with optional trend terms (m/s).
#[derive(Debug, Clone, PartialEq)]
pub struct KeplerSignal {
    pub period: f64,
    /// Time of inferior conjunction (days).
    pub tc: f64,
    pub ecc: f64,
    /// Argument of periastron (radians).
    pub omega: f64,
    /// Semi-amplitude (m/s).
    pub k: f64,
    /// Linear trend (m/s/day).
    pub dvdt: f64,
    /// Quadratic trend (m/s/day²).
    pub curv: f64,
    /// Reference time for the trend terms.
    pub epoch: f64,
}

impl KeplerSignal {
    /// The signal for `inputs` with conjunction at `t = 0` and no trend.
    pub fn from_inputs(inputs: &RvInputs) -> Self {
        Self {
            period: inputs.period,
            tc: 0.0,
            ecc: inputs.ecc,
            omega: effective_omega_deg(inputs.ecc, inputs.omega_deg).to_radians(),
            k: inputs.k * MS_PER_KMS,
            dvdt: 0.0,
            curv: 0.0,
            epoch: 0.0,
        }
    }

    /// Velocity (m/s) at each time (days).
    ///
    /// A non-positive period has no orbit to evaluate; only the trend remains.
    pub fn evaluate(&self, times: &[f64]) -> Vec<f64> {
        let tp = time_of_periastron(self.tc, self.period, self.ecc, self.omega);
        times
            .iter()
            .map(|&t| {
                let dt = t - self.epoch;
                let trend = self.dvdt * dt + self.curv * dt * dt;
                if self.period <= 0.0 {
                    return trend;
                }
                let nu = true_anomaly_at(t, tp, self.period, self.ecc);
                self.k * ((nu + self.omega).cos() + self.ecc * self.omega.cos()) + trend
            })
            .collect()
    }
}

/// RV curve generator.
#[derive(Debug, Clone)]
pub struct RvModel {
    samples: usize,
}

impl Default for RvModel {
    fn default() -> Self {
        Self::new(SAMPLE_COUNT)
    }
}

impl RvModel {
    pub fn new(samples: usize) -> Self {
        Self { samples }
    }

    /// One full period of sample times (days), centred on conjunction.
    pub fn window(&self, period: f64) -> Vec<f64> {
        linspace(-period / 2.0, period / 2.0, self.samples)
    }

    /// RV curve (km/s, including the systemic velocity) plus one simulated observation.
    ///
    /// The noiseless and noisy curves come from two separate evaluations of the
    /// signal: the noiseless one adds `vsys` straight to the model, the noisy one
    /// adds noise to the raw model first and `vsys` afterwards.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        inputs: &RvInputs,
        rng: &mut R,
    ) -> Result<CurveResult, ModelError> {
        let times = self.window(inputs.period);
        let signal = KeplerSignal::from_inputs(inputs);
        let vsys_ms = inputs.vsys * MS_PER_KMS;

        let raw = signal.evaluate(&times);
        let observed = add_gaussian_noise(&raw, inputs.yerr, rng)?
            .into_iter()
            .map(|v| (v + vsys_ms) / MS_PER_KMS)
            .collect();

        let model = signal
            .evaluate(&times)
            .into_iter()
            .map(|v| (v + vsys_ms) / MS_PER_KMS)
            .collect();

        Ok(CurveResult {
            times,
            model,
            observed,
        })
    }
}

/// Compute an RV curve and one noisy realization from loosely typed inputs.
pub fn rvcurve<R: Rng + ?Sized>(
    values: &InputValues,
    rng: &mut R,
) -> Result<CurveResult, ModelError> {
    let inputs = RvInputs::try_from(values)?;
    RvModel::default().simulate(&inputs, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn ten_day_planet() -> InputValues {
        InputValues::from_json(json!({
            "period": 10,
            "ecc": 0,
            "omega": 0,
            "K": 0.05,
            "vsys": 20,
            "yerr_rv": 10,
        }))
        .unwrap()
    }

    #[test]
    fn rvcurve_has_fixed_length_over_one_period() {
        let mut rng = StdRng::seed_from_u64(3);
        let curve = rvcurve(&ten_day_planet(), &mut rng).unwrap();

        assert_eq!(curve.times.len(), SAMPLE_COUNT);
        assert_eq!(curve.model.len(), SAMPLE_COUNT);
        assert_eq!(curve.observed.len(), SAMPLE_COUNT);
        assert_eq!(curve.times[0], -5.0);
        assert_eq!(curve.times[SAMPLE_COUNT - 1], 5.0);
    }

    #[test]
    fn circular_orbit_oscillates_about_systemic_velocity() {
        let mut rng = StdRng::seed_from_u64(3);
        let curve = rvcurve(&ten_day_planet(), &mut rng).unwrap();

        let max = curve.model.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = curve.model.iter().cloned().fold(f64::INFINITY, f64::min);
        let mean = curve.model.iter().sum::<f64>() / curve.len() as f64;

        assert!((max - 20.05).abs() < 1e-4, "max {max}");
        assert!((min - 19.95).abs() < 1e-4, "min {min}");
        assert!((mean - 20.0).abs() < 1e-3, "mean {mean}");
    }

    #[test]
    fn star_approaches_after_conjunction() {
        // Circular orbit with conjunction at t = 0: v(t) = -K sin(2π t / P).
        let inputs = RvInputs::try_from(&ten_day_planet()).unwrap();
        let signal = KeplerSignal::from_inputs(&inputs);
        let v = signal.evaluate(&[0.0, 2.5, -2.5]);

        assert!(v[0].abs() < 1e-9);
        assert!((v[1] + 50.0).abs() < 1e-9, "v(P/4) = {}", v[1]);
        assert!((v[2] - 50.0).abs() < 1e-9, "v(-P/4) = {}", v[2]);
    }

    #[test]
    fn circular_orbit_ignores_supplied_omega() {
        let mut a = ten_day_planet();
        let mut b = ten_day_planet();
        a.set("omega", 10.0);
        b.set("omega", 200.0);

        let sa = KeplerSignal::from_inputs(&RvInputs::try_from(&a).unwrap());
        let sb = KeplerSignal::from_inputs(&RvInputs::try_from(&b).unwrap());
        assert_eq!(sa.omega, 90f64.to_radians());
        assert_eq!(sa, sb);
    }

    #[test]
    fn eccentric_orbit_keeps_supplied_omega() {
        let mut values = ten_day_planet();
        values.set("ecc", 0.4);
        values.set("omega", 30.0);
        let signal = KeplerSignal::from_inputs(&RvInputs::try_from(&values).unwrap());
        assert!((signal.omega - 30f64.to_radians()).abs() < 1e-15);

        // Eccentric signals are asymmetric but still span 2K peak to peak.
        let times = linspace(0.0, 10.0, 20_001);
        let v = signal.evaluate(&times);
        let max = v.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = v.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!((max - min - 100.0).abs() < 0.1, "peak-to-peak {}", max - min);
    }

    #[test]
    fn noiseless_and_noisy_paths_agree_without_noise() {
        // The two paths apply the systemic offset in a different order; with zero
        // noise they must still describe the same curve.
        let mut values = ten_day_planet();
        values.set("yerr_rv", 0.0);
        let mut rng = StdRng::seed_from_u64(11);
        let curve = rvcurve(&values, &mut rng).unwrap();

        for (m, o) in curve.model.iter().zip(&curve.observed) {
            assert!((m - o).abs() < 1e-12);
        }
    }

    #[test]
    fn noisy_curve_is_scattered_in_km_per_second() {
        let mut rng = StdRng::seed_from_u64(5);
        let curve = rvcurve(&ten_day_planet(), &mut rng).unwrap();

        assert_ne!(curve.model, curve.observed);
        let n = curve.len() as f64;
        let diffs: Vec<f64> = curve
            .observed
            .iter()
            .zip(&curve.model)
            .map(|(o, m)| o - m)
            .collect();
        let mean = diffs.iter().sum::<f64>() / n;
        let std = (diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();

        // 10 m/s noise is 0.01 km/s after conversion.
        assert!(mean.abs() < 0.0015, "mean deviation {mean}");
        assert!((std - 0.01).abs() < 0.0015, "std {std}");
    }

    #[test]
    fn zero_period_gives_flat_systemic_curve() {
        let mut values = ten_day_planet();
        values.set("period", 0.0);
        values.set("yerr_rv", 0.0);
        let mut rng = StdRng::seed_from_u64(2);
        let curve = rvcurve(&values, &mut rng).unwrap();

        assert!(curve.times.iter().all(|t| *t == 0.0));
        assert!(curve.model.iter().all(|v| (v - 20.0).abs() < 1e-12));
    }

    #[test]
    fn string_inputs_are_coerced() {
        let values = InputValues::from_json(json!({
            "period": "10",
            "ecc": "0",
            "omega": "90",
            "K": "0.05",
            "vsys": "20",
            "yerr_rv": "10",
        }))
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(rvcurve(&values, &mut rng).is_ok());
    }
}
