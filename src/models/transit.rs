//! Transit light-curve model.
//!
//! The planet is an opaque disk of radius `p` (in stellar radii) crossing a
//! limb-darkened star. For each sample time we:
//!
//! 1. place the planet on its Keplerian orbit (mid-transit at `t = 0`)
//! 2. compute the sky-projected separation `z` between the centres
//! 3. integrate the stellar intensity over the annuli covered by the planet
//!
//! Limb darkening uses the 4-coefficient nonlinear law
//!
//! ```text
//! I(μ) / I(1) = 1 - Σ_{n=1..4} c_n (1 - μ^{n/2}),   μ = sqrt(1 - r²)
//! ```
//!
//! whose disk-integrated flux has the closed form
//! `π (1 - c1/5 - c2/3 - 3 c3/7 - c4/2)`.

use std::f64::consts::PI;

use rand::Rng;
use rayon::prelude::*;

use crate::domain::{CurveResult, InputValues, SAMPLE_COUNT};
use crate::math::{symmetric, time_of_periastron, true_anomaly_at};
use crate::models::{ModelError, add_gaussian_noise, check_eccentricity, effective_omega_deg};

/// Nonlinear limb-darkening coefficients `[c1, c2, c3, c4]`.
pub const LIMB_DARKENING: [f64; 4] = [0.5, 0.1, 0.1, -0.1];

/// Out-of-transit baseline added to the transit duration when sizing the window.
pub const WINDOW_PADDING_HOURS: f64 = 0.5;

/// Radial steps used to integrate the occulted intensity.
const INTEGRATION_STEPS: usize = 400;

const HOURS_PER_DAY: f64 = 24.0;

/// Typed transit inputs (already validated).
#[derive(Debug, Clone, PartialEq)]
pub struct TransitInputs {
    /// Orbital period (days).
    pub period: f64,
    pub rp_rs: f64,
    pub a_rs: f64,
    /// Inclination (degrees).
    pub inc_deg: f64,
    pub ecc: f64,
    /// Argument of periastron (degrees), as supplied.
    pub omega_deg: f64,
    /// Transit duration (hours).
    pub t14_hours: f64,
    /// Noise sigma (relative flux).
    pub yerr: f64,
}

impl TryFrom<&InputValues> for TransitInputs {
    type Error = ModelError;

    fn try_from(values: &InputValues) -> Result<Self, Self::Error> {
        Ok(Self {
            period: values.number("period")?,
            rp_rs: values.number("RpRs")?,
            a_rs: values.number("aRs")?,
            inc_deg: values.number("orbinc")?,
            ecc: check_eccentricity(values.number("ecc")?)?,
            omega_deg: values.number("omega")?,
            t14_hours: values.number("T14")?,
            yerr: values.number("yerr_lc")?,
        })
    }
}

impl TransitInputs {
    /// Whether the geometry can produce a transit at all.
    ///
    /// A zero radius ratio, semi-major axis or period means the catalog had no
    /// value; the curve stays flat.
    pub fn is_degenerate(&self) -> bool {
        !(self.rp_rs > 0.0 && self.a_rs > 0.0 && self.period > 0.0)
    }
}

/// Transit light-curve generator with a fixed limb-darkening law.
#[derive(Debug, Clone)]
pub struct TransitModel {
    limb_darkening: [f64; 4],
    samples: usize,
}

impl Default for TransitModel {
    fn default() -> Self {
        Self::new(LIMB_DARKENING, SAMPLE_COUNT)
    }
}

impl TransitModel {
    pub fn new(limb_darkening: [f64; 4], samples: usize) -> Self {
        Self {
            limb_darkening,
            samples,
        }
    }

    /// Sample times (days) covering the transit plus padding, centred on mid-transit.
    pub fn window(&self, t14_hours: f64) -> Vec<f64> {
        let half_width_days = (t14_hours + WINDOW_PADDING_HOURS) / HOURS_PER_DAY / 2.0;
        symmetric(half_width_days, self.samples)
    }

    /// Noiseless relative flux at each time (days).
    pub fn light_curve(&self, inputs: &TransitInputs, times: &[f64]) -> Vec<f64> {
        if inputs.is_degenerate() {
            return vec![1.0; times.len()];
        }

        let omega = effective_omega_deg(inputs.ecc, inputs.omega_deg).to_radians();
        let tp = time_of_periastron(0.0, inputs.period, inputs.ecc, omega);

        times
            .par_iter()
            .map(|&t| {
                let z = sky_separation(inputs, omega, tp, t);
                self.relative_flux(z, inputs.rp_rs)
            })
            .collect()
    }

    /// Light curve plus one simulated observation.
    ///
    /// Times in the result are in hours relative to mid-transit.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        inputs: &TransitInputs,
        rng: &mut R,
    ) -> Result<CurveResult, ModelError> {
        let times = self.window(inputs.t14_hours);
        let model = self.light_curve(inputs, &times);
        let observed = add_gaussian_noise(&model, inputs.yerr, rng)?;

        Ok(CurveResult {
            times: times.iter().map(|t| t * HOURS_PER_DAY).collect(),
            model,
            observed,
        })
    }

    /// Flux relative to the unocculted star for separation `z` and radius ratio `p`.
    pub fn relative_flux(&self, z: f64, p: f64) -> f64 {
        if p <= 0.0 || !z.is_finite() || z >= 1.0 + p {
            return 1.0;
        }
        1.0 - self.occulted_flux(z, p) / self.total_flux()
    }

    fn intensity(&self, r: f64) -> f64 {
        let mu = (1.0 - r * r).max(0.0).sqrt();
        let [c1, c2, c3, c4] = self.limb_darkening;
        1.0 - c1 * (1.0 - mu.sqrt())
            - c2 * (1.0 - mu)
            - c3 * (1.0 - mu * mu.sqrt())
            - c4 * (1.0 - mu * mu)
    }

    fn total_flux(&self) -> f64 {
        let [c1, c2, c3, c4] = self.limb_darkening;
        PI * (1.0 - c1 / 5.0 - c2 / 3.0 - 3.0 * c3 / 7.0 - c4 / 2.0)
    }

    /// Intensity integrated over the part of the stellar disk behind the planet.
    ///
    /// The annulus at radius `r` has area `2 θ(r) r dr` covered, where `θ` is the
    /// half-angle of the arc inside the planet disk.
    fn occulted_flux(&self, z: f64, p: f64) -> f64 {
        let r_lo = (z - p).max(0.0);
        let r_hi = (z + p).min(1.0);
        if r_hi <= r_lo {
            return 0.0;
        }

        let dr = (r_hi - r_lo) / INTEGRATION_STEPS as f64;
        let mut sum = 0.0;
        for i in 0..INTEGRATION_STEPS {
            let r = r_lo + (i as f64 + 0.5) * dr;
            sum += self.intensity(r) * 2.0 * covered_half_angle(r, z, p) * r;
        }
        sum * dr
    }
}

/// Half-angle of the arc of the circle of radius `r` (star-centred) that lies
/// inside the planet disk of radius `p` at distance `z`.
fn covered_half_angle(r: f64, z: f64, p: f64) -> f64 {
    if r <= p - z {
        return PI;
    }
    let cos_theta = (r * r + z * z - p * p) / (2.0 * r * z);
    cos_theta.clamp(-1.0, 1.0).acos()
}

/// Projected planet-star separation in stellar radii.
///
/// Returns infinity while the planet is behind the star, so only the primary
/// transit dims the light curve.
fn sky_separation(inputs: &TransitInputs, omega: f64, tp: f64, t: f64) -> f64 {
    let f = true_anomaly_at(t, tp, inputs.period, inputs.ecc);
    let inc = inputs.inc_deg.to_radians();
    let ecc = inputs.ecc;

    let r = inputs.a_rs * (1.0 - ecc * ecc) / (1.0 + ecc * f.cos());
    let s = (omega + f).sin() * inc.sin();
    if s < 0.0 {
        return f64::INFINITY;
    }
    r * (1.0 - s * s).max(0.0).sqrt()
}

/// Compute a transit light curve and one noisy realization from loosely typed inputs.
pub fn lightcurve<R: Rng + ?Sized>(
    values: &InputValues,
    rng: &mut R,
) -> Result<CurveResult, ModelError> {
    let inputs = TransitInputs::try_from(values)?;
    TransitModel::default().simulate(&inputs, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn hot_jupiter() -> InputValues {
        InputValues::from_json(json!({
            "period": 3.5,
            "RpRs": 0.1,
            "aRs": 10,
            "orbinc": 89,
            "ecc": 0,
            "omega": 0,
            "T14": 2,
            "yerr_lc": 0.004,
        }))
        .unwrap()
    }

    #[test]
    fn lightcurve_has_fixed_length_and_symmetric_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let curve = lightcurve(&hot_jupiter(), &mut rng).unwrap();

        assert_eq!(curve.times.len(), SAMPLE_COUNT);
        assert_eq!(curve.model.len(), SAMPLE_COUNT);
        assert_eq!(curve.observed.len(), SAMPLE_COUNT);
        assert!((curve.times[0] + 1.25).abs() < 1e-9, "start {}", curve.times[0]);
        assert!((curve.times[SAMPLE_COUNT - 1] - 1.25).abs() < 1e-9);
    }

    #[test]
    fn transit_dips_at_mid_transit() {
        let mut rng = StdRng::seed_from_u64(42);
        let curve = lightcurve(&hot_jupiter(), &mut rng).unwrap();

        let mid = curve.model[SAMPLE_COUNT / 2];
        // Depth ≈ p² scaled by the central limb-darkened intensity.
        assert!(mid < 0.995 && mid > 0.98, "mid-transit flux {mid}");
        assert!(curve.model.iter().all(|f| *f <= 1.0 && *f > 0.98));
    }

    #[test]
    fn window_edges_are_out_of_transit_for_long_windows() {
        let mut values = hot_jupiter();
        values.set("T14", 4.0);
        let inputs = TransitInputs::try_from(&values).unwrap();
        let model = TransitModel::default();
        let times = model.window(inputs.t14_hours);
        let flux = model.light_curve(&inputs, &times);

        assert_eq!(flux[0], 1.0);
        assert_eq!(flux[SAMPLE_COUNT - 1], 1.0);
        assert!(flux[SAMPLE_COUNT / 2] < 1.0);
    }

    #[test]
    fn zero_radius_ratio_is_flat() {
        let mut values = hot_jupiter();
        values.set("RpRs", 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let curve = lightcurve(&values, &mut rng).unwrap();
        assert!(curve.model.iter().all(|f| *f == 1.0));
    }

    #[test]
    fn zero_semi_major_axis_is_flat() {
        let mut values = hot_jupiter();
        values.set("aRs", 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let curve = lightcurve(&values, &mut rng).unwrap();
        assert!(curve.model.iter().all(|f| *f == 1.0));
    }

    #[test]
    fn circular_orbit_ignores_supplied_omega() {
        let mut a = hot_jupiter();
        let mut b = hot_jupiter();
        a.set("omega", 0.0);
        b.set("omega", 250.0);

        let model = TransitModel::default();
        let ia = TransitInputs::try_from(&a).unwrap();
        let ib = TransitInputs::try_from(&b).unwrap();
        let times = model.window(ia.t14_hours);

        assert_eq!(model.light_curve(&ia, &times), model.light_curve(&ib, &times));
    }

    #[test]
    fn eccentric_orbit_uses_supplied_omega() {
        let mut a = hot_jupiter();
        let mut b = hot_jupiter();
        a.set("ecc", 0.3);
        a.set("omega", 90.0);
        b.set("ecc", 0.3);
        b.set("omega", 270.0);

        let model = TransitModel::default();
        let ia = TransitInputs::try_from(&a).unwrap();
        let ib = TransitInputs::try_from(&b).unwrap();
        let times = model.window(ia.t14_hours);

        // Periastron vs apoastron at conjunction: different orbital speed, so
        // the ingress happens at different times.
        assert_ne!(model.light_curve(&ia, &times), model.light_curve(&ib, &times));
    }

    #[test]
    fn noise_is_applied_with_small_mean_offset() {
        let mut rng = StdRng::seed_from_u64(9);
        let curve = lightcurve(&hot_jupiter(), &mut rng).unwrap();

        assert_ne!(curve.model, curve.observed);
        let n = curve.len() as f64;
        let mean_dev = curve
            .observed
            .iter()
            .zip(&curve.model)
            .map(|(o, m)| o - m)
            .sum::<f64>()
            / n;
        // Standard error of the mean is 0.004 / sqrt(1000) ≈ 1.3e-4.
        assert!(mean_dev.abs() < 5e-4, "mean deviation {mean_dev}");
    }

    #[test]
    fn uniform_small_planet_depth_matches_area_ratio() {
        let model = TransitModel::new([0.0; 4], SAMPLE_COUNT);
        let flux = model.relative_flux(0.0, 0.1);
        assert!((1.0 - flux - 0.01).abs() < 1e-6, "depth {}", 1.0 - flux);
    }

    #[test]
    fn missing_field_fails_whole_curve() {
        let values = InputValues::from_json(json!({ "period": 3.5 })).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            lightcurve(&values, &mut rng),
            Err(ModelError::MissingField("RpRs"))
        );
    }
}
