//! Two-body orbit helpers shared by the transit and RV models.
//!
//! Conventions:
//!
//! - angles are in radians
//! - `tc` is the time of inferior conjunction (mid-transit), `tp` the time of
//!   periastron passage
//! - at conjunction the true anomaly satisfies `f + ω = π/2`
//!
//! Numerical notes:
//! - Kepler's equation `E - e sin E = M` is solved by Newton iteration. Starting
//!   from `E = M` converges for moderate eccentricities; for `e ≥ 0.8` we start
//!   from `E = π`, which is robust near periastron.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Newton iteration stops once the update is below this size.
const KEPLER_TOL: f64 = 1e-12;

const KEPLER_MAX_ITER: usize = 50;

/// Solve Kepler's equation for the eccentric anomaly.
pub fn eccentric_anomaly(mean_anomaly: f64, ecc: f64) -> f64 {
    let m = mean_anomaly.rem_euclid(TAU);
    if ecc == 0.0 {
        return m;
    }

    let mut e = if ecc < 0.8 { m } else { PI };
    for _ in 0..KEPLER_MAX_ITER {
        let step = (e - ecc * e.sin() - m) / (1.0 - ecc * e.cos());
        e -= step;
        if step.abs() < KEPLER_TOL {
            break;
        }
    }
    e
}

/// True anomaly from the eccentric anomaly.
pub fn true_anomaly_from_eccentric(ecc_anomaly: f64, ecc: f64) -> f64 {
    let half = 0.5 * ecc_anomaly;
    2.0 * ((1.0 + ecc).sqrt() * half.sin()).atan2((1.0 - ecc).sqrt() * half.cos())
}

/// Eccentric anomaly from the true anomaly (inverse of the above).
pub fn eccentric_from_true_anomaly(true_anomaly: f64, ecc: f64) -> f64 {
    let half = 0.5 * true_anomaly;
    2.0 * ((1.0 - ecc).sqrt() * half.sin()).atan2((1.0 + ecc).sqrt() * half.cos())
}

/// Convert a time of inferior conjunction to a time of periastron.
pub fn time_of_periastron(tc: f64, period: f64, ecc: f64, omega: f64) -> f64 {
    let f = FRAC_PI_2 - omega;
    let ee = eccentric_from_true_anomaly(f, ecc);
    tc - period / TAU * (ee - ecc * ee.sin())
}

/// True anomaly at time `t` for an orbit with periastron at `tp`.
pub fn true_anomaly_at(t: f64, tp: f64, period: f64, ecc: f64) -> f64 {
    let mean_anomaly = TAU * (t - tp) / period;
    let ecc_anomaly = eccentric_anomaly(mean_anomaly, ecc);
    true_anomaly_from_eccentric(ecc_anomaly, ecc)
}
