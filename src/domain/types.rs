//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the resolver, the forward models and the front-ends
//! - exported to JSON/CSV
//! - reloaded later for plotting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::InputValues;

/// Number of samples in every simulated curve.
pub const SAMPLE_COUNT: usize = 1000;

/// Argument of periastron (degrees) used for circular orbits.
pub const CIRCULAR_OMEGA_DEG: f64 = 90.0;

/// Simulated light-curve noise (relative flux).
pub const YERR_LC: f64 = 4e-3;

/// Simulated RV noise (m/s).
pub const YERR_RV: f64 = 10.0;

/// The orbital/physical parameters of one planetary system.
///
/// Field names on the wire match the short names used by the plot inputs
/// (`aRs`, `RpRs`, `K`, `T14`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub planet_name: String,
    /// Orbital period (days).
    pub period: f64,
    pub ecc: f64,
    /// Argument of periastron (degrees).
    pub omega: f64,
    /// Semi-major axis in stellar radii.
    #[serde(rename = "aRs")]
    pub a_rs: f64,
    /// Inclination (degrees).
    pub orbinc: f64,
    /// Planet-to-star radius ratio.
    #[serde(rename = "RpRs")]
    pub rp_rs: f64,
    /// RV semi-amplitude (km/s).
    #[serde(rename = "K")]
    pub k: f64,
    /// Systemic velocity (km/s).
    pub vsys: f64,
    /// Total transit duration (hours).
    #[serde(rename = "T14")]
    pub t14: f64,
    pub yerr_lc: f64,
    pub yerr_rv: f64,
}

impl ParameterSet {
    /// The loosely typed view consumed by the forward models.
    pub fn to_input_values(&self) -> InputValues {
        InputValues::from_parameter_set(self)
    }
}

/// One simulated curve: sample times, the noiseless model and one noisy realization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveResult {
    pub times: Vec<f64>,
    pub model: Vec<f64>,
    pub observed: Vec<f64>,
}

impl CurveResult {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn model_points(&self) -> Vec<(f64, f64)> {
        self.times.iter().copied().zip(self.model.iter().copied()).collect()
    }

    pub fn observed_points(&self) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .copied()
            .zip(self.observed.iter().copied())
            .collect()
    }
}

/// A titled panel of the two-panel figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub curve: CurveResult,
}

impl Panel {
    pub fn transit(curve: CurveResult) -> Self {
        Self {
            title: "Transit lightcurve".to_string(),
            x_label: "Time [h]".to_string(),
            y_label: "Relative Flux".to_string(),
            curve,
        }
    }

    pub fn rv(curve: CurveResult) -> Self {
        Self {
            title: "Radial velocity curve".to_string(),
            x_label: "Time [d]".to_string(),
            y_label: "RV [km/s]".to_string(),
            curve,
        }
    }
}

/// Everything produced by one plot request (JSON export schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPayload {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub planet_name: Option<String>,
    pub inputs: InputValues,
    pub transit: Panel,
    pub rv: Panel,
}
