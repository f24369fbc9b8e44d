//! Forward models: transit light curve and Keplerian radial velocity.
//!
//! Both models are pure functions of their inputs apart from the caller-supplied
//! random source used for the simulated observation.

pub mod noise;
pub mod rv;
pub mod transit;

pub use noise::*;
pub use rv::*;
pub use transit::*;

use crate::domain::CIRCULAR_OMEGA_DEG;

/// Why a forward model could not be evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("field '{0}' is not numeric")]
    NotNumeric(&'static str),
    #[error("field '{0}' is not finite")]
    NotFinite(&'static str),
    #[error("eccentricity {0} is outside [0, 1)")]
    Eccentricity(f64),
    #[error("inputs must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("noise distribution error: {0}")]
    Noise(String),
}

/// Argument of periastron (degrees) the models actually use.
///
/// The periastron is undefined for a circular orbit; catalogs fill it with
/// arbitrary values, so `ecc == 0` always maps to 90°.
pub fn effective_omega_deg(ecc: f64, omega_deg: f64) -> f64 {
    if ecc == 0.0 { CIRCULAR_OMEGA_DEG } else { omega_deg }
}

fn check_eccentricity(ecc: f64) -> Result<f64, ModelError> {
    if (0.0..1.0).contains(&ecc) {
        Ok(ecc)
    } else {
        Err(ModelError::Eccentricity(ecc))
    }
}
