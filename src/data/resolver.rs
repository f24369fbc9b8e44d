//! Catalog-backed parameter resolution.
//!
//! `ParameterResolver::resolve` never fails: every field that cannot be read
//! from the catalog (no match, ambiguous match, unavailable catalog, missing
//! column, non-numeric or NaN value) falls back to its default. The reason is
//! kept only for logging.

use crate::data::catalog::{Catalog, CatalogError, CatalogRecord, extract_scalar};
use crate::domain::{CIRCULAR_OMEGA_DEG, ParameterSet, YERR_LC, YERR_RV};
use crate::models::effective_omega_deg;

/// Columns requested from the catalog.
pub const CATALOG_COLUMNS: [&str; 10] = [
    "pl_name",
    "pl_ratror",
    "pl_orbper",
    "pl_orbincl",
    "pl_orbeccen",
    "pl_orblper",
    "pl_rvamp",
    "st_radv",
    "pl_ratdor",
    "pl_trandur",
];

/// RV semi-amplitudes are catalogued in m/s.
const RV_AMPLITUDE_TO_KMS: f64 = 1.0 / 1000.0;

/// Why a single field could not be read from the catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionError {
    #[error("no catalog record matches")]
    NoMatch,
    #[error("{0} catalog records match")]
    Ambiguous(usize),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("column '{0}' is missing")]
    MissingField(&'static str),
    #[error("column '{0}' is not numeric")]
    NotNumeric(&'static str),
    #[error("column '{0}' is not a finite number")]
    NotANumber(&'static str),
}

/// Values used when the catalog cannot supply a field.
///
/// `k` is in catalog units (m/s); it is rescaled with the resolved value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefaults {
    pub period: f64,
    pub ecc: f64,
    pub omega: f64,
    pub a_rs: f64,
    pub orbinc: f64,
    pub rp_rs: f64,
    pub k: f64,
    pub vsys: f64,
    pub t14: f64,
    pub yerr_lc: f64,
    pub yerr_rv: f64,
}

impl Default for ParameterDefaults {
    fn default() -> Self {
        Self {
            period: 0.0,
            ecc: 0.0,
            omega: CIRCULAR_OMEGA_DEG,
            a_rs: 0.0,
            orbinc: 0.0,
            rp_rs: 0.0,
            k: 0.0,
            vsys: 0.0,
            t14: 0.0,
            yerr_lc: YERR_LC,
            yerr_rv: YERR_RV,
        }
    }
}

impl ParameterDefaults {
    /// The parameter set reported when nothing could be read from the catalog.
    pub fn to_parameter_set(&self, planet_name: &str) -> ParameterSet {
        ParameterSet {
            planet_name: planet_name.to_string(),
            period: self.period,
            ecc: self.ecc,
            omega: self.omega,
            a_rs: self.a_rs,
            orbinc: self.orbinc,
            rp_rs: self.rp_rs,
            k: self.k * RV_AMPLITUDE_TO_KMS,
            vsys: self.vsys,
            t14: self.t14,
            yerr_lc: self.yerr_lc,
            yerr_rv: self.yerr_rv,
        }
    }
}

pub struct ParameterResolver<C> {
    catalog: C,
    defaults: ParameterDefaults,
}

impl<C: Catalog> ParameterResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_defaults(catalog, ParameterDefaults::default())
    }

    pub fn with_defaults(catalog: C, defaults: ParameterDefaults) -> Self {
        Self { catalog, defaults }
    }

    /// Resolve a planet identifier to a complete parameter set.
    ///
    /// Issues exactly one catalog lookup.
    pub fn resolve(&self, system_id: &str) -> ParameterSet {
        let lookup = self.catalog.lookup(system_id);
        match &lookup {
            Ok(records) => tracing::info!(planet = system_id, matches = records.len(), "catalog lookup"),
            Err(err) => tracing::warn!(planet = system_id, error = %err, "catalog unavailable, using defaults"),
        }

        let d = &self.defaults;
        let field = |column: &'static str, default: f64| {
            resolve_field(&lookup, column).or_default_logged(column, default)
        };

        // Periastron is undefined for circular orbits, whatever the catalog says.
        let ecc = field("pl_orbeccen", d.ecc);
        let omega = effective_omega_deg(ecc, field("pl_orblper", d.omega));

        ParameterSet {
            planet_name: system_id.to_string(),
            period: field("pl_orbper", d.period),
            ecc,
            omega,
            a_rs: field("pl_ratdor", d.a_rs),
            orbinc: field("pl_orbincl", d.orbinc),
            rp_rs: field("pl_ratror", d.rp_rs),
            k: field("pl_rvamp", d.k) * RV_AMPLITUDE_TO_KMS,
            vsys: field("st_radv", d.vsys),
            t14: field("pl_trandur", d.t14),
            yerr_lc: d.yerr_lc,
            yerr_rv: d.yerr_rv,
        }
    }
}

/// Read one column from a lookup that must have matched exactly one record.
pub fn resolve_field(
    lookup: &Result<Vec<CatalogRecord>, CatalogError>,
    column: &'static str,
) -> Result<f64, ResolutionError> {
    let record = match lookup {
        Err(err) => return Err(err.clone().into()),
        Ok(records) => match records.as_slice() {
            [record] => record,
            [] => return Err(ResolutionError::NoMatch),
            many => return Err(ResolutionError::Ambiguous(many.len())),
        },
    };

    let cell = record
        .get(column)
        .ok_or(ResolutionError::MissingField(column))?;
    let value = extract_scalar(cell).ok_or(ResolutionError::NotNumeric(column))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ResolutionError::NotANumber(column))
    }
}

/// Collapse a field result to its value or the default, logging the reason.
pub trait OrDefaultLogged {
    fn or_default_logged(self, column: &str, default: f64) -> f64;
}

impl OrDefaultLogged for Result<f64, ResolutionError> {
    fn or_default_logged(self, column: &str, default: f64) -> f64 {
        match self {
            Ok(value) => value,
            Err(ResolutionError::NotANumber(_)) => {
                tracing::debug!(column, default, "no catalog value, using default");
                default
            }
            Err(err) => {
                tracing::info!(column, default, reason = %err, "could not read catalog parameter, using default");
                default
            }
        }
    }
}
