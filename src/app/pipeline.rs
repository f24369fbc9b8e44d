//! Shared "resolve and simulate" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! identifier -> catalog -> parameter set -> transit + RV curves -> plot payload
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::Utc;
use rand::Rng;

use crate::data::{Catalog, ParameterResolver};
use crate::domain::{InputValues, Panel, ParameterSet, PlotPayload};
use crate::models::{ModelError, RvInputs, RvModel, TransitInputs, TransitModel};

/// Immutable service object: built once, shared by every request.
pub struct Simulator<C> {
    resolver: ParameterResolver<C>,
    transit: TransitModel,
    rv: RvModel,
}

impl<C: Catalog> Simulator<C> {
    pub fn new(catalog: C) -> Self {
        Self::from_parts(ParameterResolver::new(catalog), TransitModel::default(), RvModel::default())
    }

    pub fn from_parts(resolver: ParameterResolver<C>, transit: TransitModel, rv: RvModel) -> Self {
        Self {
            resolver,
            transit,
            rv,
        }
    }

    /// Resolve an identifier to a complete parameter set (never fails).
    pub fn resolve(&self, system_id: &str) -> ParameterSet {
        self.resolver.resolve(system_id)
    }

    /// Compute both curves for the given inputs.
    ///
    /// Fails as a whole if either model rejects its inputs.
    pub fn plot<R: Rng + ?Sized>(
        &self,
        inputs: &InputValues,
        rng: &mut R,
    ) -> Result<PlotPayload, ModelError> {
        let transit_inputs = TransitInputs::try_from(inputs)?;
        let rv_inputs = RvInputs::try_from(inputs)?;

        let transit = self.transit.simulate(&transit_inputs, rng)?;
        let rv = self.rv.simulate(&rv_inputs, rng)?;

        tracing::debug!(
            planet = inputs.planet_name().unwrap_or("-"),
            samples = transit.len(),
            "simulated transit and RV curves"
        );

        Ok(PlotPayload {
            tool: "exo".to_string(),
            generated: Utc::now(),
            planet_name: inputs.planet_name().map(str::to_string),
            inputs: inputs.clone(),
            transit: Panel::transit(transit),
            rv: Panel::rv(rv),
        })
    }

    /// Resolve `system_id` and simulate its curves.
    pub fn resolve_and_plot<R: Rng + ?Sized>(
        &self,
        system_id: &str,
        rng: &mut R,
    ) -> Result<(ParameterSet, PlotPayload), ModelError> {
        let params = self.resolve(system_id);
        let payload = self.plot(&params.to_input_values(), rng)?;
        Ok((params, payload))
    }
}
