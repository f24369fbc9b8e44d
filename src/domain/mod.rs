//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the resolved parameter set (`ParameterSet`)
//! - loosely typed forward-model inputs (`InputValues`)
//! - simulation outputs (`CurveResult`, `Panel`, `PlotPayload`)

pub mod inputs;
pub mod types;

pub use inputs::*;
pub use types::*;
