//! File exports: plot payload JSON and curve CSV.

pub mod curve;
pub mod export;

pub use curve::{read_inputs_json, read_payload_json, write_payload_json};
pub use export::write_curves_csv;
